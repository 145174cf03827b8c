//! Item model: rarity tiers, module archetypes, and rolled stat lines.

pub mod types;

pub use types::{InventoryItem, ItemStat, ItemStatKind, ModuleArchetype, Rarity};
