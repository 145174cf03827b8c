//! Loot generation: drop gating, rarity rolls, and item construction,
//! invoked per opponent-death notification.

pub mod drops;
pub mod generation;

pub use drops::{drop_chance, roll_drop, roll_rarity};
pub use generation::{generate_item, handle_opponent_death, LootOutcome};
