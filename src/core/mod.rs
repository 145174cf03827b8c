//! Game state aggregate: the single source of truth for progression,
//! vitals, economy, equipment, and zones. All mutation goes through
//! methods on [`GameState`], and every successful mutation publishes
//! one characteristic event on the bus it is handed.

pub mod balance;
pub mod constants;
mod derived;
mod economy;
mod errors;
mod game_state;
mod modules;
mod prestige;
mod save;
mod tank;
mod zones;

pub use derived::DerivedStats;
pub use errors::{Resource, StateError, StateResult};
pub use game_state::{
    Economy, EssenceKind, GameState, ModuleSlot, Paragon, SellPolicy, SkillStat, SlotStat,
    TankProgression, TankStat, TankVitals, Vitality, ZoneProgress,
};
pub use modules::InventoryOutcome;
pub use save::{SaveData, SaveManager};
