//! Ironclad - progression and combat core for an incremental
//! tank-defense game.
//!
//! The crate is the event-driven heart of the game: a single
//! [`core::GameState`] aggregate owns all progression, vitals,
//! economy, equipment, and zone state; [`combat`] resolves damage
//! formulas per hit; [`loot`] turns opponent deaths into items. Every
//! successful mutation publishes one characteristic event on the
//! shared [`events::EventBus`], which is the only channel between the
//! core and the presentation layers built on top of it.
//!
//! Execution is single-threaded and cooperative: the host calls
//! mutation methods from its per-tick update, and every publish
//! delivers synchronously before the call returns.

pub mod combat;
pub mod core;
pub mod events;
pub mod items;
pub mod loot;

pub use crate::core::{GameState, SaveManager, StateError, StateResult};
pub use crate::events::{EventBus, EventKind, GameEvent};
