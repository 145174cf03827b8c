//! Typed event bus and the event catalogue it carries.

pub mod bus;
pub mod types;

pub use bus::{EventBus, HandlerId};
pub use types::{EventDomain, EventKind, GameEvent, GoldReason, HealSource, XpSource};
