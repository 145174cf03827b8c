//! Combat resolution: a stateless formula pipeline invoked per
//! qualifying hit, plus the inbound melee path that damages the tank.

pub mod resolution;
pub mod types;

pub use resolution::{
    apply_opponent_melee, area_falloff_damage, lifesteal_amount, melee_ready, resolve_attack,
    resolve_hit, AreaHitTracker,
};
pub use types::{AttackProfile, HitOutcome, OpponentCategory, OpponentDeath, Position};
