//! Stateless damage resolution.
//!
//! Each qualifying hit is one pure calculation followed by a single
//! targeted mutation of the aggregate (lifesteal healing, or the tank
//! taking melee damage). Crit rolls come from an injected generator so
//! combat is replayable under a seeded generator in tests.

use rand::Rng;

use crate::core::constants::{BASE_CRIT_MULTIPLIER, LEVEL_SCALING_PER_LEVEL};
use crate::core::GameState;
use crate::events::{EventBus, HealSource};

use super::types::{AttackProfile, HitOutcome, OpponentCategory, Position};

/// Resolves the primary hit of an attack against one target.
///
/// `damage = floor(base * (1 + levelScaling) * (1 + statBonus) * critMult)`
/// with `critMult = 2.0 + critDamageBonus` on a successful crit roll.
/// Level scaling starts at zero for a level 1 tank.
pub fn resolve_hit(profile: &AttackProfile, target_id: u64, rng: &mut impl Rng) -> HitOutcome {
    let crit = rng.gen_range(0.0..100.0) < profile.crit_chance_percent;
    let crit_multiplier = if crit {
        BASE_CRIT_MULTIPLIER + profile.crit_damage_bonus
    } else {
        1.0
    };

    let level_scaling = (profile.attacker_level - 1) as f64 * LEVEL_SCALING_PER_LEVEL;
    let stat_bonus = profile.damage_bonus_percent / 100.0;
    let damage = (profile.base_damage as f64
        * (1.0 + level_scaling)
        * (1.0 + stat_bonus)
        * crit_multiplier)
        .floor() as u32;

    HitOutcome {
        target_id,
        damage,
        crit,
    }
}

/// Splash falloff for a secondary target at the given distance.
///
/// `floor(primary * 0.5 * (1 - 0.5 * distance / radius))`
pub fn area_falloff_damage(primary_damage: u32, distance: f64, radius: f64) -> u32 {
    (primary_damage as f64 * 0.5 * (1.0 - 0.5 * distance / radius)).floor() as u32
}

/// Per-tick guard so a piercing attack damages each target at most
/// once. Cleared by the host at the start of every tick.
#[derive(Debug, Default)]
pub struct AreaHitTracker {
    hits: std::collections::HashSet<(u64, u64)>,
}

impl AreaHitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the (attack, target) pair. Returns false when the pair
    /// was already claimed this tick.
    pub fn claim(&mut self, attack_id: u64, target_id: u64) -> bool {
        self.hits.insert((attack_id, target_id))
    }

    pub fn begin_tick(&mut self) {
        self.hits.clear();
    }
}

/// Lifesteal healing for a hit: `floor(damage * level * 0.5 / 100)`.
pub fn lifesteal_amount(damage_dealt: u32, lifesteal_level: u32) -> u32 {
    (damage_dealt as f64 * lifesteal_level as f64 * 0.5 / 100.0).floor() as u32
}

/// Resolves one full attack: the primary hit, the area falloff pass
/// over the remaining targets, and lifesteal applied back through the
/// aggregate. Targets already claimed this tick are skipped.
#[allow(clippy::too_many_arguments)]
pub fn resolve_attack(
    state: &mut GameState,
    profile: &AttackProfile,
    attack_id: u64,
    primary: (u64, Position),
    others: &[(u64, Position)],
    tracker: &mut AreaHitTracker,
    rng: &mut impl Rng,
    bus: &EventBus,
) -> Vec<HitOutcome> {
    let mut outcomes = Vec::new();

    if tracker.claim(attack_id, primary.0) {
        outcomes.push(resolve_hit(profile, primary.0, rng));
    }

    if let (Some(radius), Some(primary_hit)) = (profile.area_radius, outcomes.first().copied()) {
        for &(target_id, position) in others {
            if target_id == primary.0 {
                continue;
            }
            let distance = primary.1.distance_to(&position);
            if distance > radius || !tracker.claim(attack_id, target_id) {
                continue;
            }
            outcomes.push(HitOutcome {
                target_id,
                damage: area_falloff_damage(primary_hit.damage, distance, radius),
                crit: false,
            });
        }
    }

    if profile.lifesteal_level > 0 {
        let dealt: u32 = outcomes.iter().map(|o| o.damage).sum();
        let heal = lifesteal_amount(dealt, profile.lifesteal_level);
        if heal > 0 {
            state.heal(heal, HealSource::LifeSteal, bus);
        }
    }

    outcomes
}

/// Whether an opponent's melee swing lands this tick: it must be in
/// range and its individual cooldown must have elapsed.
pub fn melee_ready(distance: f64, attack_range: f64, elapsed_secs: f64, cooldown_secs: f64) -> bool {
    distance <= attack_range && elapsed_secs >= cooldown_secs
}

/// An opponent in range strikes the tank. The damage event keeps the
/// source's category so presentation can distinguish boss hits.
pub fn apply_opponent_melee(
    state: &mut GameState,
    raw_damage: u32,
    source_id: u64,
    category: OpponentCategory,
    bus: &EventBus,
) -> u32 {
    state.take_damage(raw_damage, source_id, category, bus)
}
