//! Tank-domain mutations: XP and level-ups, stat upgrades, damage,
//! healing, and revival.

use super::balance::{damage_after_defense, required_xp, tank_stat_cost};
use super::constants::{NEAR_DEATH_THRESHOLD, REVIVE_HP_FRACTION};
use super::derived::DerivedStats;
use super::errors::{Resource, StateError, StateResult};
use super::game_state::{GameState, SkillStat, TankStat};
use crate::combat::types::OpponentCategory;
use crate::events::{EventBus, GameEvent, HealSource, XpSource};

impl GameState {
    /// Adds XP (boosted by the XP-bonus stat) and resolves any level-ups.
    /// Publishes one XP event, then one level-up event per level gained.
    /// Returns the number of levels gained.
    pub fn add_xp(&mut self, amount: u64, source: XpSource, bus: &EventBus) -> u32 {
        let bonus = DerivedStats::of(self).xp_bonus_percent;
        let boosted = (amount as f64 * (1.0 + bonus / 100.0)).floor() as u64;

        self.tank.xp += boosted;
        bus.publish(GameEvent::XpGained {
            amount: boosted,
            total_xp: self.tank.xp,
            source,
        });

        let mut gained = 0;
        while self.tank.xp >= required_xp(self.tank.level) {
            self.tank.xp -= required_xp(self.tank.level);
            self.tank.level += 1;
            gained += 1;
            bus.publish(GameEvent::LeveledUp {
                level: self.tank.level,
                unspent_points: self.unspent_skill_points(),
            });
        }
        gained
    }

    /// Spends one skill point on a stat. Returns the new level.
    pub fn upgrade_stat(&mut self, stat: SkillStat, bus: &EventBus) -> StateResult<u32> {
        if self.unspent_skill_points() == 0 {
            return Err(StateError::InsufficientResource(Resource::SkillPoints));
        }
        if self.tank.skill_level(stat) >= self.tank.level {
            return Err(StateError::InsufficientResource(Resource::LevelCap));
        }

        let level = self.tank.raise_skill(stat);
        bus.publish(GameEvent::SkillStatUpgraded { stat, level });
        Ok(level)
    }

    /// Buys the next level of a gold-gated vital stat and recomputes
    /// the derived value. Returns the new level.
    pub fn upgrade_tank_stat(&mut self, stat: TankStat, bus: &EventBus) -> StateResult<u32> {
        let current = self.vitals.upgrade_level(stat);
        if current >= self.tank.level {
            return Err(StateError::InsufficientResource(Resource::LevelCap));
        }
        let cost = tank_stat_cost(current);
        if self.economy.gold < cost {
            return Err(StateError::InsufficientResource(Resource::Gold));
        }

        self.economy.gold -= cost;
        let level = self.vitals.raise_upgrade(stat);
        bus.publish(GameEvent::TankStatUpgraded { stat, level, cost });
        Ok(level)
    }

    /// Applies incoming damage after defense mitigation. HP is clamped
    /// to a minimum of 1; the tank cannot die. Publishes a damage
    /// event, plus a near-death event if the 20% line was crossed from
    /// above in this call. Returns the mitigated amount.
    pub fn take_damage(
        &mut self,
        amount: u32,
        source_id: u64,
        source_category: OpponentCategory,
        bus: &EventBus,
    ) -> u32 {
        let was_above = self.vitals.hp_fraction() > NEAR_DEATH_THRESHOLD;

        let mitigated = damage_after_defense(amount, self.vitals.defense);
        self.vitals.current_hp = self.vitals.current_hp.saturating_sub(mitigated).max(1);

        bus.publish(GameEvent::DamageTaken {
            raw: amount,
            mitigated,
            hp: self.vitals.current_hp,
            source_id,
            source_category,
        });

        if was_above && self.vitals.hp_fraction() <= NEAR_DEATH_THRESHOLD {
            bus.publish(GameEvent::NearDeath {
                hp: self.vitals.current_hp,
                max_hp: self.vitals.max_hp,
            });
        }
        mitigated
    }

    /// Heals up to max HP. Publishes a heal event only when HP actually
    /// rose. Returns the amount healed.
    pub fn heal(&mut self, amount: u32, source: HealSource, bus: &EventBus) -> u32 {
        let before = self.vitals.current_hp;
        self.vitals.current_hp = before.saturating_add(amount).min(self.vitals.max_hp);
        let healed = self.vitals.current_hp - before;

        if healed > 0 {
            bus.publish(GameEvent::Healed {
                amount: healed,
                hp: self.vitals.current_hp,
                source,
            });
        }
        healed
    }

    /// Restores HP to half of max. The counterpart to near-death,
    /// triggered by a player action or the host's revive timer.
    pub fn revive(&mut self, bus: &EventBus) {
        self.vitals.current_hp =
            ((self.vitals.max_hp as f64 * REVIVE_HP_FRACTION).floor() as u32).max(1);
        bus.publish(GameEvent::Revived {
            hp: self.vitals.current_hp,
        });
    }

    /// Applies one second of passive regeneration through `heal`.
    pub fn regen_tick(&mut self, bus: &EventBus) -> u32 {
        let regen = self.vitals.regen_per_second;
        self.heal(regen, HealSource::Regen, bus)
    }
}
