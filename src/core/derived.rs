//! Derived offensive stats.
//!
//! Invested skill levels, per-slot upgrade levels, and equipped item
//! stat lines all fold into one [`DerivedStats`] snapshot. Combat and
//! XP/gold bonuses read from here so the three sources stay additive
//! and consistent.

use super::constants::{
    ATTACK_SPEED_PERCENT_PER_LEVEL, BASE_CRIT_CHANCE_PERCENT, CRIT_CHANCE_PERCENT_PER_LEVEL,
    CRIT_DAMAGE_BONUS_PER_LEVEL, DAMAGE_PERCENT_PER_LEVEL, SLOT_ATTACK_SPEED_PERCENT_PER_LEVEL,
    SLOT_CRIT_CHANCE_PERCENT_PER_LEVEL, SLOT_DAMAGE_PERCENT_PER_LEVEL,
    XP_BONUS_PERCENT_PER_LEVEL,
};
use super::game_state::{GameState, SkillStat, SlotStat};
use crate::combat::types::AttackProfile;
use crate::items::ItemStatKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedStats {
    pub damage_bonus_percent: f64,
    pub crit_chance_percent: f64,
    /// Added on top of the base 2.0 crit multiplier.
    pub crit_damage_bonus: f64,
    pub attack_speed_percent: f64,
    pub xp_bonus_percent: f64,
    pub gold_bonus_percent: f64,
    pub lifesteal_level: u32,
}

impl DerivedStats {
    /// Folds skill investment, slot upgrades, and equipped items into
    /// one snapshot.
    pub fn of(state: &GameState) -> Self {
        let skill = |s: SkillStat| state.tank.skill_level(s) as f64;

        let slot_total = |s: SlotStat| -> f64 {
            state
                .slots
                .iter()
                .filter(|slot| slot.unlocked)
                .map(|slot| slot.stat_level(s) as f64)
                .sum()
        };

        let item_total = |kind: ItemStatKind| -> f64 {
            state
                .slots
                .iter()
                .filter_map(|slot| slot.equipped.as_ref())
                .map(|item| item.stat_total(kind))
                .sum()
        };

        Self {
            damage_bonus_percent: skill(SkillStat::Damage) * DAMAGE_PERCENT_PER_LEVEL
                + slot_total(SlotStat::Damage) * SLOT_DAMAGE_PERCENT_PER_LEVEL
                + item_total(ItemStatKind::DamagePercent),
            crit_chance_percent: BASE_CRIT_CHANCE_PERCENT
                + skill(SkillStat::CritChance) * CRIT_CHANCE_PERCENT_PER_LEVEL
                + slot_total(SlotStat::CritChance) * SLOT_CRIT_CHANCE_PERCENT_PER_LEVEL
                + item_total(ItemStatKind::CritChance),
            crit_damage_bonus: skill(SkillStat::CritDamage) * CRIT_DAMAGE_BONUS_PER_LEVEL
                + item_total(ItemStatKind::CritDamage) / 100.0,
            attack_speed_percent: skill(SkillStat::AttackSpeed) * ATTACK_SPEED_PERCENT_PER_LEVEL
                + slot_total(SlotStat::AttackSpeed) * SLOT_ATTACK_SPEED_PERCENT_PER_LEVEL
                + item_total(ItemStatKind::AttackSpeed),
            xp_bonus_percent: skill(SkillStat::XpBonus) * XP_BONUS_PERCENT_PER_LEVEL
                + item_total(ItemStatKind::XpGain),
            gold_bonus_percent: item_total(ItemStatKind::GoldGain),
            lifesteal_level: state.tank.skill_level(SkillStat::LifeSteal)
                + item_total(ItemStatKind::LifeSteal).floor() as u32,
        }
    }
}

impl GameState {
    /// Builds the attack snapshot combat resolution works from.
    pub fn attack_profile(&self, base_damage: u32, area_radius: Option<f64>) -> AttackProfile {
        let derived = DerivedStats::of(self);
        AttackProfile {
            base_damage,
            attacker_level: self.tank.level,
            damage_bonus_percent: derived.damage_bonus_percent,
            crit_chance_percent: derived.crit_chance_percent,
            crit_damage_bonus: derived.crit_damage_bonus,
            lifesteal_level: derived.lifesteal_level,
            area_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{InventoryItem, ItemStat, ModuleArchetype, Rarity};

    #[test]
    fn test_fresh_state_baseline() {
        let state = GameState::new();
        let stats = DerivedStats::of(&state);

        assert_eq!(stats.damage_bonus_percent, 0.0);
        assert_eq!(stats.crit_chance_percent, BASE_CRIT_CHANCE_PERCENT);
        assert_eq!(stats.crit_damage_bonus, 0.0);
        assert_eq!(stats.xp_bonus_percent, 0.0);
        assert_eq!(stats.lifesteal_level, 0);
    }

    #[test]
    fn test_equipped_item_lines_are_counted() {
        let mut state = GameState::new();
        let item = InventoryItem::new(
            ModuleArchetype::Cannon,
            Rarity::Rare,
            vec![
                ItemStat {
                    kind: ItemStatKind::DamagePercent,
                    value: 12.0,
                },
                ItemStat {
                    kind: ItemStatKind::LifeSteal,
                    value: 2.0,
                },
            ],
        );
        state.slots[0].equipped = Some(item);

        let stats = DerivedStats::of(&state);
        assert_eq!(stats.damage_bonus_percent, 12.0);
        assert_eq!(stats.lifesteal_level, 2);
    }

    #[test]
    fn test_attack_profile_uses_level_and_stats() {
        let mut state = GameState::new();
        state.tank.level = 7;
        let profile = state.attack_profile(40, Some(3.0));

        assert_eq!(profile.base_damage, 40);
        assert_eq!(profile.attacker_level, 7);
        assert_eq!(profile.area_radius, Some(3.0));
        assert_eq!(profile.crit_chance_percent, BASE_CRIT_CHANCE_PERCENT);
    }
}
