//! Pure balance formulas shared by the aggregate, combat, and loot.
//!
//! All curve math lives here so a balance change is a one-file edit
//! and every consumer stays consistent.

use super::constants::{
    DROP_LEVEL_BONUS_CAP, DROP_LEVEL_BONUS_LEVELS, DROP_LEVEL_BONUS_STEP, SLOT_STAT_UNIT_PRICE,
    TANK_STAT_UNIT_PRICE, XP_CURVE_BASE, XP_CURVE_GROWTH,
};

/// XP required to advance past the given level.
///
/// `required_xp(level) = floor(100 * 1.15^level)`
pub fn required_xp(level: u32) -> u64 {
    (XP_CURVE_BASE * XP_CURVE_GROWTH.powi(level as i32)).floor() as u64
}

/// Gold cost of the next level of a gold-gated tank stat.
pub fn tank_stat_cost(current_level: u32) -> u64 {
    (current_level as u64 + 1) * TANK_STAT_UNIT_PRICE
}

/// Gold cost of the next level of a per-slot stat.
pub fn slot_stat_cost(current_level: u32) -> u64 {
    (current_level as u64 + 1) * SLOT_STAT_UNIT_PRICE
}

/// Damage remaining after defense mitigation.
///
/// `floor(amount * (1 - defense / (defense + 100)))`. Computed in f64 on
/// purpose: the curve was tuned against floating-point rounding, e.g.
/// 100 damage against 400 defense mitigates to 19, not 20.
pub fn damage_after_defense(amount: u32, defense: u32) -> u32 {
    let d = defense as f64;
    (amount as f64 * (1.0 - d / (d + 100.0))).floor() as u32
}

/// Level-scaled bonus added to an opponent category's base drop chance.
pub fn drop_level_bonus(tank_level: u32) -> f64 {
    let steps = (tank_level / DROP_LEVEL_BONUS_LEVELS) as f64;
    (steps * DROP_LEVEL_BONUS_STEP).min(DROP_LEVEL_BONUS_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_xp_curve() {
        // floor(100 * 1.15^1) = 114, floor(100 * 1.15^10) = 404
        assert_eq!(required_xp(1), 114);
        assert_eq!(required_xp(10), 404);
        assert!(required_xp(50) > required_xp(10));
    }

    #[test]
    fn test_tank_stat_cost() {
        assert_eq!(tank_stat_cost(0), 100);
        assert_eq!(tank_stat_cost(5), 600);
    }

    #[test]
    fn test_slot_stat_cost() {
        assert_eq!(slot_stat_cost(0), 50);
        assert_eq!(slot_stat_cost(3), 200);
    }

    #[test]
    fn test_damage_after_defense() {
        assert_eq!(damage_after_defense(100, 0), 100);
        assert_eq!(damage_after_defense(100, 100), 50);
        // 400/500 is not exact in binary, the floor lands on 19
        assert_eq!(damage_after_defense(100, 400), 19);
    }

    #[test]
    fn test_drop_level_bonus_caps() {
        assert_eq!(drop_level_bonus(1), 0.0);
        assert!((drop_level_bonus(10) - 0.01).abs() < 1e-9);
        assert!((drop_level_bonus(55) - 0.05).abs() < 1e-9);
        assert!((drop_level_bonus(500) - 0.10).abs() < 1e-9);
    }
}
