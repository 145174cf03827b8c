use serde::{Deserialize, Serialize};

/// 2D world position, used for drop placement and area falloff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Opponent categories, ordered by threat. Drop chance rises with the
/// category; the top two guarantee a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OpponentCategory {
    Fodder,
    Standard,
    Elite,
    Boss,
}

impl OpponentCategory {
    pub fn is_boss(&self) -> bool {
        matches!(self, OpponentCategory::Boss)
    }

    /// Whether a kill of this category always drops an item.
    pub fn guarantees_drop(&self) -> bool {
        matches!(self, OpponentCategory::Elite | OpponentCategory::Boss)
    }
}

/// Death notification handed in by the host when an opponent dies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentDeath {
    pub id: u64,
    pub category: OpponentCategory,
    pub position: Position,
    /// Set for "uber" variants of bosses.
    pub uber: bool,
}

/// Snapshot of the tank's offensive numbers for one attack. Built from
/// the aggregate's derived stats; resolution itself stays stateless.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackProfile {
    pub base_damage: u32,
    pub attacker_level: u32,
    /// Percent bonus from invested damage stat plus item stat lines.
    pub damage_bonus_percent: f64,
    pub crit_chance_percent: f64,
    /// Added on top of the base 2.0 crit multiplier.
    pub crit_damage_bonus: f64,
    pub lifesteal_level: u32,
    /// Splash radius; `None` for single-target attacks.
    pub area_radius: Option<f64>,
}

/// Outcome of one resolved hit against one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitOutcome {
    pub target_id: u64,
    pub damage: u32,
    pub crit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn test_category_drop_guarantees() {
        assert!(!OpponentCategory::Fodder.guarantees_drop());
        assert!(!OpponentCategory::Standard.guarantees_drop());
        assert!(OpponentCategory::Elite.guarantees_drop());
        assert!(OpponentCategory::Boss.guarantees_drop());
        assert!(OpponentCategory::Boss.is_boss());
        assert!(!OpponentCategory::Elite.is_boss());
    }
}
