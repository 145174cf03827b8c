//! Drop and rarity rolls.
//!
//! All probabilities draw from an injected generator so a seeded run
//! reproduces the same loot stream.

use rand::Rng;

use crate::combat::OpponentCategory;
use crate::core::balance::drop_level_bonus;
use crate::core::constants::{
    DROP_CHANCE_FODDER, DROP_CHANCE_STANDARD, ELITE_RARITY_WEIGHT_MULTIPLIER,
    RARITY_WEIGHT_COMMON, RARITY_WEIGHT_EPIC, RARITY_WEIGHT_PER_LEVEL_EPIC,
    RARITY_WEIGHT_PER_LEVEL_RARE, RARITY_WEIGHT_PER_LEVEL_UNCOMMON, RARITY_WEIGHT_RARE,
    RARITY_WEIGHT_UNCOMMON,
};
use crate::items::Rarity;

/// Drop probability for a kill of the given category. Elites and
/// bosses always drop; the lower categories gain a level-scaled bonus.
pub fn drop_chance(category: OpponentCategory, tank_level: u32) -> f64 {
    if category.guarantees_drop() {
        return 1.0;
    }
    let base = match category {
        OpponentCategory::Fodder => DROP_CHANCE_FODDER,
        OpponentCategory::Standard => DROP_CHANCE_STANDARD,
        OpponentCategory::Elite | OpponentCategory::Boss => unreachable!(),
    };
    (base + drop_level_bonus(tank_level)).min(1.0)
}

/// Gate roll: does this kill drop an item at all?
pub fn roll_drop(category: OpponentCategory, tank_level: u32, rng: &mut impl Rng) -> bool {
    category.guarantees_drop() || rng.gen::<f64>() <= drop_chance(category, tank_level)
}

/// Rolls a rarity from the four weighted droppable tiers.
///
/// The higher-tier weights grow with tank level, elites double them,
/// and elite/boss kills that still land on common are re-floored to
/// uncommon.
pub fn roll_rarity(category: OpponentCategory, tank_level: u32, rng: &mut impl Rng) -> Rarity {
    let level = tank_level as f64;
    let elite = if category == OpponentCategory::Elite {
        ELITE_RARITY_WEIGHT_MULTIPLIER
    } else {
        1.0
    };

    let weights = [
        (Rarity::Common, RARITY_WEIGHT_COMMON),
        (
            Rarity::Uncommon,
            (RARITY_WEIGHT_UNCOMMON + level * RARITY_WEIGHT_PER_LEVEL_UNCOMMON) * elite,
        ),
        (
            Rarity::Rare,
            (RARITY_WEIGHT_RARE + level * RARITY_WEIGHT_PER_LEVEL_RARE) * elite,
        ),
        (
            Rarity::Epic,
            (RARITY_WEIGHT_EPIC + level * RARITY_WEIGHT_PER_LEVEL_EPIC) * elite,
        ),
    ];

    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0.0..total);
    let mut rarity = Rarity::Common;
    for (tier, weight) in weights {
        if roll < weight {
            rarity = tier;
            break;
        }
        roll -= weight;
    }

    if rarity == Rarity::Common && category.guarantees_drop() {
        rarity = Rarity::Uncommon;
    }
    rarity
}
