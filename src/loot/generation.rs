//! Item construction and the death-notification pipeline.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::combat::OpponentDeath;
use crate::core::{GameState, InventoryOutcome, StateResult};
use crate::events::{EventBus, GameEvent};
use crate::items::{InventoryItem, ItemStat, ItemStatKind, ModuleArchetype, Rarity};

use super::drops::{roll_drop, roll_rarity};

/// What a death notification produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LootOutcome {
    /// The drop gate said no.
    Nothing,
    /// An item was created and stored; a drop event was published.
    Dropped { item_id: uuid::Uuid, rarity: Rarity },
    /// An item was created but liquidated by the auto-sell policy.
    AutoSold { gold: u64 },
}

fn stat_count(rarity: Rarity, rng: &mut impl Rng) -> usize {
    match rarity {
        Rarity::Common => 1,
        Rarity::Uncommon => 2,
        Rarity::Rare => rng.gen_range(2..=3),
        Rarity::Epic => rng.gen_range(3..=4),
        Rarity::Legendary => rng.gen_range(4..=5),
    }
}

fn stat_magnitude(rarity: Rarity, rng: &mut impl Rng) -> f64 {
    let (min, max): (f64, f64) = match rarity {
        Rarity::Common => (1.0, 3.0),
        Rarity::Uncommon => (2.0, 5.0),
        Rarity::Rare => (4.0, 8.0),
        Rarity::Epic => (6.0, 12.0),
        Rarity::Legendary => (10.0, 20.0),
    };
    // One decimal place keeps stat lines readable
    (rng.gen_range(min..=max) * 10.0).round() / 10.0
}

/// Builds a fresh item of the given rarity: a random archetype and a
/// set of distinct stat lines whose count and magnitude grow with
/// rarity.
pub fn generate_item(rarity: Rarity, rng: &mut impl Rng) -> InventoryItem {
    let archetype = *ModuleArchetype::all()
        .choose(rng)
        .unwrap_or(&ModuleArchetype::Cannon);

    let count = stat_count(rarity, rng);
    let stats = ItemStatKind::all()
        .choose_multiple(rng, count)
        .map(|&kind| ItemStat {
            kind,
            value: stat_magnitude(rarity, rng),
        })
        .collect();

    InventoryItem::new(archetype, rarity, stats)
}

/// Full loot pipeline for one opponent death: gate roll, rarity roll,
/// item construction, and hand-off to the aggregate's inventory. A
/// stored item gets a drop event carrying its identity and the death
/// position; a liquidated one only gets the aggregate's auto-sold
/// event.
pub fn handle_opponent_death(
    state: &mut GameState,
    death: &OpponentDeath,
    rng: &mut impl Rng,
    bus: &EventBus,
) -> StateResult<LootOutcome> {
    let level = state.tank.level;
    if !roll_drop(death.category, level, rng) {
        return Ok(LootOutcome::Nothing);
    }

    let rarity = roll_rarity(death.category, level, rng);
    let item = generate_item(rarity, rng);
    let item_id = item.id;
    let archetype = item.archetype;

    match state.add_to_inventory(item, bus)? {
        InventoryOutcome::AutoSold { gold } => Ok(LootOutcome::AutoSold { gold }),
        InventoryOutcome::Stored => {
            bus.publish(GameEvent::ItemDropped {
                item_id,
                rarity,
                archetype,
                position: death.position,
            });
            Ok(LootOutcome::Dropped { item_id, rarity })
        }
    }
}
