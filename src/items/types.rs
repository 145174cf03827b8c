use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::constants::{
    SELL_VALUE_COMMON, SELL_VALUE_EPIC, SELL_VALUE_LEGENDARY, SELL_VALUE_RARE, SELL_VALUE_UNCOMMON,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
}

impl Rarity {
    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Fixed gold value credited when an item of this tier is sold.
    pub fn sell_value(&self) -> u64 {
        match self {
            Rarity::Common => SELL_VALUE_COMMON,
            Rarity::Uncommon => SELL_VALUE_UNCOMMON,
            Rarity::Rare => SELL_VALUE_RARE,
            Rarity::Epic => SELL_VALUE_EPIC,
            Rarity::Legendary => SELL_VALUE_LEGENDARY,
        }
    }

    pub fn all() -> [Rarity; 5] {
        [
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
        ]
    }
}

/// Module archetypes that can currently drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleArchetype {
    Cannon,
    ShieldGenerator,
    Engine,
    Radar,
    Plating,
}

impl ModuleArchetype {
    pub fn name(&self) -> &'static str {
        match self {
            ModuleArchetype::Cannon => "Cannon",
            ModuleArchetype::ShieldGenerator => "Shield Generator",
            ModuleArchetype::Engine => "Engine",
            ModuleArchetype::Radar => "Radar",
            ModuleArchetype::Plating => "Plating",
        }
    }

    pub fn all() -> [ModuleArchetype; 5] {
        [
            ModuleArchetype::Cannon,
            ModuleArchetype::ShieldGenerator,
            ModuleArchetype::Engine,
            ModuleArchetype::Radar,
            ModuleArchetype::Plating,
        ]
    }
}

/// Stat kinds an item can roll. These feed the attack pipeline and
/// progression bonuses; vitals (HP, defense, regen) are upgraded with
/// gold instead and never come from items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatKind {
    DamagePercent,
    CritChance,
    CritDamage,
    AttackSpeed,
    XpGain,
    GoldGain,
    LifeSteal,
}

impl ItemStatKind {
    pub fn all() -> [ItemStatKind; 7] {
        [
            ItemStatKind::DamagePercent,
            ItemStatKind::CritChance,
            ItemStatKind::CritDamage,
            ItemStatKind::AttackSpeed,
            ItemStatKind::XpGain,
            ItemStatKind::GoldGain,
            ItemStatKind::LifeSteal,
        ]
    }
}

/// A single rolled stat line on an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStat {
    pub kind: ItemStatKind,
    pub value: f64,
}

/// An equippable module. Lives either in the inventory collection or
/// equipped in exactly one slot, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: Uuid,
    pub archetype: ModuleArchetype,
    pub rarity: Rarity,
    pub stats: Vec<ItemStat>,
}

impl InventoryItem {
    pub fn new(archetype: ModuleArchetype, rarity: Rarity, stats: Vec<ItemStat>) -> Self {
        Self {
            id: Uuid::new_v4(),
            archetype,
            rarity,
            stats,
        }
    }

    /// Sum of all rolled values for a given stat kind.
    pub fn stat_total(&self, kind: ItemStatKind) -> f64 {
        self.stats
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.value)
            .sum()
    }
}
