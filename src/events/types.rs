//! Event catalogue: one variant per aggregate mutation, with a fixed
//! payload shape, plus the discriminant [`EventKind`] used for handler
//! registration.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::combat::types::{OpponentCategory, Position};
use crate::core::{EssenceKind, SkillStat, SlotStat, TankStat};
use crate::items::{ModuleArchetype, Rarity};

/// Where a batch of XP came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum XpSource {
    Kill,
    WaveClear,
    ZoneClear,
    Other,
}

/// Where a heal came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealSource {
    Regen,
    LifeSteal,
    Consumable,
    Other,
}

/// Why a gold balance changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoldReason {
    Combat,
    Sale,
    Purchase,
    Prestige,
    Other,
}

/// Every event the core publishes. Payload shapes are fixed per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    // ── Tank ────────────────────────────────────────────────────
    XpGained {
        amount: u64,
        total_xp: u64,
        source: XpSource,
    },
    LeveledUp {
        level: u32,
        unspent_points: u32,
    },
    SkillStatUpgraded {
        stat: SkillStat,
        level: u32,
    },
    TankStatUpgraded {
        stat: TankStat,
        level: u32,
        cost: u64,
    },

    // ── Combat ──────────────────────────────────────────────────
    DamageTaken {
        raw: u32,
        mitigated: u32,
        hp: u32,
        source_id: u64,
        source_category: OpponentCategory,
    },
    NearDeath {
        hp: u32,
        max_hp: u32,
    },
    Healed {
        amount: u32,
        hp: u32,
        source: HealSource,
    },
    Revived {
        hp: u32,
    },

    // ── Economy ─────────────────────────────────────────────────
    GoldChanged {
        old: u64,
        new: u64,
        delta: i64,
        reason: GoldReason,
    },
    EssenceChanged {
        kind: EssenceKind,
        old: u64,
        new: u64,
    },
    CoresChanged {
        old: u64,
        new: u64,
    },

    // ── Modules ─────────────────────────────────────────────────
    SlotUnlocked {
        index: usize,
        cost: u64,
    },
    SlotStatUpgraded {
        index: usize,
        stat: SlotStat,
        level: u32,
        cost: u64,
    },
    ModuleEquipped {
        index: usize,
        item_id: Uuid,
        displaced: Option<Uuid>,
    },
    ModuleUnequipped {
        index: usize,
        item_id: Uuid,
    },
    ItemStored {
        item_id: Uuid,
        rarity: Rarity,
    },
    ItemAutoSold {
        item_id: Uuid,
        rarity: Rarity,
        gold: u64,
    },
    ItemSold {
        item_id: Uuid,
        rarity: Rarity,
        gold: u64,
    },
    ItemDropped {
        item_id: Uuid,
        rarity: Rarity,
        archetype: ModuleArchetype,
        position: Position,
    },

    // ── Progression ─────────────────────────────────────────────
    WaveCompleted {
        act: u32,
        zone: u32,
        wave: u32,
    },
    ZoneCompleted {
        act: u32,
        zone: u32,
    },
    ZoneChanged {
        act: u32,
        zone: u32,
    },
    BossDefeated {
        boss_id: String,
        uber: bool,
    },
    Prestiged {
        times_prestiged: u32,
        points_awarded: u64,
    },

    // ── Save ────────────────────────────────────────────────────
    GameSaved {
        timestamp: i64,
    },
    GameLoaded {
        version: u32,
    },
    GameReset,
}

/// Discriminant for handler registration, one per [`GameEvent`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    XpGained,
    LeveledUp,
    SkillStatUpgraded,
    TankStatUpgraded,
    DamageTaken,
    NearDeath,
    Healed,
    Revived,
    GoldChanged,
    EssenceChanged,
    CoresChanged,
    SlotUnlocked,
    SlotStatUpgraded,
    ModuleEquipped,
    ModuleUnequipped,
    ItemStored,
    ItemAutoSold,
    ItemSold,
    ItemDropped,
    WaveCompleted,
    ZoneCompleted,
    ZoneChanged,
    BossDefeated,
    Prestiged,
    GameSaved,
    GameLoaded,
    GameReset,
}

/// Domain grouping for the catalogue, mostly useful for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventDomain {
    Tank,
    Combat,
    Economy,
    Module,
    Progression,
    Save,
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::XpGained { .. } => EventKind::XpGained,
            GameEvent::LeveledUp { .. } => EventKind::LeveledUp,
            GameEvent::SkillStatUpgraded { .. } => EventKind::SkillStatUpgraded,
            GameEvent::TankStatUpgraded { .. } => EventKind::TankStatUpgraded,
            GameEvent::DamageTaken { .. } => EventKind::DamageTaken,
            GameEvent::NearDeath { .. } => EventKind::NearDeath,
            GameEvent::Healed { .. } => EventKind::Healed,
            GameEvent::Revived { .. } => EventKind::Revived,
            GameEvent::GoldChanged { .. } => EventKind::GoldChanged,
            GameEvent::EssenceChanged { .. } => EventKind::EssenceChanged,
            GameEvent::CoresChanged { .. } => EventKind::CoresChanged,
            GameEvent::SlotUnlocked { .. } => EventKind::SlotUnlocked,
            GameEvent::SlotStatUpgraded { .. } => EventKind::SlotStatUpgraded,
            GameEvent::ModuleEquipped { .. } => EventKind::ModuleEquipped,
            GameEvent::ModuleUnequipped { .. } => EventKind::ModuleUnequipped,
            GameEvent::ItemStored { .. } => EventKind::ItemStored,
            GameEvent::ItemAutoSold { .. } => EventKind::ItemAutoSold,
            GameEvent::ItemSold { .. } => EventKind::ItemSold,
            GameEvent::ItemDropped { .. } => EventKind::ItemDropped,
            GameEvent::WaveCompleted { .. } => EventKind::WaveCompleted,
            GameEvent::ZoneCompleted { .. } => EventKind::ZoneCompleted,
            GameEvent::ZoneChanged { .. } => EventKind::ZoneChanged,
            GameEvent::BossDefeated { .. } => EventKind::BossDefeated,
            GameEvent::Prestiged { .. } => EventKind::Prestiged,
            GameEvent::GameSaved { .. } => EventKind::GameSaved,
            GameEvent::GameLoaded { .. } => EventKind::GameLoaded,
            GameEvent::GameReset => EventKind::GameReset,
        }
    }
}

impl EventKind {
    pub fn domain(&self) -> EventDomain {
        use EventKind::*;
        match self {
            XpGained | LeveledUp | SkillStatUpgraded | TankStatUpgraded => EventDomain::Tank,
            DamageTaken | NearDeath | Healed | Revived => EventDomain::Combat,
            GoldChanged | EssenceChanged | CoresChanged => EventDomain::Economy,
            SlotUnlocked | SlotStatUpgraded | ModuleEquipped | ModuleUnequipped | ItemStored
            | ItemAutoSold | ItemSold | ItemDropped => EventDomain::Module,
            WaveCompleted | ZoneCompleted | ZoneChanged | BossDefeated | Prestiged => {
                EventDomain::Progression
            }
            GameSaved | GameLoaded | GameReset => EventDomain::Save,
        }
    }
}

/// Semantic payload checks, run by the bus in debug builds only.
/// A failure is a diagnostic, never a delivery error.
pub fn validate_event(event: &GameEvent) -> Result<(), String> {
    match event {
        GameEvent::GoldChanged {
            old, new, delta, ..
        } => {
            let expect = *new as i64 - *old as i64;
            if expect != *delta {
                return Err(format!(
                    "GoldChanged delta {} does not match old {} -> new {}",
                    delta, old, new
                ));
            }
        }
        GameEvent::DamageTaken { raw, mitigated, .. } => {
            if mitigated > raw {
                return Err(format!("DamageTaken mitigated {} > raw {}", mitigated, raw));
            }
        }
        GameEvent::NearDeath { hp, max_hp } => {
            if hp > max_hp {
                return Err(format!("NearDeath hp {} > max_hp {}", hp, max_hp));
            }
        }
        GameEvent::WaveCompleted { act, zone, wave } => {
            if *act == 0 || *zone == 0 || *wave == 0 {
                return Err("WaveCompleted coordinates are 1-based".to_string());
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip_for_sample_variants() {
        let ev = GameEvent::Revived { hp: 50 };
        assert_eq!(ev.kind(), EventKind::Revived);
        assert_eq!(ev.kind().domain(), EventDomain::Combat);

        let ev = GameEvent::GameReset;
        assert_eq!(ev.kind(), EventKind::GameReset);
        assert_eq!(ev.kind().domain(), EventDomain::Save);
    }

    #[test]
    fn test_validate_gold_changed() {
        let ok = GameEvent::GoldChanged {
            old: 100,
            new: 40,
            delta: -60,
            reason: GoldReason::Purchase,
        };
        assert!(validate_event(&ok).is_ok());

        let bad = GameEvent::GoldChanged {
            old: 100,
            new: 40,
            delta: 60,
            reason: GoldReason::Purchase,
        };
        assert!(validate_event(&bad).is_err());
    }

    #[test]
    fn test_validate_damage_taken() {
        let bad = GameEvent::DamageTaken {
            raw: 10,
            mitigated: 20,
            hp: 1,
            source_id: 7,
            source_category: OpponentCategory::Standard,
        };
        assert!(validate_event(&bad).is_err());
    }
}
