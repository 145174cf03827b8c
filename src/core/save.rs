//! Versioned save records and the checksummed on-disk envelope.
//!
//! The payload is JSON; the envelope wraps it in a magic number, a
//! length prefix, and a SHA-256 checksum so a truncated or edited file
//! is rejected before deserialization is attempted.
//!
//! File format:
//! - Version magic (8 bytes, little endian)
//! - Data length (4 bytes, little endian)
//! - JSON payload (variable length)
//! - SHA-256 checksum over the three fields above (32 bytes)

use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use chrono::Utc;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::constants::{MODULE_SLOT_COUNT, SAVE_VERSION, SAVE_VERSION_MAGIC};
use super::errors::{StateError, StateResult};
use super::game_state::{GameState, Paragon, SellPolicy};
use crate::events::{EventBus, GameEvent};
use crate::items::InventoryItem;

/// Current (v2) save record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub timestamp: i64,
    pub tank: TankRecord,
    pub modules: ModulesRecord,
    pub progression: ProgressionRecord,
    pub economy: EconomyRecord,
    pub paragon: Paragon,
    #[serde(default)]
    pub sell_policy: SellPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankRecord {
    pub level: u32,
    pub xp: u64,
    pub skill_levels: [u32; 6],
    pub upgrade_levels: [u32; 3],
    pub current_hp: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModulesRecord {
    pub slots: Vec<SlotRecord>,
    pub inventory: Vec<InventoryItem>,
}

/// v2 slot shape: one level per slot stat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotRecord {
    pub unlocked: bool,
    pub stat_levels: [u32; 3],
    pub equipped: Option<InventoryItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionRecord {
    pub current_act: u32,
    pub current_zone: u32,
    pub current_wave: u32,
    pub highest_act: u32,
    pub highest_zone: u32,
    pub bosses_defeated: Vec<String>,
    pub ubers_defeated: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomyRecord {
    pub gold: u64,
    pub essences: [u64; 4],
    pub infernal_cores: u64,
}

/// v1 save record. Identical to v2 except for the per-slot shape.
#[derive(Debug, Clone, Deserialize)]
struct SaveDataV1 {
    version: u32,
    timestamp: i64,
    tank: TankRecord,
    modules: ModulesRecordV1,
    progression: ProgressionRecord,
    economy: EconomyRecord,
    paragon: Paragon,
    #[serde(default)]
    sell_policy: SellPolicy,
}

#[derive(Debug, Clone, Deserialize)]
struct ModulesRecordV1 {
    slots: Vec<SlotRecordV1>,
    inventory: Vec<InventoryItem>,
}

/// v1 slots carried a single flat level instead of per-stat levels.
#[derive(Debug, Clone, Deserialize)]
struct SlotRecordV1 {
    unlocked: bool,
    level: u32,
    equipped: Option<InventoryItem>,
}

impl SaveData {
    /// Parses a JSON payload, upgrading the immediately prior schema
    /// when the current one does not match. Also returns the version
    /// the payload was written with.
    pub fn from_json(json: &str) -> StateResult<(Self, u32)> {
        match serde_json::from_str::<SaveData>(json) {
            Ok(data) if data.version == SAVE_VERSION => Ok((data, SAVE_VERSION)),
            _ => {
                let v1: SaveDataV1 = serde_json::from_str(json)
                    .map_err(|e| StateError::Serialization(format!("unreadable save: {e}")))?;
                let version = v1.version;
                tracing::info!("migrating v{version} save to v{SAVE_VERSION}");
                Ok((migrate_v1_to_v2(v1), version))
            }
        }
    }

    pub fn to_json(&self) -> StateResult<String> {
        serde_json::to_string(self).map_err(|e| StateError::Serialization(e.to_string()))
    }
}

/// A v1 slot's flat level becomes its damage stat level; the other two
/// slot stats start at zero.
fn migrate_v1_to_v2(v1: SaveDataV1) -> SaveData {
    let slots = v1
        .modules
        .slots
        .into_iter()
        .map(|s| SlotRecord {
            unlocked: s.unlocked,
            stat_levels: [s.level, 0, 0],
            equipped: s.equipped,
        })
        .collect();

    SaveData {
        version: SAVE_VERSION,
        timestamp: v1.timestamp,
        tank: v1.tank,
        modules: ModulesRecord {
            slots,
            inventory: v1.modules.inventory,
        },
        progression: v1.progression,
        economy: v1.economy,
        paragon: v1.paragon,
        sell_policy: v1.sell_policy,
    }
}

impl GameState {
    pub fn to_save_data(&self, timestamp: i64) -> SaveData {
        SaveData {
            version: SAVE_VERSION,
            timestamp,
            tank: TankRecord {
                level: self.tank.level,
                xp: self.tank.xp,
                skill_levels: self.tank.skill_levels(),
                upgrade_levels: self.vitals.upgrade_levels(),
                current_hp: self.vitals.current_hp,
            },
            modules: ModulesRecord {
                slots: self
                    .slots
                    .iter()
                    .map(|s| SlotRecord {
                        unlocked: s.unlocked,
                        stat_levels: s.stat_levels(),
                        equipped: s.equipped.clone(),
                    })
                    .collect(),
                inventory: self.inventory.clone(),
            },
            progression: ProgressionRecord {
                current_act: self.zones.current_act,
                current_zone: self.zones.current_zone,
                current_wave: self.zones.current_wave,
                highest_act: self.zones.highest_act,
                highest_zone: self.zones.highest_zone,
                bosses_defeated: self.zones.bosses_defeated.iter().cloned().collect(),
                ubers_defeated: self.zones.ubers_defeated.iter().cloned().collect(),
            },
            economy: EconomyRecord {
                gold: self.economy.gold,
                essences: self.economy.essences(),
                infernal_cores: self.economy.infernal_cores,
            },
            paragon: self.paragon.clone(),
            sell_policy: self.sell_policy,
        }
    }

    /// Rebuilds a state from a save record. Derived vitals are
    /// recomputed rather than trusted, and the structural invariants
    /// are re-asserted before the record is accepted.
    pub fn from_save_data(data: SaveData) -> StateResult<Self> {
        if data.modules.slots.len() != MODULE_SLOT_COUNT {
            return Err(StateError::Serialization(format!(
                "expected {MODULE_SLOT_COUNT} slots, found {}",
                data.modules.slots.len()
            )));
        }

        let mut state = GameState::new();
        state.tank.level = data.tank.level.max(1);
        state.tank.xp = data.tank.xp;
        state.tank.set_skill_levels(data.tank.skill_levels);
        state.vitals.current_hp = data.tank.current_hp;
        state.vitals.set_upgrade_levels(data.tank.upgrade_levels);

        for (slot, record) in state.slots.iter_mut().zip(data.modules.slots) {
            slot.unlocked = slot.unlocked || record.unlocked;
            slot.set_stat_levels(record.stat_levels);
            slot.equipped = record.equipped;
        }
        state.inventory = data.modules.inventory;

        state.zones.current_act = data.progression.current_act.max(1);
        state.zones.current_zone = data.progression.current_zone.max(1);
        state.zones.current_wave = data.progression.current_wave.max(1);
        state.zones.highest_act = data.progression.highest_act.max(1);
        state.zones.highest_zone = data.progression.highest_zone.max(1);
        // The watermark may never trail the current position. Repair
        // lexicographically so an older blob loads without inventing
        // unlocks in acts the tank never reached.
        if (state.zones.highest_act, state.zones.highest_zone)
            < (state.zones.current_act, state.zones.current_zone)
        {
            state.zones.highest_act = state.zones.current_act;
            state.zones.highest_zone = state.zones.current_zone;
        }
        state.zones.bosses_defeated = data.progression.bosses_defeated.into_iter().collect();
        state.zones.ubers_defeated = data.progression.ubers_defeated.into_iter().collect();

        state.economy.gold = data.economy.gold;
        state.economy.set_essences(data.economy.essences);
        state.economy.infernal_cores = data.economy.infernal_cores;
        state.paragon = data.paragon;
        state.sell_policy = data.sell_policy;

        if !state.invariants_hold() {
            return Err(StateError::Serialization(
                "save record violates state invariants".to_string(),
            ));
        }
        Ok(state)
    }

    /// Discards everything and starts a new game.
    pub fn reset(&mut self, bus: &EventBus) {
        *self = GameState::new();
        bus.publish(GameEvent::GameReset);
    }
}

/// Reads and writes the save file.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Sets up the save directory at the platform location given by the
    /// `directories` crate.
    pub fn new() -> StateResult<Self> {
        let project_dirs = ProjectDirs::from("", "", "ironclad").ok_or_else(|| {
            StateError::Serialization("could not determine config directory".to_string())
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)
            .map_err(|e| StateError::Serialization(e.to_string()))?;

        Ok(Self {
            save_path: config_dir.join("save.dat"),
        })
    }

    /// A manager writing to an explicit path, for tests.
    pub fn new_for_test(save_path: PathBuf) -> Self {
        Self { save_path }
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    /// Writes the state inside the checksummed envelope and publishes
    /// the saved event with the embedded timestamp.
    pub fn save(&self, state: &GameState, bus: &EventBus) -> StateResult<()> {
        let timestamp = Utc::now().timestamp();
        let data = state.to_save_data(timestamp).to_json()?.into_bytes();
        let data_len = data.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let write = || -> std::io::Result<()> {
            let mut file = fs::File::create(&self.save_path)?;
            file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
            file.write_all(&data_len.to_le_bytes())?;
            file.write_all(&data)?;
            file.write_all(&checksum)?;
            Ok(())
        };
        write().map_err(|e| StateError::Serialization(e.to_string()))?;

        bus.publish(GameEvent::GameSaved { timestamp });
        Ok(())
    }

    /// Loads and verifies the save file, then publishes the loaded
    /// event with the payload's schema version.
    pub fn load(&self, bus: &EventBus) -> StateResult<GameState> {
        let mut magic_bytes = [0u8; 8];
        let mut length_bytes = [0u8; 4];
        let mut stored_checksum = [0u8; 32];

        let mut read = || -> std::io::Result<Vec<u8>> {
            let mut file = fs::File::open(&self.save_path)?;
            file.read_exact(&mut magic_bytes)?;
            file.read_exact(&mut length_bytes)?;
            let mut data = vec![0u8; u32::from_le_bytes(length_bytes) as usize];
            file.read_exact(&mut data)?;
            file.read_exact(&mut stored_checksum)?;
            Ok(data)
        };
        let data = read().map_err(|e| StateError::Serialization(e.to_string()))?;

        let magic = u64::from_le_bytes(magic_bytes);
        if magic != SAVE_VERSION_MAGIC {
            return Err(StateError::Serialization(format!(
                "invalid save magic: expected 0x{SAVE_VERSION_MAGIC:016X}, got 0x{magic:016X}"
            )));
        }

        let mut hasher = Sha256::new();
        hasher.update(magic_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        if hasher.finalize().as_slice() != stored_checksum {
            return Err(StateError::Serialization(
                "checksum verification failed".to_string(),
            ));
        }

        let json = String::from_utf8(data)
            .map_err(|e| StateError::Serialization(e.to_string()))?;
        let (save, payload_version) = SaveData::from_json(&json)?;
        let state = GameState::from_save_data(save)?;

        bus.publish(GameEvent::GameLoaded {
            version: payload_version,
        });
        Ok(state)
    }
}
