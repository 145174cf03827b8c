//! Integration test: versioned persistence.
//!
//! Round-trips a state built through the public mutation API, checks
//! the v1 per-slot migration, and verifies the envelope rejects
//! tampering.

use std::fs;

use ironclad::core::{SaveData, SellPolicy, SkillStat, SlotStat, TankStat};
use ironclad::events::{EventBus, GoldReason, XpSource};
use ironclad::items::Rarity;
use ironclad::loot::generate_item;
use ironclad::{GameState, SaveManager, StateError};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Builds a mid-game state entirely through public mutations.
fn mid_game_state(bus: &EventBus) -> GameState {
    let mut state = GameState::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    state.add_xp(2_000, XpSource::Kill, bus);
    state.add_gold(20_000, GoldReason::Other, bus);
    state.upgrade_stat(SkillStat::Damage, bus).unwrap();
    state.upgrade_stat(SkillStat::CritChance, bus).unwrap();
    state.upgrade_tank_stat(TankStat::MaxHp, bus).unwrap();
    state.unlock_slot(2, bus).unwrap();
    state.upgrade_slot_stat(2, SlotStat::Damage, bus).unwrap();

    let item = generate_item(Rarity::Epic, &mut rng);
    let item_id = item.id;
    state.add_to_inventory(item, bus).unwrap();
    state.equip_module(0, item_id, bus).unwrap();
    state
        .add_to_inventory(generate_item(Rarity::Rare, &mut rng), bus)
        .unwrap();

    state.complete_zone(bus);
    state.record_boss_defeated("rust_colossus", false, bus);
    state.set_sell_policy(SellPolicy {
        liquidate_up_to: Some(Rarity::Common),
        confirm_sales: true,
    });
    state
}

#[test]
fn test_reachable_state_round_trips() {
    let bus = EventBus::new();
    let state = mid_game_state(&bus);

    let json = state.to_save_data(1_725_000_000).to_json().unwrap();
    let restored = GameState::from_save_data(SaveData::from_json(&json).unwrap().0).unwrap();

    assert_eq!(restored, state);
    assert!(restored.invariants_hold());
}

#[test]
fn test_save_file_round_trips_on_disk() {
    let dir = std::env::temp_dir().join(format!("ironclad-test-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    let manager = SaveManager::new_for_test(dir.join("save.dat"));
    let bus = EventBus::new();
    let state = mid_game_state(&bus);

    assert!(!manager.save_exists());
    manager.save(&state, &bus).unwrap();
    assert!(manager.save_exists());
    assert_eq!(manager.load(&bus).unwrap(), state);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_truncated_file_is_rejected() {
    let dir = std::env::temp_dir().join(format!("ironclad-test-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("save.dat");
    let manager = SaveManager::new_for_test(path.clone());
    let bus = EventBus::new();

    manager.save(&mid_game_state(&bus), &bus).unwrap();
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 10]).unwrap();

    assert!(matches!(
        manager.load(&bus),
        Err(StateError::Serialization(_))
    ));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_wrong_magic_is_rejected() {
    let dir = std::env::temp_dir().join(format!("ironclad-test-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("save.dat");
    let manager = SaveManager::new_for_test(path.clone());
    let bus = EventBus::new();

    manager.save(&mid_game_state(&bus), &bus).unwrap();
    let mut bytes = fs::read(&path).unwrap();
    bytes[0] ^= 0xFF;
    fs::write(&path, bytes).unwrap();

    assert!(matches!(
        manager.load(&bus),
        Err(StateError::Serialization(_))
    ));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_v1_payload_upgrades_to_current_schema() {
    let json = r#"{
        "version": 1,
        "timestamp": 1700000000,
        "tank": {"level": 8, "xp": 42, "skill_levels": [3,1,0,0,0,2], "upgrade_levels": [1,1,0], "current_hp": 90},
        "modules": {
            "slots": [
                {"unlocked": true, "level": 2, "equipped": null},
                {"unlocked": true, "level": 0, "equipped": null},
                {"unlocked": true, "level": 1, "equipped": null},
                {"unlocked": false, "level": 0, "equipped": null},
                {"unlocked": false, "level": 0, "equipped": null}
            ],
            "inventory": []
        },
        "progression": {"current_act": 1, "current_zone": 6, "current_wave": 2, "highest_act": 1, "highest_zone": 6, "bosses_defeated": ["rust_colossus"], "ubers_defeated": []},
        "economy": {"gold": 1234, "essences": [5,0,0,1], "infernal_cores": 2},
        "paragon": {"times_prestiged": 1, "points": 6}
    }"#;

    let state = GameState::from_save_data(SaveData::from_json(json).unwrap().0).unwrap();

    // Flat slot levels land on the damage stat
    assert_eq!(state.slots[0].stat_level(SlotStat::Damage), 2);
    assert_eq!(state.slots[0].stat_level(SlotStat::CritChance), 0);
    assert_eq!(state.slots[2].stat_level(SlotStat::Damage), 1);
    assert_eq!(state.tank.level, 8);
    assert_eq!(state.paragon.points, 6);
    assert!(state.zones.bosses_defeated.contains("rust_colossus"));
    assert!(state.invariants_hold());
}

#[test]
fn test_load_forces_starter_slots_unlocked() {
    let bus = EventBus::new();
    let mut data = mid_game_state(&bus).to_save_data(0);
    // A hand-edited blob may claim the starter slots are locked
    data.modules.slots[0].unlocked = false;
    data.modules.slots[1].unlocked = false;

    let state = GameState::from_save_data(data).unwrap();
    assert!(state.slots[0].unlocked);
    assert!(state.slots[1].unlocked);
}

#[test]
fn test_reset_publishes_and_clears() {
    let bus = EventBus::new();
    let mut state = mid_game_state(&bus);

    state.reset(&bus);
    assert_eq!(state, GameState::new());
    assert!(state.invariants_hold());
}
