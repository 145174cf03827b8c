//! Integration test: act/zone/wave progression and the watermark.

use ironclad::core::constants::{WAVES_PER_ZONE, ZONES_PER_ACT};
use ironclad::events::EventBus;
use ironclad::{GameState, StateError};

/// Clears every wave of the current zone, then the zone itself.
fn clear_current_zone(state: &mut GameState, bus: &EventBus) {
    loop {
        if state.complete_wave(bus) {
            break;
        }
    }
    state.complete_zone(bus);
}

#[test]
fn test_full_act_walkthrough() {
    let bus = EventBus::new();
    let mut state = GameState::new();

    for _ in 0..ZONES_PER_ACT {
        clear_current_zone(&mut state, &bus);
    }

    assert_eq!(state.zones.current_act, 2);
    assert_eq!(state.zones.current_zone, 1);
    assert_eq!(state.zones.current_wave, 1);
    assert_eq!(state.zones.highest_act, 2);
    assert_eq!(state.zones.highest_zone, 1);
}

#[test]
fn test_wave_counter_within_zone() {
    let bus = EventBus::new();
    let mut state = GameState::new();

    for expected in 1..WAVES_PER_ZONE {
        assert!(!state.complete_wave(&bus));
        assert_eq!(state.zones.current_wave, expected + 1);
    }
    assert!(state.complete_wave(&bus));
}

#[test]
fn test_watermark_never_decreases_across_replay_sequences() {
    let bus = EventBus::new();
    let mut state = GameState::new();

    // Push the watermark to act 2 zone 3
    for _ in 0..(ZONES_PER_ACT + 2) {
        clear_current_zone(&mut state, &bus);
    }
    assert_eq!((state.zones.highest_act, state.zones.highest_zone), (2, 3));

    // Replay an earlier zone and clear it again
    state.set_zone(1, 4, &bus).unwrap();
    let watermark_before = (state.zones.highest_act, state.zones.highest_zone);
    clear_current_zone(&mut state, &bus);
    clear_current_zone(&mut state, &bus);

    assert_eq!(
        (state.zones.highest_act, state.zones.highest_zone),
        watermark_before
    );
    assert_eq!(state.zones.current_zone, 6);
    assert!(state.invariants_hold());
}

#[test]
fn test_zone_selection_is_gated_by_watermark() {
    let bus = EventBus::new();
    let mut state = GameState::new();
    state.zones.highest_act = 2;
    state.zones.highest_zone = 4;

    // Anything at or before the watermark is selectable
    assert!(state.set_zone(1, 1, &bus).is_ok());
    assert!(state.set_zone(1, 9, &bus).is_ok());
    assert!(state.set_zone(2, 4, &bus).is_ok());

    // Beyond the watermark is not
    assert!(matches!(
        state.set_zone(2, 5, &bus),
        Err(StateError::Validation(_))
    ));
    assert!(matches!(
        state.set_zone(5, 1, &bus),
        Err(StateError::Validation(_))
    ));
}

#[test]
fn test_boss_record_feeds_slot_prerequisite() {
    let bus = EventBus::new();
    let mut state = GameState::new();
    state.economy.gold = 200_000;
    state.unlock_slot(2, &bus).unwrap();
    state.unlock_slot(3, &bus).unwrap();

    // The final slot needs the boss before gold matters
    assert!(matches!(
        state.unlock_slot(4, &bus),
        Err(StateError::Validation(_))
    ));

    state.record_boss_defeated("iron_warden", false, &bus);
    state.unlock_slot(4, &bus).unwrap();
    assert!(state.slots.iter().all(|s| s.unlocked));
}
