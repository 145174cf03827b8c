//! Integration test: the damage pipeline end to end, from the
//! aggregate's derived stats through hit resolution and back into the
//! aggregate via lifesteal and inbound melee.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ironclad::combat::{
    apply_opponent_melee, melee_ready, resolve_attack, resolve_hit, AreaHitTracker,
    OpponentCategory, Position,
};
use ironclad::core::{SkillStat, TankStat};
use ironclad::events::{EventBus, GoldReason, XpSource};
use ironclad::GameState;

#[test]
fn test_attack_profile_reflects_invested_stats() {
    let bus = EventBus::new();
    let mut state = GameState::new();
    while state.tank.level < 5 {
        state.add_xp(1_000, XpSource::Kill, &bus);
    }
    state.upgrade_stat(SkillStat::Damage, &bus).unwrap();
    state.upgrade_stat(SkillStat::Damage, &bus).unwrap();

    let profile = state.attack_profile(50, None);
    assert_eq!(profile.damage_bonus_percent, 10.0);
    assert_eq!(profile.attacker_level, state.tank.level);

    // floor(50 * (1 + 0.05 * (level-1)) * 1.10) without a crit
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut no_crit = profile.clone();
    no_crit.crit_chance_percent = 0.0;
    let hit = resolve_hit(&no_crit, 1, &mut rng);
    let expected =
        (50.0 * (1.0 + 0.05 * (profile.attacker_level - 1) as f64) * (1.0 + 10.0 / 100.0)).floor();
    assert_eq!(hit.damage, expected as u32);
}

#[test]
fn test_crit_rate_tracks_crit_chance() {
    let mut profile = GameState::new().attack_profile(10, None);
    profile.crit_chance_percent = 30.0;

    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let crits = (0..10_000)
        .filter(|_| resolve_hit(&profile, 0, &mut rng).crit)
        .count();
    assert!((2_700..3_300).contains(&crits), "got {crits}");
}

#[test]
fn test_area_attack_hits_each_target_once_per_tick() {
    let bus = EventBus::new();
    let mut state = GameState::new();
    let mut tracker = AreaHitTracker::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let mut profile = state.attack_profile(100, Some(5.0));
    profile.crit_chance_percent = 0.0;

    let primary = (1, Position::new(0.0, 0.0));
    let others = [
        (2, Position::new(3.0, 0.0)),
        (3, Position::new(0.0, 4.0)),
        (4, Position::new(30.0, 0.0)),
    ];

    let first = resolve_attack(
        &mut state, &profile, 7, primary, &others, &mut tracker, &mut rng, &bus,
    );
    // Primary plus the two targets inside the radius
    assert_eq!(first.len(), 3);

    // Same attack id resolved again in the same tick: all pairs claimed
    let second = resolve_attack(
        &mut state, &profile, 7, primary, &others, &mut tracker, &mut rng, &bus,
    );
    assert!(second.is_empty());

    // A new tick resets the guard
    tracker.begin_tick();
    let third = resolve_attack(
        &mut state, &profile, 7, primary, &others, &mut tracker, &mut rng, &bus,
    );
    assert_eq!(third.len(), 3);
}

#[test]
fn test_splash_damage_decreases_with_distance() {
    let bus = EventBus::new();
    let mut state = GameState::new();
    let mut tracker = AreaHitTracker::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let mut profile = state.attack_profile(100, Some(10.0));
    profile.crit_chance_percent = 0.0;

    let outcomes = resolve_attack(
        &mut state,
        &profile,
        1,
        (1, Position::new(0.0, 0.0)),
        &[
            (2, Position::new(2.0, 0.0)),
            (3, Position::new(8.0, 0.0)),
        ],
        &mut tracker,
        &mut rng,
        &bus,
    );

    let near = outcomes.iter().find(|o| o.target_id == 2).unwrap();
    let far = outcomes.iter().find(|o| o.target_id == 3).unwrap();
    assert!(near.damage > far.damage);
    assert!(near.damage < outcomes[0].damage);
}

#[test]
fn test_lifesteal_heals_through_the_aggregate() {
    let bus = EventBus::new();
    let mut state = GameState::new();
    state.take_damage(40, 1, OpponentCategory::Standard, &bus);
    let hp_before = state.vitals.current_hp;

    let mut profile = state.attack_profile(200, None);
    profile.crit_chance_percent = 0.0;
    profile.lifesteal_level = 5;

    let mut tracker = AreaHitTracker::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let outcomes = resolve_attack(
        &mut state,
        &profile,
        1,
        (9, Position::new(0.0, 0.0)),
        &[],
        &mut tracker,
        &mut rng,
        &bus,
    );

    let expected_heal = (outcomes[0].damage as f64 * 5.0 * 0.5 / 100.0).floor() as u32;
    assert!(expected_heal > 0);
    assert_eq!(state.vitals.current_hp, hp_before + expected_heal);
}

#[test]
fn test_inbound_melee_respects_defense_upgrades() {
    let bus = EventBus::new();
    let mut state = GameState::new();
    state.add_gold(10_000, GoldReason::Other, &bus);
    while state.tank.level < 10 {
        state.add_xp(1_000, XpSource::Kill, &bus);
    }
    // 4 defense upgrades: 20 defense
    for _ in 0..4 {
        state.upgrade_tank_stat(TankStat::Defense, &bus).unwrap();
    }

    assert!(melee_ready(1.0, 1.5, 2.0, 1.5));
    let dealt = apply_opponent_melee(&mut state, 60, 3, OpponentCategory::Standard, &bus);
    // floor(60 * (1 - 20/120)) = 50
    assert_eq!(dealt, 50);
    assert_eq!(state.vitals.current_hp, state.vitals.max_hp - 50);
}
