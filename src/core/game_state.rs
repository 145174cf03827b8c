//! The game state aggregate: single source of truth for tank
//! progression, vitals, economy, modules, zone progression, and
//! meta-progression. All mutation goes through methods on [`GameState`]
//! (spread across the `core` modules by domain); every successful
//! mutation publishes exactly one characteristic event.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::constants::{
    BASE_MAX_HP, BASE_REGEN_PER_SECOND, DEFENSE_PER_UPGRADE, MAX_HP_PER_UPGRADE,
    MODULE_SLOT_COUNT, NEAR_DEATH_ATTACK_RATE_MULTIPLIER, NEAR_DEATH_THRESHOLD, REGEN_PER_UPGRADE,
    STARTER_SLOT_COUNT,
};
use crate::items::InventoryItem;

/// Stats invested with skill points, one earned per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillStat {
    Damage,
    CritChance,
    CritDamage,
    AttackSpeed,
    LifeSteal,
    XpBonus,
}

impl SkillStat {
    pub fn all() -> [SkillStat; 6] {
        [
            SkillStat::Damage,
            SkillStat::CritChance,
            SkillStat::CritDamage,
            SkillStat::AttackSpeed,
            SkillStat::LifeSteal,
            SkillStat::XpBonus,
        ]
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            SkillStat::Damage => 0,
            SkillStat::CritChance => 1,
            SkillStat::CritDamage => 2,
            SkillStat::AttackSpeed => 3,
            SkillStat::LifeSteal => 4,
            SkillStat::XpBonus => 5,
        }
    }
}

/// Gold-upgraded vital stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TankStat {
    MaxHp,
    Defense,
    Regen,
}

impl TankStat {
    pub fn all() -> [TankStat; 3] {
        [TankStat::MaxHp, TankStat::Defense, TankStat::Regen]
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            TankStat::MaxHp => 0,
            TankStat::Defense => 1,
            TankStat::Regen => 2,
        }
    }
}

/// Gold-upgraded per-slot stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStat {
    Damage,
    AttackSpeed,
    CritChance,
}

impl SlotStat {
    pub fn all() -> [SlotStat; 3] {
        [SlotStat::Damage, SlotStat::AttackSpeed, SlotStat::CritChance]
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            SlotStat::Damage => 0,
            SlotStat::AttackSpeed => 1,
            SlotStat::CritChance => 2,
        }
    }
}

/// Named essence currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EssenceKind {
    Ember,
    Frost,
    Storm,
    Void,
}

impl EssenceKind {
    pub fn all() -> [EssenceKind; 4] {
        [
            EssenceKind::Ember,
            EssenceKind::Frost,
            EssenceKind::Storm,
            EssenceKind::Void,
        ]
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            EssenceKind::Ember => 0,
            EssenceKind::Frost => 1,
            EssenceKind::Storm => 2,
            EssenceKind::Void => 3,
        }
    }
}

/// Level, XP, and skill point investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankProgression {
    pub level: u32,
    pub xp: u64,
    skill_levels: [u32; 6],
}

impl TankProgression {
    pub fn new() -> Self {
        Self {
            level: 1,
            xp: 0,
            skill_levels: [0; 6],
        }
    }

    pub fn skill_level(&self, stat: SkillStat) -> u32 {
        self.skill_levels[stat.index()]
    }

    pub(crate) fn raise_skill(&mut self, stat: SkillStat) -> u32 {
        self.skill_levels[stat.index()] += 1;
        self.skill_levels[stat.index()]
    }

    pub(crate) fn set_skill_levels(&mut self, levels: [u32; 6]) {
        self.skill_levels = levels;
    }

    pub(crate) fn skill_levels(&self) -> [u32; 6] {
        self.skill_levels
    }

    pub fn spent_skill_points(&self) -> u32 {
        self.skill_levels.iter().sum()
    }
}

impl Default for TankProgression {
    fn default() -> Self {
        Self::new()
    }
}

/// HP, defense, and regen, with their gold-upgrade levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankVitals {
    pub max_hp: u32,
    pub current_hp: u32,
    pub defense: u32,
    pub regen_per_second: u32,
    upgrade_levels: [u32; 3],
}

impl TankVitals {
    pub fn new() -> Self {
        Self {
            max_hp: BASE_MAX_HP,
            current_hp: BASE_MAX_HP,
            defense: 0,
            regen_per_second: BASE_REGEN_PER_SECOND,
            upgrade_levels: [0; 3],
        }
    }

    pub fn upgrade_level(&self, stat: TankStat) -> u32 {
        self.upgrade_levels[stat.index()]
    }

    pub(crate) fn raise_upgrade(&mut self, stat: TankStat) -> u32 {
        self.upgrade_levels[stat.index()] += 1;
        self.recompute_derived();
        self.upgrade_levels[stat.index()]
    }

    pub(crate) fn set_upgrade_levels(&mut self, levels: [u32; 3]) {
        self.upgrade_levels = levels;
        self.recompute_derived();
    }

    pub(crate) fn upgrade_levels(&self) -> [u32; 3] {
        self.upgrade_levels
    }

    /// Recomputes max HP, defense, and regen from the upgrade levels.
    /// Current HP is clamped into `[1, max_hp]` afterwards.
    pub(crate) fn recompute_derived(&mut self) {
        self.max_hp = BASE_MAX_HP + self.upgrade_levels[TankStat::MaxHp.index()] * MAX_HP_PER_UPGRADE;
        self.defense = self.upgrade_levels[TankStat::Defense.index()] * DEFENSE_PER_UPGRADE;
        self.regen_per_second =
            BASE_REGEN_PER_SECOND + self.upgrade_levels[TankStat::Regen.index()] * REGEN_PER_UPGRADE;
        self.current_hp = self.current_hp.clamp(1, self.max_hp);
    }

    pub fn hp_fraction(&self) -> f64 {
        self.current_hp as f64 / self.max_hp as f64
    }
}

impl Default for TankVitals {
    fn default() -> Self {
        Self::new()
    }
}

/// Gold, essence counters, and the premium currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Economy {
    pub gold: u64,
    essences: [u64; 4],
    pub infernal_cores: u64,
}

impl Economy {
    pub fn essence(&self, kind: EssenceKind) -> u64 {
        self.essences[kind.index()]
    }

    pub(crate) fn set_essence(&mut self, kind: EssenceKind, amount: u64) {
        self.essences[kind.index()] = amount;
    }

    pub(crate) fn essences(&self) -> [u64; 4] {
        self.essences
    }

    pub(crate) fn set_essences(&mut self, essences: [u64; 4]) {
        self.essences = essences;
    }
}

/// One of five equipment sockets. Unlocked-ness is monotonic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSlot {
    pub index: usize,
    pub unlocked: bool,
    stat_levels: [u32; 3],
    pub equipped: Option<InventoryItem>,
}

impl ModuleSlot {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            unlocked: index < STARTER_SLOT_COUNT,
            stat_levels: [0; 3],
            equipped: None,
        }
    }

    pub fn stat_level(&self, stat: SlotStat) -> u32 {
        self.stat_levels[stat.index()]
    }

    pub(crate) fn raise_stat(&mut self, stat: SlotStat) -> u32 {
        self.stat_levels[stat.index()] += 1;
        self.stat_levels[stat.index()]
    }

    pub(crate) fn set_stat_levels(&mut self, levels: [u32; 3]) {
        self.stat_levels = levels;
    }

    pub(crate) fn stat_levels(&self) -> [u32; 3] {
        self.stat_levels
    }
}

/// Current position in the act/zone/wave ladder plus the watermark of
/// the furthest point ever reached. The watermark only moves forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneProgress {
    pub current_act: u32,
    pub current_zone: u32,
    pub current_wave: u32,
    pub highest_act: u32,
    pub highest_zone: u32,
    pub bosses_defeated: BTreeSet<String>,
    pub ubers_defeated: BTreeSet<String>,
}

impl ZoneProgress {
    pub fn new() -> Self {
        Self {
            current_act: 1,
            current_zone: 1,
            current_wave: 1,
            highest_act: 1,
            highest_zone: 1,
            bosses_defeated: BTreeSet::new(),
            ubers_defeated: BTreeSet::new(),
        }
    }
}

impl Default for ZoneProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Meta-progression that survives prestige resets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragon {
    pub times_prestiged: u32,
    pub points: u64,
}

/// Auto-liquidation policy for incoming drops, set by the host from
/// its settings screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SellPolicy {
    /// Drops at or below this tier are sold on pickup.
    pub liquidate_up_to: Option<crate::items::Rarity>,
    pub confirm_sales: bool,
}

impl SellPolicy {
    pub fn liquidates(&self, rarity: crate::items::Rarity) -> bool {
        self.liquidate_up_to.is_some_and(|max| rarity <= max)
    }
}

/// Vitality state machine. There is no dead state: HP never drops
/// below 1 and the only way out of NearDeath is a revive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vitality {
    Alive,
    NearDeath,
}

/// Main game state aggregate. Constructed once per session; the event
/// bus is a separate shared instance passed into each mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub tank: TankProgression,
    pub vitals: TankVitals,
    pub economy: Economy,
    pub slots: Vec<ModuleSlot>,
    pub inventory: Vec<InventoryItem>,
    pub zones: ZoneProgress,
    pub paragon: Paragon,
    pub sell_policy: SellPolicy,
}

impl GameState {
    /// Creates a fresh new-game state.
    pub fn new() -> Self {
        Self {
            tank: TankProgression::new(),
            vitals: TankVitals::new(),
            economy: Economy::default(),
            slots: (0..MODULE_SLOT_COUNT).map(ModuleSlot::new).collect(),
            inventory: Vec::new(),
            zones: ZoneProgress::new(),
            paragon: Paragon::default(),
            sell_policy: SellPolicy::default(),
        }
    }

    /// Skill points earned but not yet spent.
    pub fn unspent_skill_points(&self) -> u32 {
        (self.tank.level - 1).saturating_sub(self.tank.spent_skill_points())
    }

    pub fn vitality(&self) -> Vitality {
        if self.vitals.hp_fraction() <= NEAR_DEATH_THRESHOLD {
            Vitality::NearDeath
        } else {
            Vitality::Alive
        }
    }

    /// Attack-rate multiplier the host applies while near death.
    pub fn attack_rate_multiplier(&self) -> f64 {
        match self.vitality() {
            Vitality::Alive => 1.0,
            Vitality::NearDeath => NEAR_DEATH_ATTACK_RATE_MULTIPLIER,
        }
    }

    pub fn slot(&self, index: usize) -> Option<&ModuleSlot> {
        self.slots.get(index)
    }

    /// Finds an inventory item by id.
    pub fn find_in_inventory(&self, id: uuid::Uuid) -> Option<&InventoryItem> {
        self.inventory.iter().find(|i| i.id == id)
    }

    /// Checks the structural invariants. Used by tests and after load.
    pub fn invariants_hold(&self) -> bool {
        let hp_ok = self.vitals.current_hp >= 1 && self.vitals.current_hp <= self.vitals.max_hp;
        let slots_ok = self.slots.len() == MODULE_SLOT_COUNT
            && self.slots.iter().enumerate().all(|(i, s)| s.index == i);
        let points_ok = self.tank.spent_skill_points() <= self.tank.level.saturating_sub(1);
        let watermark_ok = (self.zones.highest_act, self.zones.highest_zone)
            >= (self.zones.current_act, self.zones.current_zone);

        let mut ids = BTreeSet::new();
        let ownership_ok = self
            .inventory
            .iter()
            .map(|i| i.id)
            .chain(self.slots.iter().filter_map(|s| s.equipped.as_ref().map(|i| i.id)))
            .all(|id| ids.insert(id));

        hp_ok && slots_ok && points_ok && watermark_ok && ownership_ok
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_state() {
        let state = GameState::new();

        assert_eq!(state.tank.level, 1);
        assert_eq!(state.tank.xp, 0);
        assert_eq!(state.unspent_skill_points(), 0);
        assert_eq!(state.vitals.max_hp, BASE_MAX_HP);
        assert_eq!(state.vitals.current_hp, BASE_MAX_HP);
        assert_eq!(state.economy.gold, 0);
        assert_eq!(state.slots.len(), MODULE_SLOT_COUNT);
        assert!(state.inventory.is_empty());
        assert!(state.invariants_hold());
    }

    #[test]
    fn test_starter_slots_unlocked() {
        let state = GameState::new();
        assert!(state.slots[0].unlocked);
        assert!(state.slots[1].unlocked);
        assert!(!state.slots[2].unlocked);
        assert!(!state.slots[3].unlocked);
        assert!(!state.slots[4].unlocked);
    }

    #[test]
    fn test_vitality_threshold() {
        let mut state = GameState::new();
        assert_eq!(state.vitality(), Vitality::Alive);
        assert_eq!(state.attack_rate_multiplier(), 1.0);

        // Exactly 20% counts as near death
        state.vitals.current_hp = 20;
        assert_eq!(state.vitality(), Vitality::NearDeath);
        assert_eq!(
            state.attack_rate_multiplier(),
            NEAR_DEATH_ATTACK_RATE_MULTIPLIER
        );

        state.vitals.current_hp = 21;
        assert_eq!(state.vitality(), Vitality::Alive);
    }

    #[test]
    fn test_recompute_derived_clamps_hp() {
        let mut vitals = TankVitals::new();
        vitals.current_hp = 100;
        vitals.set_upgrade_levels([2, 0, 0]);
        assert_eq!(vitals.max_hp, BASE_MAX_HP + 2 * MAX_HP_PER_UPGRADE);
        assert_eq!(vitals.current_hp, 100);
        assert_eq!(vitals.defense, 0);
    }

    #[test]
    fn test_sell_policy() {
        use crate::items::Rarity;

        let none = SellPolicy::default();
        assert!(!none.liquidates(Rarity::Common));

        let policy = SellPolicy {
            liquidate_up_to: Some(Rarity::Uncommon),
            confirm_sales: false,
        };
        assert!(policy.liquidates(Rarity::Common));
        assert!(policy.liquidates(Rarity::Uncommon));
        assert!(!policy.liquidates(Rarity::Rare));
    }

    #[test]
    fn test_invariants_catch_duplicate_item() {
        use crate::items::{InventoryItem, ModuleArchetype, Rarity};

        let mut state = GameState::new();
        let item = InventoryItem::new(ModuleArchetype::Cannon, Rarity::Common, vec![]);
        state.inventory.push(item.clone());
        assert!(state.invariants_hold());

        // Same item in a slot and inventory violates exclusive ownership
        state.slots[0].equipped = Some(item);
        assert!(!state.invariants_hold());
    }
}
