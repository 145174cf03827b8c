// XP and leveling
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_GROWTH: f64 = 1.15;
pub const XP_BONUS_PERCENT_PER_LEVEL: f64 = 2.0;

// Tank vitals
pub const BASE_MAX_HP: u32 = 100;
pub const MAX_HP_PER_UPGRADE: u32 = 25;
pub const DEFENSE_PER_UPGRADE: u32 = 5;
pub const BASE_REGEN_PER_SECOND: u32 = 1;
pub const REGEN_PER_UPGRADE: u32 = 1;
pub const NEAR_DEATH_THRESHOLD: f64 = 0.20;
pub const NEAR_DEATH_ATTACK_RATE_MULTIPLIER: f64 = 0.5;
pub const REVIVE_HP_FRACTION: f64 = 0.5;

// Skill stat effects (per invested level)
pub const DAMAGE_PERCENT_PER_LEVEL: f64 = 5.0;
pub const BASE_CRIT_CHANCE_PERCENT: f64 = 5.0;
pub const CRIT_CHANCE_PERCENT_PER_LEVEL: f64 = 1.0;
pub const BASE_CRIT_MULTIPLIER: f64 = 2.0;
pub const CRIT_DAMAGE_BONUS_PER_LEVEL: f64 = 0.1;
pub const ATTACK_SPEED_PERCENT_PER_LEVEL: f64 = 3.0;
pub const LEVEL_SCALING_PER_LEVEL: f64 = 0.05;

// Upgrade economy
pub const TANK_STAT_UNIT_PRICE: u64 = 100;
pub const SLOT_STAT_UNIT_PRICE: u64 = 50;

// Slot stat effects (per upgrade level, summed over all slots)
pub const SLOT_DAMAGE_PERCENT_PER_LEVEL: f64 = 2.0;
pub const SLOT_ATTACK_SPEED_PERCENT_PER_LEVEL: f64 = 2.0;
pub const SLOT_CRIT_CHANCE_PERCENT_PER_LEVEL: f64 = 0.5;

// Module slots
pub const MODULE_SLOT_COUNT: usize = 5;
pub const STARTER_SLOT_COUNT: usize = 2;
pub const SLOT_UNLOCK_COSTS: [u64; MODULE_SLOT_COUNT] = [0, 0, 1_000, 10_000, 100_000];
/// Boss that must be defeated before the final slot can be unlocked.
pub const SLOT_BOSS_PREREQS: [Option<&str>; MODULE_SLOT_COUNT] =
    [None, None, None, None, Some("iron_warden")];

// Item sell values by rarity tier
pub const SELL_VALUE_COMMON: u64 = 10;
pub const SELL_VALUE_UNCOMMON: u64 = 25;
pub const SELL_VALUE_RARE: u64 = 100;
pub const SELL_VALUE_EPIC: u64 = 500;
pub const SELL_VALUE_LEGENDARY: u64 = 2_500;

// Zone progression
pub const ZONES_PER_ACT: u32 = 10;
pub const WAVES_PER_ZONE: u32 = 10;

// Prestige
pub const PRESTIGE_MIN_LEVEL: u32 = 50;
pub const PARAGON_POINTS_PER_ZONE: u64 = 1;

// Loot: base drop chance by opponent category
pub const DROP_CHANCE_FODDER: f64 = 0.08;
pub const DROP_CHANCE_STANDARD: f64 = 0.20;
pub const DROP_LEVEL_BONUS_STEP: f64 = 0.01;
pub const DROP_LEVEL_BONUS_LEVELS: u32 = 10;
pub const DROP_LEVEL_BONUS_CAP: f64 = 0.10;

// Loot: rarity roll. Base weights for the four droppable tiers; the
// higher-tier weights grow with tank level, elites multiply them further.
pub const RARITY_WEIGHT_COMMON: f64 = 100.0;
pub const RARITY_WEIGHT_UNCOMMON: f64 = 40.0;
pub const RARITY_WEIGHT_RARE: f64 = 12.0;
pub const RARITY_WEIGHT_EPIC: f64 = 3.0;
pub const RARITY_WEIGHT_PER_LEVEL_UNCOMMON: f64 = 0.5;
pub const RARITY_WEIGHT_PER_LEVEL_RARE: f64 = 0.2;
pub const RARITY_WEIGHT_PER_LEVEL_EPIC: f64 = 0.05;
pub const ELITE_RARITY_WEIGHT_MULTIPLIER: f64 = 2.0;

// Save format
pub const SAVE_VERSION: u32 = 2;
pub const SAVE_VERSION_MAGIC: u64 = 0x49524F_4E434C41; // "IRONCLA"

// Event bus: max times the same event kind may appear on the dispatch
// stack before further re-entrant publishes of it are dropped.
pub const MAX_REENTRANT_PUBLISH_DEPTH: usize = 4;
