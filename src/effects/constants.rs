//! Magnitudes for effects resolved outside the rule tables
//!
//! Durations are milliseconds. Fractions are of the stat's current value.

use crate::core::types::Millis;

// Item-driven statuses
pub const FLAME_ORB_BURN_MS: Millis = 60_000.0;
pub const TOXIC_ORB_POISON_MS: Millis = 60_000.0;
pub const RUNE_STONE_PROTECT_MS: Millis = 8_000.0;

// Aura items (row neighbours at x - 1, x, x + 1)
pub const LUCKY_EGG_AP: f32 = 30.0;
pub const KINGS_ROCK_SHIELD: f32 = 30.0;
pub const KINGS_ROCK_PROTECT_MS: Millis = 3_000.0;
pub const FOCUS_BAND_ATTACK_SPEED: f32 = 0.15;
pub const DELTA_ORB_MARKS: u32 = 1;

// High-tier synergy grants, multiplied by the unit's rarity tier
pub const MAX_GUARD_SHIELD_PER_TIER: f32 = 20.0;
pub const OVERDRIVE_ATTACK_SPEED_PER_TIER: f32 = 0.05;
pub const EERIE_SPELL_AP_PER_TIER: f32 = 10.0;

// Tier shield granted by Normal tags, to the unit and its adjacent allies
pub const STAMINA_SHIELD: f32 = 15.0;
pub const STRENGTH_SHIELD: f32 = 30.0;
pub const ROCK_SMASH_SHIELD: f32 = 50.0;
pub const PURE_POWER_SHIELD: f32 = 70.0;

// Ghost debuff chain
pub const HAUNT_HP_FRACTION: f32 = 0.2;
pub const HAUNT_SHIELD_FRACTION: f32 = 0.2;
pub const HAUNT_FLINCH_MS: Millis = 5_000.0;
pub const TORMENT_ATTACK_FRACTION: f32 = 0.2;
pub const TORMENT_PARALYSIS_MS: Millis = 5_000.0;
pub const SPITE_AP_REDUCTION: f32 = 50.0;
pub const SPITE_SILENCE_MS: Millis = 5_000.0;
pub const DOOM_CURSE_MS: Millis = 8_000.0;

// Weather derivation
pub const WEATHER_SYNERGY_THRESHOLD: u32 = 8;
