//! Auto Arena - deterministic combat resolution for an auto-battler
//!
//! Two rosters are placed on a shared board, every unit is buffed or
//! debuffed by a table of synergy, item, weather and terrain effects, and
//! the match ticks until one side is eliminated.

pub mod board;
pub mod core;
pub mod effects;
pub mod simulation;
pub mod telemetry;
pub mod unit;
