//! Combat units - stats, statuses, rosters and the orchestrator contract

pub mod contract;
pub mod entity;
pub mod roster;
pub mod source;
pub mod stats;
pub mod status;

pub use contract::{AttackType, CombatUnit, DamageTotals, HealTotals, UnitAction};
pub use entity::BattleUnit;
pub use roster::Roster;
pub use source::{Passive, Rarity, RosterUnit};
pub use stats::{StatKind, UnitStats};
pub use status::{StatusKind, StatusRecord};
