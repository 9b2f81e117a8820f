//! Per-unit damage and heal meters

pub mod meter;

pub use meter::{DamageMeter, HealMeter, TeamTelemetry, UnitTelemetry};
