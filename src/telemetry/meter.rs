//! Delta meters over cumulative unit counters
//!
//! Units only report running totals. Each meter keeps the last seen total
//! as a baseline and exposes the change since the previous tick, which is
//! what a live DPS/HPS readout needs.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::UnitId;
use crate::unit::contract::{DamageTotals, HealTotals};

/// Damage dealt by type
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageMeter {
    baseline: DamageTotals,
    /// Damage dealt during the last recorded interval
    pub delta: DamageTotals,
}

impl DamageMeter {
    pub fn record(&mut self, totals: DamageTotals) {
        self.delta = DamageTotals {
            physical: totals.physical - self.baseline.physical,
            special: totals.special - self.baseline.special,
            true_damage: totals.true_damage - self.baseline.true_damage,
        };
        self.baseline = totals;
    }

    pub fn total(&self) -> DamageTotals {
        self.baseline
    }
}

/// Healing and shielding done
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HealMeter {
    baseline: HealTotals,
    pub delta: HealTotals,
}

impl HealMeter {
    pub fn record(&mut self, totals: HealTotals) {
        self.delta = HealTotals {
            heal: totals.heal - self.baseline.heal,
            shield: totals.shield - self.baseline.shield,
        };
        self.baseline = totals;
    }

    pub fn total(&self) -> HealTotals {
        self.baseline
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitTelemetry {
    pub damage: DamageMeter,
    pub heal: HealMeter,
}

/// Meters for every unit a side ever placed
///
/// Entries outlive the unit's removal from the roster so final numbers stay
/// queryable until the match is dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamTelemetry {
    units: AHashMap<UnitId, UnitTelemetry>,
}

impl TeamTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: UnitId) {
        self.units.entry(id).or_default();
    }

    /// Feed new cumulative totals; unknown ids are ignored
    pub fn record(&mut self, id: UnitId, damage: DamageTotals, heal: HealTotals) {
        if let Some(meters) = self.units.get_mut(&id) {
            meters.damage.record(damage);
            meters.heal.record(heal);
        }
    }

    pub fn get(&self, id: UnitId) -> Option<&UnitTelemetry> {
        self.units.get(&id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UnitId, &UnitTelemetry)> {
        self.units.iter()
    }

    /// Sum of all damage the side has dealt
    pub fn total_damage(&self) -> f32 {
        self.units.values().map(|m| m.damage.total().total()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_meter_tracks_delta() {
        let mut meter = DamageMeter::default();
        meter.record(DamageTotals {
            physical: 30.0,
            special: 0.0,
            true_damage: 5.0,
        });
        assert_eq!(meter.delta.physical, 30.0);

        meter.record(DamageTotals {
            physical: 45.0,
            special: 10.0,
            true_damage: 5.0,
        });
        assert_eq!(meter.delta.physical, 15.0);
        assert_eq!(meter.delta.special, 10.0);
        assert_eq!(meter.delta.true_damage, 0.0);
        assert_eq!(meter.total().total(), 60.0);
    }

    #[test]
    fn test_heal_meter_tracks_delta() {
        let mut meter = HealMeter::default();
        meter.record(HealTotals { heal: 20.0, shield: 5.0 });
        meter.record(HealTotals { heal: 25.0, shield: 5.0 });
        assert_eq!(meter.delta.heal, 5.0);
        assert_eq!(meter.delta.shield, 0.0);
    }

    #[test]
    fn test_unknown_unit_is_noop() {
        let mut telemetry = TeamTelemetry::new();
        let known = UnitId::new();
        telemetry.register(known);
        telemetry.record(UnitId::new(), DamageTotals::default(), HealTotals::default());
        assert_eq!(telemetry.len(), 1);
        assert!(telemetry.get(known).is_some());
    }

    #[test]
    fn test_register_twice_keeps_history() {
        let mut telemetry = TeamTelemetry::new();
        let id = UnitId::new();
        telemetry.register(id);
        telemetry.record(
            id,
            DamageTotals {
                physical: 12.0,
                ..Default::default()
            },
            HealTotals::default(),
        );
        telemetry.register(id);
        assert_eq!(telemetry.total_damage(), 12.0);
    }
}
