//! Status-effect record carried by each combat unit
//!
//! Timed statuses are stored as remaining milliseconds. Negative statuses are
//! blocked by immunities and by an active rune protect.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::core::types::{Millis, UnitId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusKind {
    Burn,
    Poison,
    Silence,
    Freeze,
    Sleep,
    Confusion,
    Paralysis,
    Flinch,
    Curse,
    Wound,
    /// Temporary immunity to incoming damage
    Protect,
    /// Temporary immunity to negative statuses and debuffs
    RuneProtect,
}

impl StatusKind {
    pub const NEGATIVE: [StatusKind; 10] = [
        StatusKind::Burn,
        StatusKind::Poison,
        StatusKind::Silence,
        StatusKind::Freeze,
        StatusKind::Sleep,
        StatusKind::Confusion,
        StatusKind::Paralysis,
        StatusKind::Flinch,
        StatusKind::Curse,
        StatusKind::Wound,
    ];

    pub fn is_negative(self) -> bool {
        !matches!(self, StatusKind::Protect | StatusKind::RuneProtect)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusRecord {
    durations: AHashMap<StatusKind, Millis>,
    sources: AHashMap<StatusKind, UnitId>,
    immunities: AHashSet<StatusKind>,
    /// Stacking poison counter, reset when poison ends
    pub poison_stacks: u32,
    /// Stacking mark counter shared by aura items
    pub mark_stacks: u32,
    /// Guaranteed revival still available
    pub resurrection: bool,
    /// Currently between death and revival
    pub resurrecting: bool,
    /// Time left until a resurrecting unit stands up
    pub revive_timer: Millis,
}

impl StatusRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, kind: StatusKind) -> bool {
        self.durations.get(&kind).is_some_and(|d| *d > 0.0)
    }

    pub fn remaining(&self, kind: StatusKind) -> Millis {
        self.durations.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn source(&self, kind: StatusKind) -> Option<UnitId> {
        self.sources.get(&kind).copied()
    }

    pub fn is_immune(&self, kind: StatusKind) -> bool {
        self.immunities.contains(&kind)
    }

    /// Units under rune protect cannot be picked by debuffs
    pub fn is_debuff_immune(&self) -> bool {
        self.is_active(StatusKind::RuneProtect)
    }

    pub fn grant_immunity(&mut self, kind: StatusKind) {
        self.immunities.insert(kind);
        self.durations.remove(&kind);
        self.sources.remove(&kind);
    }

    /// Start or extend a status. Returns `false` when the unit is immune.
    ///
    /// A shorter re-application never cuts an existing duration.
    pub fn trigger(&mut self, kind: StatusKind, duration: Millis, source: Option<UnitId>) -> bool {
        if kind.is_negative() && (self.is_immune(kind) || self.is_debuff_immune()) {
            return false;
        }
        if duration <= 0.0 {
            return false;
        }
        let entry = self.durations.entry(kind).or_insert(0.0);
        *entry = entry.max(duration);
        if kind == StatusKind::Poison {
            self.poison_stacks += 1;
        }
        if let Some(source) = source {
            self.sources.insert(kind, source);
        }
        true
    }

    /// Remove every negative status at once
    pub fn clear_negative(&mut self) {
        for kind in StatusKind::NEGATIVE {
            self.durations.remove(&kind);
            self.sources.remove(&kind);
        }
        self.poison_stacks = 0;
    }

    /// Count down every timed status; returns the ones that ran out this tick,
    /// sorted so callers see them in a stable order
    pub fn tick(&mut self, dt: Millis) -> Vec<StatusKind> {
        let mut expired = Vec::new();
        for (kind, remaining) in self.durations.iter_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                expired.push(*kind);
            }
        }
        for kind in &expired {
            self.durations.remove(kind);
            self.sources.remove(kind);
            if *kind == StatusKind::Poison {
                self.poison_stacks = 0;
            }
        }
        expired.sort();
        expired
    }

    /// Active statuses in stable order, for reporting
    pub fn active(&self) -> Vec<StatusKind> {
        let mut kinds: Vec<StatusKind> = self
            .durations
            .iter()
            .filter(|(_, d)| **d > 0.0)
            .map(|(k, _)| *k)
            .collect();
        kinds.sort();
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_and_expire() {
        let mut status = StatusRecord::new();
        assert!(status.trigger(StatusKind::Burn, 1000.0, None));
        assert!(status.is_active(StatusKind::Burn));

        assert!(status.tick(600.0).is_empty());
        assert_eq!(status.tick(400.0), vec![StatusKind::Burn]);
        assert!(!status.is_active(StatusKind::Burn));
    }

    #[test]
    fn test_reapply_keeps_longer_duration() {
        let mut status = StatusRecord::new();
        status.trigger(StatusKind::Silence, 3000.0, None);
        status.trigger(StatusKind::Silence, 1000.0, None);
        assert_eq!(status.remaining(StatusKind::Silence), 3000.0);
    }

    #[test]
    fn test_immunity_blocks_trigger() {
        let mut status = StatusRecord::new();
        status.grant_immunity(StatusKind::Paralysis);
        assert!(!status.trigger(StatusKind::Paralysis, 2000.0, None));
        assert!(!status.is_active(StatusKind::Paralysis));
    }

    #[test]
    fn test_rune_protect_blocks_negative_only() {
        let mut status = StatusRecord::new();
        status.trigger(StatusKind::RuneProtect, 5000.0, None);
        assert!(status.is_debuff_immune());
        assert!(!status.trigger(StatusKind::Curse, 2000.0, None));
        assert!(status.trigger(StatusKind::Protect, 2000.0, None));
    }

    #[test]
    fn test_clear_negative_keeps_positive() {
        let mut status = StatusRecord::new();
        status.trigger(StatusKind::Poison, 2000.0, None);
        status.trigger(StatusKind::Poison, 2000.0, None);
        status.trigger(StatusKind::Protect, 2000.0, None);
        assert_eq!(status.poison_stacks, 2);

        status.clear_negative();
        assert_eq!(status.active(), vec![StatusKind::Protect]);
        assert_eq!(status.poison_stacks, 0);
    }

    #[test]
    fn test_source_recorded() {
        let mut status = StatusRecord::new();
        let origin = UnitId::new();
        status.trigger(StatusKind::Burn, 1000.0, Some(origin));
        assert_eq!(status.source(StatusKind::Burn), Some(origin));
    }
}
