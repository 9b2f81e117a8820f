//! Team roster - the units still alive on one side
//!
//! Iteration follows insertion order so every tick visits units in the same
//! sequence. Removal is the only way a unit counts as dead.

use crate::core::types::{Team, UnitId};
use crate::unit::contract::CombatUnit;

#[derive(Debug, Clone)]
pub struct Roster<U> {
    team: Team,
    units: Vec<U>,
}

impl<U: CombatUnit> Roster<U> {
    pub fn new(team: Team) -> Self {
        Self {
            team,
            units: Vec::new(),
        }
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.units.iter().any(|u| u.id() == id)
    }

    /// Add a unit. A duplicate id is a setup defect; release builds keep the
    /// first unit and report `false`.
    pub fn insert(&mut self, unit: U) -> bool {
        let id = unit.id();
        debug_assert!(!self.contains(id), "duplicate unit {id} in {:?} roster", self.team);
        if self.contains(id) {
            tracing::warn!("Dropping duplicate unit {} for {:?}", id, self.team);
            return false;
        }
        self.units.push(unit);
        true
    }

    pub fn remove(&mut self, id: UnitId) -> Option<U> {
        let idx = self.units.iter().position(|u| u.id() == id)?;
        Some(self.units.remove(idx))
    }

    pub fn get(&self, id: UnitId) -> Option<&U> {
        self.units.iter().find(|u| u.id() == id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut U> {
        self.units.iter_mut().find(|u| u.id() == id)
    }

    pub fn ids(&self) -> Vec<UnitId> {
        self.units.iter().map(|u| u.id()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &U> {
        self.units.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut U> {
        self.units.iter_mut()
    }

    pub fn clear(&mut self) {
        self.units.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Coord;
    use crate::unit::entity::BattleUnit;
    use crate::unit::source::RosterUnit;

    fn unit(name: &str) -> BattleUnit {
        let source = RosterUnit::new(name, 0, 1);
        BattleUnit::spawn(&source, Coord::new(0, 0), Team::Blue, UnitId::new())
    }

    #[test]
    fn test_insert_preserves_order() {
        let mut roster = Roster::new(Team::Blue);
        let a = unit("a");
        let b = unit("b");
        let (ida, idb) = (a.id(), b.id());
        roster.insert(a);
        roster.insert(b);
        assert_eq!(roster.ids(), vec![ida, idb]);
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut roster = Roster::new(Team::Red);
        let units: Vec<BattleUnit> = ["a", "b", "c"].iter().map(|n| unit(n)).collect();
        let ids: Vec<UnitId> = units.iter().map(|u| u.id()).collect();
        for u in units {
            roster.insert(u);
        }
        assert!(roster.remove(ids[1]).is_some());
        assert_eq!(roster.ids(), vec![ids[0], ids[2]]);
        assert!(roster.remove(ids[1]).is_none());
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_duplicate_rejected_in_release() {
        let mut roster = Roster::new(Team::Blue);
        let a = unit("a");
        let copy = a.clone();
        assert!(roster.insert(a));
        assert!(!roster.insert(copy));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "duplicate unit")]
    fn test_duplicate_panics_in_debug() {
        let mut roster = Roster::new(Team::Blue);
        let a = unit("a");
        let copy = a.clone();
        roster.insert(a);
        roster.insert(copy);
    }
}
