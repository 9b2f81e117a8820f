//! Events produced by a match tick
//!
//! `BoardEvent` is the outbound shape a broadcast layer forwards to clients.
//! Everything else is for logs and tests.

use serde::{Deserialize, Serialize};

use crate::core::types::{Coord, MatchId, Millis, Team, UnitId};
use crate::simulation::outcome::Winner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEventKind {
    Lightning,
    SimulationStopped,
}

/// Board-level event with the match it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardEvent {
    pub match_id: MatchId,
    pub kind: BoardEventKind,
    /// Target cell; `None` for events not tied to a cell
    pub coord: Option<Coord>,
}

/// Log entry for match events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    /// Match time the event happened at
    pub at: Millis,
    pub kind: MatchEventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchEventKind {
    Board(BoardEvent),
    UnitStruck { unit: UnitId, damage: f32 },
    UnitDefeated { unit: UnitId, team: Team },
    MatchFinished { winner: Winner },
}

/// Log of events from a single `advance`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchEventLog {
    pub events: Vec<MatchEvent>,
}

impl MatchEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: MatchEventKind, at: Millis) {
        self.events.push(MatchEvent { at, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn board_events(&self) -> impl Iterator<Item = &BoardEvent> {
        self.events.iter().filter_map(|e| match &e.kind {
            MatchEventKind::Board(board) => Some(board),
            _ => None,
        })
    }

    pub fn defeated(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.events.iter().filter_map(|e| match e.kind {
            MatchEventKind::UnitDefeated { unit, .. } => Some(unit),
            _ => None,
        })
    }

    pub fn winner(&self) -> Option<Winner> {
        self.events.iter().find_map(|e| match e.kind {
            MatchEventKind::MatchFinished { winner } => Some(winner),
            _ => None,
        })
    }

    pub fn extend(&mut self, other: MatchEventLog) {
        self.events.extend(other.events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filters() {
        let mut log = MatchEventLog::new();
        let unit = UnitId::new();
        log.push(
            MatchEventKind::Board(BoardEvent {
                match_id: MatchId::new(),
                kind: BoardEventKind::Lightning,
                coord: Some(Coord::new(1, 2)),
            }),
            100.0,
        );
        log.push(MatchEventKind::UnitDefeated { unit, team: Team::Red }, 100.0);
        log.push(MatchEventKind::MatchFinished { winner: Winner::Pve }, 200.0);

        assert_eq!(log.len(), 3);
        assert_eq!(log.board_events().count(), 1);
        assert_eq!(log.defeated().collect::<Vec<_>>(), vec![unit]);
        assert_eq!(log.winner(), Some(Winner::Pve));
    }
}
