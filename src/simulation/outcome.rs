//! Match lifecycle and results

use serde::{Deserialize, Serialize};

use crate::core::types::{Owner, PlayerId};

/// Match phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    Setup, // Placing units and resolving effects
    Running,  // Ticking
    Finished, // Eliminated or stopped
}

/// Who won a finished match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player(PlayerId),
    /// The scripted side won, no human to credit
    Pve,
    /// Both sides were wiped out on the same tick
    Draw,
}

impl From<Owner> for Winner {
    fn from(owner: Owner) -> Self {
        match owner {
            Owner::Player(id) => Winner::Player(id),
            Owner::Pve => Winner::Pve,
        }
    }
}

/// Result from one player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Win,
    Defeat,
    Draw,
}

impl MatchResult {
    /// Compare roster sizes. Anything other than exactly one empty side is
    /// a draw, so the query can be polled while the match still runs.
    pub fn from_roster_sizes(own: usize, opponent: usize) -> Self {
        match (own == 0, opponent == 0) {
            (false, true) => MatchResult::Win,
            (true, false) => MatchResult::Defeat,
            _ => MatchResult::Draw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_from_roster_sizes() {
        assert_eq!(MatchResult::from_roster_sizes(3, 0), MatchResult::Win);
        assert_eq!(MatchResult::from_roster_sizes(0, 2), MatchResult::Defeat);
        assert_eq!(MatchResult::from_roster_sizes(2, 2), MatchResult::Draw);
        assert_eq!(MatchResult::from_roster_sizes(0, 0), MatchResult::Draw);
    }

    #[test]
    fn test_winner_from_owner() {
        let id = PlayerId::new();
        assert_eq!(Winner::from(Owner::Player(id)), Winner::Player(id));
        assert_eq!(Winner::from(Owner::Pve), Winner::Pve);
    }
}
