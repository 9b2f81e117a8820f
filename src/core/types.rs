//! Core type definitions used throughout the engine

use derive_more::Display;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a unit, stable for the duration of one match
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct UnitId(pub Uuid);

impl UnitId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Draw an id from the match's own random source so clones stay reproducible
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(Uuid::from_u128(rng.gen()))
    }
}

impl Default for UnitId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a human player
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a match instance
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct MatchId(pub Uuid);

impl MatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

/// Elapsed match time in milliseconds
pub type Millis = f32;

/// One of the two match participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::Blue, Team::Red];

    pub fn opponent(self) -> Self {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
        }
    }
}

/// Who controls a side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player(PlayerId),
    /// Scripted opponent with no human behind it
    Pve,
}

impl Owner {
    pub fn player_id(&self) -> Option<PlayerId> {
        match self {
            Owner::Player(id) => Some(*id),
            Owner::Pve => None,
        }
    }

    pub fn is_pve(&self) -> bool {
        matches!(self, Owner::Pve)
    }
}

/// Cell coordinate on the match board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Shift by a signed offset, `None` when the result would be negative
    pub fn offset(&self, dx: i32, dy: i32) -> Option<Self> {
        let x = self.x as i32 + dx;
        let y = self.y as i32 + dy;
        if x < 0 || y < 0 {
            return None;
        }
        Some(Self::new(x as usize, y as usize))
    }

    /// Chebyshev distance (8-neighbourhood steps)
    pub fn distance(&self, other: &Self) -> usize {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_team_opponent() {
        assert_eq!(Team::Blue.opponent(), Team::Red);
        assert_eq!(Team::Red.opponent(), Team::Blue);
    }

    #[test]
    fn test_coord_offset_rejects_negative() {
        let coord = Coord::new(0, 2);
        assert_eq!(coord.offset(-1, 0), None);
        assert_eq!(coord.offset(1, -2), Some(Coord::new(1, 0)));
    }

    #[test]
    fn test_coord_distance_is_chebyshev() {
        assert_eq!(Coord::new(0, 0).distance(&Coord::new(2, 1)), 2);
        assert_eq!(Coord::new(3, 3).distance(&Coord::new(3, 3)), 0);
    }

    #[test]
    fn test_unit_id_from_rng_is_reproducible() {
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(UnitId::from_rng(&mut a), UnitId::from_rng(&mut b));
    }
}
