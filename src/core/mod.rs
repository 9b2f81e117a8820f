pub mod config;
pub mod error;
pub mod types;

pub use config::SimulationConfig;
pub use error::{ArenaError, Result};
pub use types::{Coord, MatchId, Millis, Owner, PlayerId, Team, UnitId};
