//! Match orchestration - setup, tick loop, termination and outcome

pub mod engine;
pub mod events;
pub mod outcome;
pub mod setup;

pub use engine::Simulation;
pub use events::{BoardEvent, BoardEventKind, MatchEvent, MatchEventKind, MatchEventLog};
pub use outcome::{MatchPhase, MatchResult, Winner};
pub use setup::{MatchSetup, SideSetup, SUMMON_TYPE};
