use thiserror::Error;

use crate::core::types::{Team, UnitId};

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Duplicate unit {id} in {team:?} roster")]
    DuplicateUnit { id: UnitId, team: Team },

    #[error("Cell ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArenaError>;
