//! Match configuration with documented constants
//!
//! Board geometry, hazard pacing, item limits and PvE scaling. Effect
//! magnitudes live in `effects::constants` instead.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ArenaError, Result};

/// Configuration for a single match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === BOARD ===
    /// Number of columns on the shared board
    pub board_width: usize,

    /// Number of rows on the shared board
    ///
    /// Source rosters use rows `1..=board_height`; row 0 is the bench.
    pub board_height: usize,

    // === STORM HAZARD ===
    /// Lower bound of the lightning countdown (milliseconds)
    pub storm_min_ms: u32,

    /// Upper bound of the lightning countdown (milliseconds, inclusive)
    pub storm_max_ms: u32,

    /// True damage dealt by a lightning strike to an exposed unit
    pub lightning_damage: f32,

    // === ITEMS ===
    /// Maximum number of held items per unit
    pub max_held_items: usize,

    /// Items rolled when a randomizer item is consumed
    pub randomizer_rolls: usize,

    // === PVE ===
    /// Flat max HP granted to PvE units for every stage level
    pub pve_hp_per_stage: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            board_width: 8,
            board_height: 6,
            storm_min_ms: 4000,
            storm_max_ms: 8000,
            lightning_damage: 100.0,
            max_held_items: 3,
            randomizer_rolls: 2,
            pve_hp_per_stage: 5.0,
        }
    }
}

impl SimulationConfig {
    /// Parse a config from TOML; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.board_width == 0 || self.board_height == 0 {
            return Err(ArenaError::InvalidConfig(format!(
                "board must have at least one cell, got {}x{}",
                self.board_width, self.board_height
            )));
        }
        if self.storm_min_ms > self.storm_max_ms {
            return Err(ArenaError::InvalidConfig(format!(
                "storm range inverted: {} > {}",
                self.storm_min_ms, self.storm_max_ms
            )));
        }
        if self.max_held_items == 0 {
            return Err(ArenaError::InvalidConfig(
                "max_held_items must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
