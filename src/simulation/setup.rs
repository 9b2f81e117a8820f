//! Match construction inputs
//!
//! Source rosters come from outside the engine and are read-only here. The
//! helpers below are the pre-placement hooks: which units go on the board,
//! what synergy levels they add up to, and which units the Bug tiers clone.

use std::cmp::Reverse;

use ahash::AHashSet;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::error::{ArenaError, Result};
use crate::core::types::{MatchId, Owner, Team};
use crate::effects::effect::EffectSet;
use crate::effects::synergy::{Synergy, SynergyLevels};
use crate::effects::weather::{Terrain, Weather};
use crate::unit::source::RosterUnit;

/// Type whose high tiers summon clones
pub const SUMMON_TYPE: Synergy = Synergy::Bug;

/// One side's owner and source roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideSetup {
    pub owner: Owner,
    #[serde(default)]
    pub roster: Vec<RosterUnit>,
}

impl SideSetup {
    pub fn new(owner: Owner, roster: Vec<RosterUnit>) -> Self {
        Self { owner, roster }
    }

    /// Units that take part in the match; benched units stay home
    pub fn board_units(&self) -> impl Iterator<Item = &RosterUnit> {
        self.roster.iter().filter(|u| !u.is_benched())
    }

    pub fn synergy_levels(&self) -> SynergyLevels {
        SynergyLevels::from_units(&self.roster)
    }

    /// Team-wide effect set: reached synergy tiers plus the board terrain
    pub fn team_effects(&self, terrain: Option<Terrain>) -> EffectSet {
        let mut effects = EffectSet::from_synergy_levels(&self.synergy_levels());
        if let Some(terrain) = terrain {
            effects.insert(terrain.effect());
        }
        effects
    }

    /// The `count` strongest on-board units of the summon type. Equal scores
    /// keep roster order.
    pub fn clone_templates(&self, count: usize) -> Vec<&RosterUnit> {
        let mut candidates: Vec<&RosterUnit> = self
            .board_units()
            .filter(|u| u.has_type(SUMMON_TYPE))
            .collect();
        candidates.sort_by_key(|u| Reverse(OrderedFloat(u.stats.power_score())));
        candidates.truncate(count);
        candidates
    }
}

/// Everything needed to build one match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSetup {
    #[serde(default)]
    pub id: MatchId,
    pub blue: SideSetup,
    pub red: SideSetup,
    /// Difficulty scalar; scales PvE units
    #[serde(default)]
    pub stage_level: u32,
    #[serde(default)]
    pub weather: Weather,
    #[serde(default)]
    pub terrain: Option<Terrain>,
}

impl MatchSetup {
    pub fn new(blue: SideSetup, red: SideSetup) -> Self {
        Self {
            id: MatchId::new(),
            blue,
            red,
            stage_level: 0,
            weather: Weather::Neutral,
            terrain: None,
        }
    }

    pub fn with_weather(mut self, weather: Weather) -> Self {
        self.weather = weather;
        self
    }

    pub fn with_terrain(mut self, terrain: Terrain) -> Self {
        self.terrain = Some(terrain);
        self
    }

    pub fn with_stage_level(mut self, stage_level: u32) -> Self {
        self.stage_level = stage_level;
        self
    }

    pub fn side(&self, team: Team) -> &SideSetup {
        match team {
            Team::Blue => &self.blue,
            Team::Red => &self.red,
        }
    }

    /// Weather summoned by both sides' synergies
    pub fn derived_weather(&self) -> Weather {
        Weather::from_synergies(&self.blue.synergy_levels(), &self.red.synergy_levels())
    }

    /// Reject inputs that would break roster or board invariants
    pub fn validate(&self, config: &SimulationConfig) -> Result<()> {
        let mut seen = AHashSet::new();
        for team in Team::BOTH {
            for unit in &self.side(team).roster {
                if !seen.insert(unit.id) {
                    return Err(ArenaError::DuplicateUnit { id: unit.id, team });
                }
                if unit.is_benched() {
                    continue;
                }
                if unit.position_x >= config.board_width || unit.position_y > config.board_height {
                    return Err(ArenaError::OutOfBounds {
                        x: unit.position_x,
                        y: unit.position_y,
                        width: config.board_width,
                        height: config.board_height,
                    });
                }
            }
        }
        Ok(())
    }
}
