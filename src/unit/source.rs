//! Pre-match roster units
//!
//! A `RosterUnit` is the persistent slot a player owns between matches. The
//! engine reads it at setup and never writes back.

use serde::{Deserialize, Serialize};

use crate::board::placement::BENCH_ROW;
use crate::core::types::UnitId;
use crate::effects::items::Item;
use crate::effects::synergy::Synergy;
use crate::unit::stats::UnitStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Ultra,
    Legendary,
}

impl Rarity {
    /// Multiplier step used by rarity-scaled bonuses (Common = 1)
    pub fn tier(self) -> u32 {
        match self {
            Rarity::Common => 1,
            Rarity::Uncommon => 2,
            Rarity::Rare => 3,
            Rarity::Epic => 4,
            Rarity::Ultra => 5,
            Rarity::Legendary => 6,
        }
    }
}

/// Innate ability a unit carries into every match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Passive {
    #[default]
    None,
    /// Picks up a random basic item when entering a match empty-handed
    Pickup,
    Chlorophyll,
    SwiftSwim,
    SandRush,
    SnowCloak,
    NightStalker,
    /// Immune to burn
    WaterVeil,
    /// Immune to paralysis
    Limber,
    /// Immune to sleep
    Insomnia,
    /// Immune to poison
    Immunity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterUnit {
    #[serde(default)]
    pub id: UnitId,
    pub name: String,
    #[serde(default)]
    pub types: Vec<Synergy>,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub passive: Passive,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub stats: UnitStats,
    pub position_x: usize,
    /// Row on the owner's half, `BENCH_ROW` when benched
    pub position_y: usize,
}

impl RosterUnit {
    pub fn new(name: impl Into<String>, position_x: usize, position_y: usize) -> Self {
        Self {
            id: UnitId::new(),
            name: name.into(),
            types: Vec::new(),
            rarity: Rarity::default(),
            passive: Passive::default(),
            items: Vec::new(),
            stats: UnitStats::default(),
            position_x,
            position_y,
        }
    }

    pub fn with_types(mut self, types: &[Synergy]) -> Self {
        self.types = types.to_vec();
        self
    }

    pub fn with_items(mut self, items: &[Item]) -> Self {
        self.items = items.to_vec();
        self
    }

    pub fn with_passive(mut self, passive: Passive) -> Self {
        self.passive = passive;
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_stats(mut self, stats: UnitStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn has_type(&self, synergy: Synergy) -> bool {
        self.types.contains(&synergy)
    }

    pub fn is_benched(&self) -> bool {
        self.position_y == BENCH_ROW
    }
}
