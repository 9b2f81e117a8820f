//! Weather and terrain
//!
//! Weather is a single match-wide tag. Storm drives the lightning hazard in
//! the orchestrator; every other weather only grants a flat bonus at
//! placement. Terrain is a board-wide effect tag merged into both sides.

use serde::{Deserialize, Serialize};

use crate::effects::constants::WEATHER_SYNERGY_THRESHOLD;
use crate::effects::effect::Effect;
use crate::effects::mutation::{EffectRule, Mutation};
use crate::effects::synergy::{Synergy, SynergyLevels};
use crate::unit::source::Passive;
use crate::unit::stats::StatKind::*;
use crate::unit::status::StatusKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    Neutral,
    Rain,
    Sun,
    Sandstorm,
    Snow,
    Night,
    Misty,
    Storm,
    Windy,
}

/// Units of this type ignore lightning strikes
pub const STORM_IMMUNE_TYPE: Synergy = Synergy::Electric;

/// Synergy that summons each weather, in tie-break order
pub const WEATHER_TRIGGERS: &[(Synergy, Weather)] = &[
    (Synergy::Water, Weather::Rain),
    (Synergy::Fire, Weather::Sun),
    (Synergy::Ground, Weather::Sandstorm),
    (Synergy::Ice, Weather::Snow),
    (Synergy::Dark, Weather::Night),
    (Synergy::Fairy, Weather::Misty),
    (Synergy::Electric, Weather::Storm),
    (Synergy::Flying, Weather::Windy),
];

const fn universal(effect: Effect, mutations: &'static [Mutation]) -> EffectRule {
    EffectRule {
        effect,
        required: None,
        mutations,
    }
}

pub const WEATHER_RULES: &[EffectRule] = &[
    universal(Effect::Rainy, &[Mutation::Add(Mana, 15.0)]),
    universal(Effect::Sunny, &[Mutation::Add(CritChance, 10.0)]),
    universal(Effect::Sandstorm, &[Mutation::Add(Defense, 2.0)]),
    universal(Effect::Snowy, &[Mutation::Add(SpecialDefense, 2.0)]),
    universal(Effect::Nightfall, &[Mutation::Add(CritDamage, 0.2)]),
    universal(Effect::Misty, &[Mutation::Add(AbilityPower, 10.0)]),
    universal(Effect::Stormy, &[Mutation::Add(AttackSpeed, 0.05)]),
    universal(Effect::Windy, &[Mutation::Add(Dodge, 0.05)]),
];

pub const TERRAIN_RULES: &[EffectRule] = &[
    universal(Effect::GrassyTerrain, &[Mutation::Add(MaxHp, 30.0)]),
    universal(Effect::ElectricTerrain, &[Mutation::Add(AttackSpeed, 0.1)]),
    universal(
        Effect::MistyTerrain,
        &[
            Mutation::Immunity(StatusKind::Sleep),
            Mutation::Add(SpecialDefense, 2.0),
        ],
    ),
    universal(Effect::PsychicTerrain, &[Mutation::Add(AbilityPower, 20.0)]),
];

/// One-off bonuses for a passive that reacts to the current weather
pub const PASSIVE_WEATHER_RULES: &[(Weather, Passive, &[Mutation])] = &[
    (Weather::Sun, Passive::Chlorophyll, &[Mutation::Add(AttackSpeed, 0.2)]),
    (Weather::Rain, Passive::SwiftSwim, &[Mutation::Add(AttackSpeed, 0.2)]),
    (Weather::Sandstorm, Passive::SandRush, &[Mutation::Add(AttackSpeed, 0.2)]),
    (Weather::Snow, Passive::SnowCloak, &[Mutation::Add(Dodge, 0.2)]),
    (Weather::Night, Passive::NightStalker, &[Mutation::Add(CritChance, 20.0)]),
];

impl Weather {
    pub fn effect(self) -> Option<Effect> {
        match self {
            Weather::Neutral => None,
            Weather::Rain => Some(Effect::Rainy),
            Weather::Sun => Some(Effect::Sunny),
            Weather::Sandstorm => Some(Effect::Sandstorm),
            Weather::Snow => Some(Effect::Snowy),
            Weather::Night => Some(Effect::Nightfall),
            Weather::Misty => Some(Effect::Misty),
            Weather::Storm => Some(Effect::Stormy),
            Weather::Windy => Some(Effect::Windy),
        }
    }

    pub fn rule(self) -> Option<&'static EffectRule> {
        let effect = self.effect()?;
        WEATHER_RULES.iter().find(|rule| rule.effect == effect)
    }

    pub fn passive_bonus(self, passive: Passive) -> Option<&'static [Mutation]> {
        PASSIVE_WEATHER_RULES
            .iter()
            .find(|(weather, p, _)| *weather == self && *p == passive)
            .map(|(_, _, mutations)| *mutations)
    }

    /// Weather summoned by the strongest combined synergy of both players
    pub fn from_synergies(blue: &SynergyLevels, red: &SynergyLevels) -> Self {
        let mut best: Option<(u32, Weather)> = None;
        for (synergy, weather) in WEATHER_TRIGGERS {
            let combined = blue.level(*synergy) + red.level(*synergy);
            if combined < WEATHER_SYNERGY_THRESHOLD {
                continue;
            }
            if best.map_or(true, |(level, _)| combined > level) {
                best = Some((combined, *weather));
            }
        }
        best.map_or(Weather::Neutral, |(_, weather)| weather)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Grassy,
    Electric,
    Misty,
    Psychic,
}

impl Terrain {
    pub fn effect(self) -> Effect {
        match self {
            Terrain::Grassy => Effect::GrassyTerrain,
            Terrain::Electric => Effect::ElectricTerrain,
            Terrain::Misty => Effect::MistyTerrain,
            Terrain::Psychic => Effect::PsychicTerrain,
        }
    }
}

pub fn terrain_rule(effect: Effect) -> Option<&'static EffectRule> {
    TERRAIN_RULES.iter().find(|rule| rule.effect == effect)
}
