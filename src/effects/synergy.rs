//! Synergies - team-wide bonuses unlocked by fielding enough units of a type
//!
//! A side's synergy level for a type is the number of distinct unit names of
//! that type on its board. Each synergy has ordered tier thresholds; only the
//! highest reached tier becomes an active effect tag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::effects::effect::{Effect, EffectSet};
use crate::effects::mutation::{EffectRule, Mutation};
use crate::unit::source::RosterUnit;
use crate::unit::stats::StatKind::*;
use crate::unit::status::StatusKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Synergy {
    Normal,
    Grass,
    Fire,
    Water,
    Electric,
    Fighting,
    Psychic,
    Dark,
    Steel,
    Ground,
    Poison,
    Dragon,
    Bug,
    Flying,
    Ice,
    Fairy,
    Ghost,
}

/// Tier thresholds per synergy, weakest first
pub const SYNERGY_TIERS: &[(Synergy, &[(u32, Effect)])] = &[
    (
        Synergy::Normal,
        &[
            (3, Effect::Stamina),
            (5, Effect::Strength),
            (7, Effect::RockSmash),
            (9, Effect::PurePower),
        ],
    ),
    (
        Synergy::Grass,
        &[(3, Effect::Ingrain), (5, Effect::Growth), (7, Effect::Spore)],
    ),
    (
        Synergy::Fire,
        &[
            (2, Effect::Blaze),
            (4, Effect::VictoryStar),
            (6, Effect::Drought),
            (8, Effect::DesolateLand),
        ],
    ),
    (
        Synergy::Water,
        &[(3, Effect::RainDance), (6, Effect::Drizzle), (9, Effect::PrimordialSea)],
    ),
    (
        Synergy::Electric,
        &[(3, Effect::EerieImpulse), (5, Effect::RisingVoltage), (7, Effect::Overdrive)],
    ),
    (
        Synergy::Fighting,
        &[(2, Effect::Revenge), (4, Effect::Punishment), (6, Effect::Justified)],
    ),
    (
        Synergy::Psychic,
        &[(2, Effect::Amnesia), (4, Effect::LightScreen), (6, Effect::EerieSpell)],
    ),
    (
        Synergy::Dark,
        &[(3, Effect::HoneClaws), (5, Effect::Assurance), (7, Effect::BeatUp)],
    ),
    (
        Synergy::Steel,
        &[(2, Effect::SteelSurge), (4, Effect::SteelSpike)],
    ),
    (
        Synergy::Ground,
        &[
            (2, Effect::Tiller),
            (4, Effect::Digger),
            (6, Effect::Driller),
            (8, Effect::DeepMiner),
        ],
    ),
    (
        Synergy::Poison,
        &[(3, Effect::PoisonGas), (5, Effect::Toxic), (7, Effect::Venom)],
    ),
    (
        Synergy::Dragon,
        &[(3, Effect::DragonEnergy), (5, Effect::DragonScales), (7, Effect::DragonDance)],
    ),
    (
        Synergy::Bug,
        &[
            (2, Effect::Swarm),
            (4, Effect::Infestation),
            (6, Effect::Horde),
            (8, Effect::HeartOfTheSwarm),
        ],
    ),
    (
        Synergy::Flying,
        &[
            (2, Effect::Tailwind),
            (4, Effect::FeatherDance),
            (6, Effect::MaxAirflow),
            (8, Effect::MaxGuard),
        ],
    ),
    (
        Synergy::Ice,
        &[(2, Effect::FrostBite), (4, Effect::SheerCold), (6, Effect::AbsoluteZero)],
    ),
    (
        Synergy::Fairy,
        &[(2, Effect::FairyWind), (4, Effect::StrangeSteam), (6, Effect::Moonblast)],
    ),
    (
        Synergy::Ghost,
        &[
            (2, Effect::Haunt),
            (4, Effect::Torment),
            (6, Effect::Spite),
            (8, Effect::Doom),
        ],
    ),
];

const fn typed(effect: Effect, synergy: Synergy, mutations: &'static [Mutation]) -> EffectRule {
    EffectRule {
        effect,
        required: Some(synergy),
        mutations,
    }
}

/// Per-unit mutation for every synergy tag. Normal tags and the Ghost chain
/// do most of their work in the post-effect pass.
pub const SYNERGY_RULES: &[EffectRule] = &[
    typed(Effect::Stamina, Synergy::Normal, &[]),
    typed(Effect::Strength, Synergy::Normal, &[]),
    typed(Effect::RockSmash, Synergy::Normal, &[]),
    typed(Effect::PurePower, Synergy::Normal, &[]),
    typed(Effect::Ingrain, Synergy::Grass, &[Mutation::Add(MaxHp, 30.0)]),
    typed(Effect::Growth, Synergy::Grass, &[Mutation::Add(MaxHp, 60.0), Mutation::Add(Defense, 2.0)]),
    typed(Effect::Spore, Synergy::Grass, &[Mutation::Add(MaxHp, 100.0), Mutation::Add(Defense, 4.0)]),
    typed(Effect::Blaze, Synergy::Fire, &[Mutation::Scale(Attack, 0.1)]),
    typed(Effect::VictoryStar, Synergy::Fire, &[Mutation::Scale(Attack, 0.2)]),
    typed(Effect::Drought, Synergy::Fire, &[Mutation::Scale(Attack, 0.3)]),
    typed(
        Effect::DesolateLand,
        Synergy::Fire,
        &[Mutation::Scale(Attack, 0.45), Mutation::Immunity(StatusKind::Burn)],
    ),
    typed(Effect::RainDance, Synergy::Water, &[Mutation::Add(Dodge, 0.1)]),
    typed(Effect::Drizzle, Synergy::Water, &[Mutation::Add(Dodge, 0.2)]),
    typed(Effect::PrimordialSea, Synergy::Water, &[Mutation::Add(Dodge, 0.3)]),
    typed(Effect::EerieImpulse, Synergy::Electric, &[Mutation::Add(AttackSpeed, 0.1)]),
    typed(Effect::RisingVoltage, Synergy::Electric, &[Mutation::Add(AttackSpeed, 0.2)]),
    typed(Effect::Overdrive, Synergy::Electric, &[Mutation::Add(AttackSpeed, 0.3)]),
    typed(Effect::Revenge, Synergy::Fighting, &[Mutation::Add(Attack, 3.0)]),
    typed(Effect::Punishment, Synergy::Fighting, &[Mutation::Add(Attack, 6.0)]),
    typed(
        Effect::Justified,
        Synergy::Fighting,
        &[Mutation::Add(Attack, 10.0), Mutation::Add(MaxHp, 50.0)],
    ),
    typed(Effect::Amnesia, Synergy::Psychic, &[Mutation::Add(AbilityPower, 20.0)]),
    typed(Effect::LightScreen, Synergy::Psychic, &[Mutation::Add(AbilityPower, 40.0)]),
    typed(Effect::EerieSpell, Synergy::Psychic, &[Mutation::Add(AbilityPower, 70.0)]),
    typed(
        Effect::HoneClaws,
        Synergy::Dark,
        &[Mutation::Add(CritChance, 10.0), Mutation::Add(CritDamage, 0.2)],
    ),
    typed(
        Effect::Assurance,
        Synergy::Dark,
        &[Mutation::Add(CritChance, 20.0), Mutation::Add(CritDamage, 0.4)],
    ),
    typed(
        Effect::BeatUp,
        Synergy::Dark,
        &[Mutation::Add(CritChance, 30.0), Mutation::Add(CritDamage, 0.6)],
    ),
    typed(Effect::SteelSurge, Synergy::Steel, &[Mutation::Add(Defense, 5.0)]),
    typed(
        Effect::SteelSpike,
        Synergy::Steel,
        &[Mutation::Add(Defense, 10.0), Mutation::Add(SpecialDefense, 5.0)],
    ),
    typed(Effect::Tiller, Synergy::Ground, &[Mutation::Add(Defense, 2.0), Mutation::Add(Attack, 1.0)]),
    typed(Effect::Digger, Synergy::Ground, &[Mutation::Add(Defense, 4.0), Mutation::Add(Attack, 2.0)]),
    typed(Effect::Driller, Synergy::Ground, &[Mutation::Add(Defense, 6.0), Mutation::Add(Attack, 4.0)]),
    typed(Effect::DeepMiner, Synergy::Ground, &[Mutation::Add(Defense, 8.0), Mutation::Add(Attack, 6.0)]),
    typed(Effect::PoisonGas, Synergy::Poison, &[Mutation::Immunity(StatusKind::Poison)]),
    typed(
        Effect::Toxic,
        Synergy::Poison,
        &[Mutation::Immunity(StatusKind::Poison), Mutation::Add(AbilityPower, 15.0)],
    ),
    typed(
        Effect::Venom,
        Synergy::Poison,
        &[Mutation::Immunity(StatusKind::Poison), Mutation::Add(AbilityPower, 30.0)],
    ),
    typed(
        Effect::DragonEnergy,
        Synergy::Dragon,
        &[Mutation::Add(AttackSpeed, 0.05), Mutation::Add(MaxHp, 30.0)],
    ),
    typed(
        Effect::DragonScales,
        Synergy::Dragon,
        &[Mutation::Add(AttackSpeed, 0.1), Mutation::Add(MaxHp, 60.0)],
    ),
    typed(
        Effect::DragonDance,
        Synergy::Dragon,
        &[Mutation::Add(AttackSpeed, 0.15), Mutation::Add(MaxHp, 100.0)],
    ),
    typed(Effect::Swarm, Synergy::Bug, &[Mutation::Add(MaxHp, 20.0)]),
    typed(Effect::Infestation, Synergy::Bug, &[Mutation::Add(MaxHp, 40.0)]),
    typed(Effect::Horde, Synergy::Bug, &[Mutation::Add(MaxHp, 60.0)]),
    typed(Effect::HeartOfTheSwarm, Synergy::Bug, &[Mutation::Add(MaxHp, 80.0)]),
    typed(Effect::Tailwind, Synergy::Flying, &[Mutation::Add(Dodge, 0.05)]),
    typed(Effect::FeatherDance, Synergy::Flying, &[Mutation::Add(Dodge, 0.1)]),
    typed(
        Effect::MaxAirflow,
        Synergy::Flying,
        &[Mutation::Add(Dodge, 0.15), Mutation::Add(AttackSpeed, 0.1)],
    ),
    typed(
        Effect::MaxGuard,
        Synergy::Flying,
        &[Mutation::Add(Dodge, 0.2), Mutation::Add(AttackSpeed, 0.15)],
    ),
    typed(Effect::FrostBite, Synergy::Ice, &[Mutation::Add(SpecialDefense, 3.0)]),
    typed(Effect::SheerCold, Synergy::Ice, &[Mutation::Add(SpecialDefense, 6.0)]),
    typed(
        Effect::AbsoluteZero,
        Synergy::Ice,
        &[Mutation::Add(SpecialDefense, 10.0), Mutation::Immunity(StatusKind::Freeze)],
    ),
    typed(
        Effect::FairyWind,
        Synergy::Fairy,
        &[Mutation::Add(SpecialDefense, 2.0), Mutation::Add(AbilityPower, 10.0)],
    ),
    typed(
        Effect::StrangeSteam,
        Synergy::Fairy,
        &[Mutation::Add(SpecialDefense, 4.0), Mutation::Add(AbilityPower, 20.0)],
    ),
    typed(
        Effect::Moonblast,
        Synergy::Fairy,
        &[Mutation::Add(SpecialDefense, 6.0), Mutation::Add(AbilityPower, 40.0)],
    ),
    typed(Effect::Haunt, Synergy::Ghost, &[Mutation::Add(Dodge, 0.05)]),
    typed(Effect::Torment, Synergy::Ghost, &[Mutation::Add(Dodge, 0.1)]),
    typed(Effect::Spite, Synergy::Ghost, &[Mutation::Add(Dodge, 0.15)]),
    typed(Effect::Doom, Synergy::Ghost, &[Mutation::Add(Dodge, 0.2)]),
];

/// Number of clones each Bug tier summons at setup
pub const SUMMON_TIERS: &[(Effect, usize)] = &[
    (Effect::Infestation, 1),
    (Effect::Horde, 2),
    (Effect::HeartOfTheSwarm, 3),
];

/// Synergy level per type for one side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynergyLevels(BTreeMap<Synergy, u32>);

impl SynergyLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count distinct unit names per type among units on the board
    pub fn from_units<'a>(units: impl IntoIterator<Item = &'a RosterUnit>) -> Self {
        let mut seen: BTreeMap<Synergy, Vec<&'a str>> = BTreeMap::new();
        for unit in units.into_iter().filter(|u| !u.is_benched()) {
            for synergy in &unit.types {
                let names = seen.entry(*synergy).or_default();
                if !names.contains(&unit.name.as_str()) {
                    names.push(&unit.name);
                }
            }
        }
        Self(
            seen.into_iter()
                .map(|(synergy, names)| (synergy, names.len() as u32))
                .collect(),
        )
    }

    pub fn set(&mut self, synergy: Synergy, level: u32) {
        self.0.insert(synergy, level);
    }

    pub fn level(&self, synergy: Synergy) -> u32 {
        self.0.get(&synergy).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Synergy, u32)> + '_ {
        self.0.iter().map(|(synergy, level)| (*synergy, *level))
    }
}

impl EffectSet {
    /// Highest reached tier per synergy
    pub fn from_synergy_levels(levels: &SynergyLevels) -> Self {
        SYNERGY_TIERS
            .iter()
            .filter_map(|(synergy, tiers)| {
                let level = levels.level(*synergy);
                tiers
                    .iter()
                    .rev()
                    .find(|(threshold, _)| level >= *threshold)
                    .map(|(_, effect)| *effect)
            })
            .collect()
    }
}

pub fn synergy_rule(effect: Effect) -> Option<&'static EffectRule> {
    SYNERGY_RULES.iter().find(|rule| rule.effect == effect)
}

/// Clones to summon for a side with these effects
pub fn summon_count(effects: &EffectSet) -> usize {
    SUMMON_TIERS
        .iter()
        .filter(|(effect, _)| effects.contains(*effect))
        .map(|(_, count)| *count)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::placement::BENCH_ROW;

    #[test]
    fn test_every_tier_has_a_rule() {
        for (_, tiers) in SYNERGY_TIERS {
            for (_, effect) in tiers.iter() {
                assert!(synergy_rule(*effect).is_some(), "{effect:?} has no rule");
            }
        }
    }

    #[test]
    fn test_tiers_strictly_increase() {
        for (synergy, tiers) in SYNERGY_TIERS {
            for pair in tiers.windows(2) {
                assert!(pair[0].0 < pair[1].0, "{synergy:?} thresholds out of order");
            }
        }
    }

    #[test]
    fn test_levels_count_distinct_names_on_board() {
        let units = vec![
            RosterUnit::new("Caterpie", 0, 1).with_types(&[Synergy::Bug]),
            RosterUnit::new("Caterpie", 1, 1).with_types(&[Synergy::Bug]),
            RosterUnit::new("Weedle", 2, 1).with_types(&[Synergy::Bug, Synergy::Poison]),
            RosterUnit::new("Venonat", 3, BENCH_ROW).with_types(&[Synergy::Bug]),
        ];
        let levels = SynergyLevels::from_units(&units);
        assert_eq!(levels.level(Synergy::Bug), 2);
        assert_eq!(levels.level(Synergy::Poison), 1);
        assert_eq!(levels.level(Synergy::Fire), 0);
    }

    #[test]
    fn test_only_highest_tier_active() {
        let mut levels = SynergyLevels::new();
        levels.set(Synergy::Fire, 5);
        levels.set(Synergy::Water, 2);
        let effects = EffectSet::from_synergy_levels(&levels);
        assert!(effects.contains(Effect::VictoryStar));
        assert!(!effects.contains(Effect::Blaze));
        assert!(!effects.contains(Effect::RainDance));
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn test_summon_count_by_tier() {
        assert_eq!(summon_count(&EffectSet::new()), 0);
        assert_eq!(summon_count(&[Effect::Swarm].into_iter().collect()), 0);
        assert_eq!(summon_count(&[Effect::Horde].into_iter().collect()), 2);
        assert_eq!(
            summon_count(&[Effect::HeartOfTheSwarm].into_iter().collect()),
            3
        );
    }
}
