//! Effect tags and tag sets
//!
//! Tags are declared in tier order inside each family; `EffectSet` iterates in
//! declaration order, which is the order the pipeline applies them in.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Effect {
    // Normal
    Stamina,
    Strength,
    RockSmash,
    PurePower,
    // Grass
    Ingrain,
    Growth,
    Spore,
    // Fire
    Blaze,
    VictoryStar,
    Drought,
    DesolateLand,
    // Water
    RainDance,
    Drizzle,
    PrimordialSea,
    // Electric
    EerieImpulse,
    RisingVoltage,
    Overdrive,
    // Fighting
    Revenge,
    Punishment,
    Justified,
    // Psychic
    Amnesia,
    LightScreen,
    EerieSpell,
    // Dark
    HoneClaws,
    Assurance,
    BeatUp,
    // Steel
    SteelSurge,
    SteelSpike,
    // Ground
    Tiller,
    Digger,
    Driller,
    DeepMiner,
    // Poison
    PoisonGas,
    Toxic,
    Venom,
    // Dragon
    DragonEnergy,
    DragonScales,
    DragonDance,
    // Bug
    Swarm,
    Infestation,
    Horde,
    HeartOfTheSwarm,
    // Flying
    Tailwind,
    FeatherDance,
    MaxAirflow,
    MaxGuard,
    // Ice
    FrostBite,
    SheerCold,
    AbsoluteZero,
    // Fairy
    FairyWind,
    StrangeSteam,
    Moonblast,
    // Ghost
    Haunt,
    Torment,
    Spite,
    Doom,
    // Terrain, board-wide
    GrassyTerrain,
    ElectricTerrain,
    MistyTerrain,
    PsychicTerrain,
    // Weather
    Rainy,
    Sunny,
    Sandstorm,
    Snowy,
    Nightfall,
    Misty,
    Stormy,
    Windy,
}

impl Effect {
    pub fn is_terrain(self) -> bool {
        matches!(
            self,
            Effect::GrassyTerrain
                | Effect::ElectricTerrain
                | Effect::MistyTerrain
                | Effect::PsychicTerrain
        )
    }
}

/// A set of active effect tags, for a whole side or a single unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSet(BTreeSet<Effect>);

impl EffectSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, effect: Effect) -> bool {
        self.0.insert(effect)
    }

    pub fn contains(&self, effect: Effect) -> bool {
        self.0.contains(&effect)
    }

    pub fn contains_any(&self, effects: &[Effect]) -> bool {
        effects.iter().any(|e| self.0.contains(e))
    }

    pub fn iter(&self) -> impl Iterator<Item = Effect> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn extend(&mut self, other: &EffectSet) {
        self.0.extend(other.0.iter().copied());
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<Effect> for EffectSet {
    fn from_iter<I: IntoIterator<Item = Effect>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_follows_declaration_order() {
        let set: EffectSet = [Effect::Doom, Effect::Stamina, Effect::Blaze]
            .into_iter()
            .collect();
        let order: Vec<Effect> = set.iter().collect();
        assert_eq!(order, vec![Effect::Stamina, Effect::Blaze, Effect::Doom]);
    }

    #[test]
    fn test_extend_unions() {
        let mut a: EffectSet = [Effect::Stamina].into_iter().collect();
        let b: EffectSet = [Effect::Stamina, Effect::MistyTerrain].into_iter().collect();
        a.extend(&b);
        assert_eq!(a.len(), 2);
        assert!(a.contains_any(&[Effect::Blaze, Effect::MistyTerrain]));
    }
}
