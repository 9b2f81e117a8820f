//! Per-unit effect resolution at placement time
//!
//! Order is fixed: synergy, items, weather, passive-vs-weather. Within the
//! item step a `MysteryBox` is rolled before any item applies so the rolled
//! items resolve like any other held item.

use rand::Rng;

use crate::core::config::SimulationConfig;
use crate::effects::effect::{Effect, EffectSet};
use crate::effects::items::{item_rule, random_basic_item, random_rollable_item, Item};
use crate::effects::mutation::{apply_all, EffectRule};
use crate::effects::synergy::synergy_rule;
use crate::effects::weather::{terrain_rule, Weather};
use crate::unit::contract::CombatUnit;
use crate::unit::source::Passive;

/// Rule for a team-wide tag, synergy or terrain
pub fn team_rule(effect: Effect) -> Option<&'static EffectRule> {
    synergy_rule(effect).or_else(|| terrain_rule(effect))
}

/// Run the full pipeline for one freshly placed unit
pub fn resolve_unit<U, R>(
    unit: &mut U,
    team_effects: &EffectSet,
    weather: Weather,
    config: &SimulationConfig,
    rng: &mut R,
) where
    U: CombatUnit + ?Sized,
    R: Rng + ?Sized,
{
    apply_synergy_effects(unit, team_effects);
    apply_item_effects(unit, config, rng);
    apply_weather_effects(unit, weather);
    apply_passive_weather(unit, weather);
}

pub fn apply_synergy_effects<U: CombatUnit + ?Sized>(unit: &mut U, team_effects: &EffectSet) {
    for effect in team_effects.iter() {
        // Tags without a rule fall through
        let Some(rule) = team_rule(effect) else {
            continue;
        };
        if !rule.applies_to(unit) {
            continue;
        }
        apply_all(rule.mutations, unit);
        unit.effects_mut().insert(effect);
    }
}

pub fn apply_item_effects<U, R>(unit: &mut U, config: &SimulationConfig, rng: &mut R)
where
    U: CombatUnit + ?Sized,
    R: Rng + ?Sized,
{
    if unit.passive() == Passive::Pickup && unit.items().is_empty() {
        if let Some(item) = random_basic_item(rng) {
            tracing::debug!("{} picked up {:?}", unit.id(), item);
            unit.items_mut().insert(item);
        }
    }

    if unit.items_mut().remove(Item::MysteryBox) {
        for _ in 0..config.randomizer_rolls {
            if unit.items().len() >= config.max_held_items {
                break;
            }
            if let Some(item) = random_rollable_item(rng) {
                unit.items_mut().insert(item);
            }
        }
        tracing::debug!("{} rolled a MysteryBox into {} items", unit.id(), unit.items().len());
    }

    let held: Vec<Item> = unit.items().iter().collect();
    for item in held {
        if let Some(mutations) = item_rule(item) {
            apply_all(mutations, unit);
        }
    }
}

pub fn apply_weather_effects<U: CombatUnit + ?Sized>(unit: &mut U, weather: Weather) {
    if let Some(rule) = weather.rule() {
        if rule.applies_to(unit) {
            apply_all(rule.mutations, unit);
            unit.effects_mut().insert(rule.effect);
        }
    }
}

pub fn apply_passive_weather<U: CombatUnit + ?Sized>(unit: &mut U, weather: Weather) {
    if let Some(mutations) = weather.passive_bonus(unit.passive()) {
        apply_all(mutations, unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Coord, Team, UnitId};
    use crate::effects::synergy::Synergy;
    use crate::unit::entity::BattleUnit;
    use crate::unit::source::RosterUnit;
    use crate::unit::status::StatusKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn spawn(source: RosterUnit) -> BattleUnit {
        BattleUnit::spawn(&source, Coord::new(0, 0), Team::Blue, UnitId::new())
    }

    #[test]
    fn test_synergy_requires_type() {
        let effects: EffectSet = [Effect::Revenge].into_iter().collect();
        let mut fighter = spawn(RosterUnit::new("Machop", 0, 1).with_types(&[Synergy::Fighting]));
        let mut bystander = spawn(RosterUnit::new("Pidgey", 1, 1).with_types(&[Synergy::Flying]));

        apply_synergy_effects(&mut fighter, &effects);
        apply_synergy_effects(&mut bystander, &effects);

        assert_eq!(fighter.stats.attack, 13.0);
        assert!(fighter.effects.contains(Effect::Revenge));
        assert_eq!(bystander.stats.attack, 10.0);
        assert!(bystander.effects.is_empty());
    }

    #[test]
    fn test_terrain_applies_to_everyone() {
        let effects: EffectSet = [Effect::PsychicTerrain].into_iter().collect();
        let mut unit = spawn(RosterUnit::new("Geodude", 0, 1));
        apply_synergy_effects(&mut unit, &effects);
        assert_eq!(unit.stats.ability_power, 20.0);
        assert!(unit.effects.contains(Effect::PsychicTerrain));
    }

    #[test]
    fn test_mystery_box_rolls_before_items_resolve() {
        let config = SimulationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut unit = spawn(RosterUnit::new("Ditto", 0, 1).with_items(&[Item::MysteryBox]));

        apply_item_effects(&mut unit, &config, &mut rng);

        assert!(!unit.items.contains(Item::MysteryBox));
        assert!(!unit.items.is_empty());
        assert!(unit.items.len() <= config.randomizer_rolls);
    }

    #[test]
    fn test_mystery_box_respects_item_cap() {
        let config = SimulationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut unit = spawn(RosterUnit::new("Ditto", 0, 1).with_items(&[
            Item::MysteryBox,
            Item::Charcoal,
            Item::Magnet,
        ]));

        apply_item_effects(&mut unit, &config, &mut rng);

        assert!(unit.items.len() <= config.max_held_items);
        assert!(unit.items.contains(Item::Charcoal));
    }

    #[test]
    fn test_pickup_only_when_empty_handed() {
        let config = SimulationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut empty = spawn(RosterUnit::new("Meowth", 0, 1).with_passive(Passive::Pickup));
        let mut holding = spawn(
            RosterUnit::new("Meowth", 1, 1)
                .with_passive(Passive::Pickup)
                .with_items(&[Item::Leftovers]),
        );

        apply_item_effects(&mut empty, &config, &mut rng);
        apply_item_effects(&mut holding, &config, &mut rng);

        assert_eq!(empty.items.len(), 1);
        assert_eq!(holding.items.len(), 1);
        assert!(holding.items.contains(Item::Leftovers));
    }

    #[test]
    fn test_item_statuses_trigger() {
        let config = SimulationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut unit = spawn(
            RosterUnit::new("Snorlax", 0, 1).with_items(&[Item::FlameOrb, Item::MaxRevive]),
        );

        apply_item_effects(&mut unit, &config, &mut rng);

        assert!(unit.status.is_active(StatusKind::Burn));
        assert!(unit.status.resurrection);
        assert_eq!(unit.stats.attack, 13.0);
    }

    #[test]
    fn test_weather_recorded_and_passive_bonus() {
        let mut unit = spawn(RosterUnit::new("Oddish", 0, 1).with_passive(Passive::Chlorophyll));
        apply_weather_effects(&mut unit, Weather::Sun);
        apply_passive_weather(&mut unit, Weather::Sun);

        assert!(unit.effects.contains(Effect::Sunny));
        assert_eq!(unit.stats.crit_chance, 15.0);
        assert!((unit.stats.attack_speed - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_neutral_weather_is_noop() {
        let mut unit = spawn(RosterUnit::new("Oddish", 0, 1).with_passive(Passive::Chlorophyll));
        let before = unit.stats.clone();
        apply_weather_effects(&mut unit, Weather::Neutral);
        apply_passive_weather(&mut unit, Weather::Neutral);
        assert_eq!(unit.stats, before);
        assert!(unit.effects.is_empty());
    }
}
