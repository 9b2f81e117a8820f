//! Declarative unit mutations
//!
//! Every rule table (synergy, terrain, item, weather) is a list of
//! `Mutation`s. Applying a rule is a linear walk over its list.

use crate::core::types::Millis;
use crate::effects::effect::Effect;
use crate::effects::synergy::Synergy;
use crate::unit::contract::CombatUnit;
use crate::unit::stats::StatKind;
use crate::unit::status::StatusKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mutation {
    /// Flat additive change
    Add(StatKind, f32),
    /// Additive change proportional to the stat's current value
    Scale(StatKind, f32),
    /// Start a timed status
    Status(StatusKind, Millis),
    /// Permanent immunity to a status
    Immunity(StatusKind),
    /// Guaranteed revival on lethal damage
    Revival,
}

impl Mutation {
    pub fn apply<U: CombatUnit + ?Sized>(&self, unit: &mut U) {
        match *self {
            Mutation::Add(stat, delta) => unit.add_stat(stat, delta, true),
            Mutation::Scale(stat, factor) => {
                let delta = unit.stats().get(stat) * factor;
                unit.add_stat(stat, delta, true);
            }
            Mutation::Status(kind, duration) => {
                unit.trigger_status(kind, duration, None);
            }
            Mutation::Immunity(kind) => unit.status_mut().grant_immunity(kind),
            Mutation::Revival => unit.grant_resurrection(),
        }
    }
}

pub fn apply_all<U: CombatUnit + ?Sized>(mutations: &[Mutation], unit: &mut U) {
    for mutation in mutations {
        mutation.apply(unit);
    }
}

/// One row of the effect table
#[derive(Debug, Clone, Copy)]
pub struct EffectRule {
    pub effect: Effect,
    /// Type a unit must have to receive the effect; `None` applies to everyone
    pub required: Option<Synergy>,
    pub mutations: &'static [Mutation],
}

impl EffectRule {
    pub fn applies_to<U: CombatUnit + ?Sized>(&self, unit: &U) -> bool {
        self.required.map_or(true, |synergy| unit.has_type(synergy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Coord, Team, UnitId};
    use crate::unit::entity::BattleUnit;
    use crate::unit::source::RosterUnit;

    fn unit() -> BattleUnit {
        BattleUnit::spawn(&RosterUnit::new("Machop", 0, 1), Coord::new(0, 0), Team::Blue, UnitId::new())
    }

    #[test]
    fn test_scale_uses_current_value() {
        let mut u = unit();
        u.stats.attack = 20.0;
        Mutation::Scale(StatKind::Attack, 0.5).apply(&mut u);
        assert_eq!(u.stats.attack, 30.0);
    }

    #[test]
    fn test_max_hp_add_cascades_to_hp() {
        let mut u = unit();
        Mutation::Add(StatKind::MaxHp, 40.0).apply(&mut u);
        assert_eq!(u.stats.hp, 140.0);
    }

    #[test]
    fn test_status_and_revival() {
        let mut u = unit();
        apply_all(
            &[Mutation::Status(StatusKind::Burn, 1000.0), Mutation::Revival],
            &mut u,
        );
        assert!(u.status.is_active(StatusKind::Burn));
        assert!(u.status.resurrection);
    }

    #[test]
    fn test_rule_requirement() {
        let rule = EffectRule {
            effect: Effect::Revenge,
            required: Some(Synergy::Fighting),
            mutations: &[],
        };
        let mut u = unit();
        assert!(!rule.applies_to(&u));
        u.types.push(Synergy::Fighting);
        assert!(rule.applies_to(&u));

        let universal = EffectRule {
            effect: Effect::MistyTerrain,
            required: None,
            mutations: &[],
        };
        assert!(universal.applies_to(&unit()));
    }
}
