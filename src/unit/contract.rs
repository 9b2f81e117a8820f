//! The combat-unit contract the orchestrator depends on
//!
//! The orchestrator, the effect pipeline and the post-effects only ever talk
//! to a unit through [`CombatUnit`]. Implementors supply state accessors and a
//! per-tick `update`; stat mutators and status triggers are provided on top of
//! those accessors so every implementation clamps and cascades the same way.

use serde::{Deserialize, Serialize};

use crate::board::grid::Board;
use crate::core::types::{Coord, Millis, Owner, Team, UnitId};
use crate::effects::effect::EffectSet;
use crate::effects::items::ItemSet;
use crate::effects::synergy::Synergy;
use crate::effects::weather::Weather;
use crate::unit::source::{Passive, Rarity, RosterUnit};
use crate::unit::stats::{StatKind, UnitStats};
use crate::unit::status::{StatusKind, StatusRecord};

/// Defense reduces physical/special damage by `1 / (1 + ARMOR_FACTOR * defense)`
pub const ARMOR_FACTOR: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackType {
    Physical,
    Special,
    True,
}

/// Cumulative damage a unit has dealt since the match started
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DamageTotals {
    pub physical: f32,
    pub special: f32,
    pub true_damage: f32,
}

impl DamageTotals {
    pub fn total(&self) -> f32 {
        self.physical + self.special + self.true_damage
    }

    pub fn add(&mut self, attack_type: AttackType, amount: f32) {
        match attack_type {
            AttackType::Physical => self.physical += amount,
            AttackType::Special => self.special += amount,
            AttackType::True => self.true_damage += amount,
        }
    }
}

/// Cumulative healing and shielding a unit has provided
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HealTotals {
    pub heal: f32,
    pub shield: f32,
}

/// Visible action state, consumed by clients for animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitAction {
    #[default]
    Idle,
    Moving,
    Attacking,
    /// Victory hop once the opposing side is wiped out
    Hop,
}

pub trait CombatUnit {
    /// Build the in-match unit for a source roster slot
    fn spawn(source: &RosterUnit, coord: Coord, team: Team, id: UnitId) -> Self
    where
        Self: Sized;

    fn id(&self) -> UnitId;
    fn name(&self) -> &str;
    fn team(&self) -> Team;
    fn coord(&self) -> Coord;
    fn set_coord(&mut self, coord: Coord);
    fn rarity(&self) -> Rarity;
    fn passive(&self) -> Passive;
    fn types(&self) -> &[Synergy];

    fn items(&self) -> &ItemSet;
    fn items_mut(&mut self) -> &mut ItemSet;
    fn stats(&self) -> &UnitStats;
    fn stats_mut(&mut self) -> &mut UnitStats;
    fn status(&self) -> &StatusRecord;
    fn status_mut(&mut self) -> &mut StatusRecord;
    /// Effect tags granted to this unit, informational
    fn effects(&self) -> &EffectSet;
    fn effects_mut(&mut self) -> &mut EffectSet;

    fn is_clone(&self) -> bool;
    fn set_clone(&mut self, is_clone: bool);
    fn action(&self) -> UnitAction;
    fn set_action(&mut self, action: UnitAction);

    fn damage_totals(&self) -> DamageTotals;
    fn heal_totals(&self) -> HealTotals;

    /// Advance the unit's own behaviour by `dt` milliseconds
    fn update(&mut self, dt: Millis, board: &Board, weather: Weather, owner: &Owner);

    fn has_type(&self, synergy: Synergy) -> bool {
        self.types().contains(&synergy)
    }

    /// Dead and not about to come back; the orchestrator removes such units
    fn is_defeated(&self) -> bool {
        let status = self.status();
        self.stats().hp <= 0.0 && !status.resurrecting && !status.resurrection
    }

    /// Additive stat change. With `cascade`, dependent values follow: raising
    /// max HP also raises current HP by the same amount.
    fn add_stat(&mut self, stat: StatKind, delta: f32, cascade: bool) {
        self.stats_mut().add(stat, delta);
        if cascade {
            self.on_stat_changed(stat, delta);
        }
    }

    /// Recalculation hook run for cascading stat changes
    fn on_stat_changed(&mut self, stat: StatKind, delta: f32) {
        if stat == StatKind::MaxHp && delta > 0.0 {
            self.stats_mut().heal(delta);
        }
    }

    fn add_attack(&mut self, delta: f32, cascade: bool) {
        self.add_stat(StatKind::Attack, delta, cascade);
    }

    fn add_defense(&mut self, delta: f32, cascade: bool) {
        self.add_stat(StatKind::Defense, delta, cascade);
    }

    fn add_special_defense(&mut self, delta: f32, cascade: bool) {
        self.add_stat(StatKind::SpecialDefense, delta, cascade);
    }

    fn add_ability_power(&mut self, delta: f32, cascade: bool) {
        self.add_stat(StatKind::AbilityPower, delta, cascade);
    }

    fn add_crit_chance(&mut self, delta: f32, cascade: bool) {
        self.add_stat(StatKind::CritChance, delta, cascade);
    }

    fn add_crit_damage(&mut self, delta: f32, cascade: bool) {
        self.add_stat(StatKind::CritDamage, delta, cascade);
    }

    fn add_attack_speed(&mut self, delta: f32, cascade: bool) {
        self.add_stat(StatKind::AttackSpeed, delta, cascade);
    }

    fn add_range(&mut self, delta: f32, cascade: bool) {
        self.add_stat(StatKind::Range, delta, cascade);
    }

    fn add_max_hp(&mut self, delta: f32, cascade: bool) {
        self.add_stat(StatKind::MaxHp, delta, cascade);
    }

    fn add_shield(&mut self, delta: f32, cascade: bool) {
        self.add_stat(StatKind::Shield, delta, cascade);
    }

    fn add_mana(&mut self, delta: f32, cascade: bool) {
        self.add_stat(StatKind::Mana, delta, cascade);
    }

    fn add_dodge(&mut self, delta: f32, cascade: bool) {
        self.add_stat(StatKind::Dodge, delta, cascade);
    }

    fn trigger_status(&mut self, kind: StatusKind, duration: Millis, source: Option<UnitId>) -> bool {
        self.status_mut().trigger(kind, duration, source)
    }

    fn trigger_burn(&mut self, duration: Millis, source: Option<UnitId>) -> bool {
        self.trigger_status(StatusKind::Burn, duration, source)
    }

    fn trigger_poison(&mut self, duration: Millis, source: Option<UnitId>) -> bool {
        self.trigger_status(StatusKind::Poison, duration, source)
    }

    fn trigger_silence(&mut self, duration: Millis, source: Option<UnitId>) -> bool {
        self.trigger_status(StatusKind::Silence, duration, source)
    }

    fn trigger_paralysis(&mut self, duration: Millis, source: Option<UnitId>) -> bool {
        self.trigger_status(StatusKind::Paralysis, duration, source)
    }

    fn trigger_flinch(&mut self, duration: Millis, source: Option<UnitId>) -> bool {
        self.trigger_status(StatusKind::Flinch, duration, source)
    }

    fn trigger_curse(&mut self, duration: Millis, source: Option<UnitId>) -> bool {
        self.trigger_status(StatusKind::Curse, duration, source)
    }

    fn trigger_protect(&mut self, duration: Millis) -> bool {
        self.trigger_status(StatusKind::Protect, duration, None)
    }

    fn trigger_rune_protect(&mut self, duration: Millis) -> bool {
        self.trigger_status(StatusKind::RuneProtect, duration, None)
    }

    fn grant_resurrection(&mut self) {
        self.status_mut().resurrection = true;
    }

    /// Apply incoming damage: defenses first, then shield, then HP.
    /// Returns the amount actually absorbed.
    fn take_damage(&mut self, amount: f32, attack_type: AttackType) -> f32 {
        if amount <= 0.0 || self.status().is_active(StatusKind::Protect) {
            return 0.0;
        }
        let stats = self.stats_mut();
        let reduced = match attack_type {
            AttackType::Physical => amount / (1.0 + ARMOR_FACTOR * stats.defense),
            AttackType::Special => amount / (1.0 + ARMOR_FACTOR * stats.special_defense),
            AttackType::True => amount,
        };
        let to_shield = reduced.min(stats.shield);
        stats.shield -= to_shield;
        let to_hp = (reduced - to_shield).min(stats.hp.max(0.0));
        stats.hp -= reduced - to_shield;
        to_shield + to_hp
    }
}
