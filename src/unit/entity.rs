//! Reference combat unit
//!
//! `BattleUnit` implements the orchestrator contract with status upkeep only:
//! damage-over-time, curse expiry and guaranteed revival. Targeting and
//! ability casting belong to richer implementations behind the same trait.

use serde::{Deserialize, Serialize};

use crate::board::grid::Board;
use crate::core::types::{Coord, Millis, Owner, Team, UnitId};
use crate::effects::effect::EffectSet;
use crate::effects::items::ItemSet;
use crate::effects::synergy::Synergy;
use crate::effects::weather::Weather;
use crate::unit::contract::{CombatUnit, DamageTotals, HealTotals, UnitAction};
use crate::unit::source::{Passive, Rarity, RosterUnit};
use crate::unit::stats::UnitStats;
use crate::unit::status::{StatusKind, StatusRecord};

/// Time between lethal damage and standing back up
pub const REVIVAL_DELAY_MS: Millis = 1000.0;
/// Fraction of max HP lost per second while burning
pub const BURN_RATE_PER_SECOND: f32 = 0.05;
/// Fraction of max HP lost per second per poison stack
pub const POISON_RATE_PER_SECOND: f32 = 0.025;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleUnit {
    pub id: UnitId,
    pub name: String,
    pub team: Team,
    pub coord: Coord,
    pub rarity: Rarity,
    pub passive: Passive,
    pub types: Vec<Synergy>,
    pub items: ItemSet,
    pub stats: UnitStats,
    pub status: StatusRecord,
    pub effects: EffectSet,
    pub is_clone: bool,
    pub action: UnitAction,
    /// Cumulative damage dealt, read by the telemetry meters
    pub damage_dealt: DamageTotals,
    /// Cumulative healing and shielding done
    pub support_done: HealTotals,
    /// Milliseconds this unit has been alive in the match
    pub elapsed: Millis,
}

impl BattleUnit {
    fn tick_damage_over_time(&mut self, dt: Millis) {
        let seconds = dt / 1000.0;
        if self.status.is_active(StatusKind::Burn) {
            self.stats.hp -= self.stats.max_hp * BURN_RATE_PER_SECOND * seconds;
        }
        if self.status.is_active(StatusKind::Poison) {
            let stacks = self.status.poison_stacks.max(1) as f32;
            self.stats.hp -= self.stats.max_hp * POISON_RATE_PER_SECOND * stacks * seconds;
        }
    }

    fn begin_revival(&mut self) {
        self.status.resurrection = false;
        self.status.resurrecting = true;
        self.status.revive_timer = REVIVAL_DELAY_MS;
        self.status.clear_negative();
        self.stats.hp = self.stats.max_hp;
        self.action = UnitAction::Idle;
        tracing::debug!("{} ({}) is reviving", self.name, self.id);
    }
}

impl CombatUnit for BattleUnit {
    fn spawn(source: &RosterUnit, coord: Coord, team: Team, id: UnitId) -> Self {
        let mut stats = source.stats.clone();
        stats.hp = stats.max_hp;
        Self {
            id,
            name: source.name.clone(),
            team,
            coord,
            rarity: source.rarity,
            passive: source.passive,
            types: source.types.clone(),
            items: source.items.iter().copied().collect(),
            stats,
            status: StatusRecord::new(),
            effects: EffectSet::new(),
            is_clone: false,
            action: UnitAction::Idle,
            damage_dealt: DamageTotals::default(),
            support_done: HealTotals::default(),
            elapsed: 0.0,
        }
    }

    fn id(&self) -> UnitId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn team(&self) -> Team {
        self.team
    }

    fn coord(&self) -> Coord {
        self.coord
    }

    fn set_coord(&mut self, coord: Coord) {
        self.coord = coord;
    }

    fn rarity(&self) -> Rarity {
        self.rarity
    }

    fn passive(&self) -> Passive {
        self.passive
    }

    fn types(&self) -> &[Synergy] {
        &self.types
    }

    fn items(&self) -> &ItemSet {
        &self.items
    }

    fn items_mut(&mut self) -> &mut ItemSet {
        &mut self.items
    }

    fn stats(&self) -> &UnitStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut UnitStats {
        &mut self.stats
    }

    fn status(&self) -> &StatusRecord {
        &self.status
    }

    fn status_mut(&mut self) -> &mut StatusRecord {
        &mut self.status
    }

    fn effects(&self) -> &EffectSet {
        &self.effects
    }

    fn effects_mut(&mut self) -> &mut EffectSet {
        &mut self.effects
    }

    fn is_clone(&self) -> bool {
        self.is_clone
    }

    fn set_clone(&mut self, is_clone: bool) {
        self.is_clone = is_clone;
    }

    fn action(&self) -> UnitAction {
        self.action
    }

    fn set_action(&mut self, action: UnitAction) {
        self.action = action;
    }

    fn damage_totals(&self) -> DamageTotals {
        self.damage_dealt
    }

    fn heal_totals(&self) -> HealTotals {
        self.support_done
    }

    fn update(&mut self, dt: Millis, _board: &Board, _weather: Weather, _owner: &Owner) {
        if self.status.resurrecting {
            self.status.revive_timer -= dt;
            if self.status.revive_timer <= 0.0 {
                self.status.resurrecting = false;
                self.status.revive_timer = 0.0;
            }
            return;
        }

        if self.stats.hp <= 0.0 {
            if self.status.resurrection {
                self.begin_revival();
            }
            return;
        }

        self.elapsed += dt;
        self.tick_damage_over_time(dt);

        let expired = self.status.tick(dt);
        if expired.contains(&StatusKind::Curse) {
            tracing::debug!("{} ({}) succumbed to a curse", self.name, self.id);
            self.stats.hp = 0.0;
        }
    }
}
