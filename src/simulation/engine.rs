//! Match orchestrator
//!
//! Construction runs the whole setup phase: both rosters are placed, every
//! unit goes through the effect pipeline, Bug tiers summon their clones and
//! each side's post-effects run once. After that the host drives the match
//! with `advance(dt)` until a side is wiped out or `stop()` is called.
//!
//! Each tick checks for elimination first, then feeds telemetry and updates
//! every unit, and finally runs the storm hazard when the weather calls for it.

use rand::Rng;

use crate::board::grid::Board;
use crate::board::placement::{board_coord, closest_available_cell};
use crate::core::config::SimulationConfig;
use crate::core::error::{ArenaError, Result};
use crate::core::types::{Coord, MatchId, Millis, Owner, PlayerId, Team, UnitId};
use crate::effects::effect::EffectSet;
use crate::effects::pipeline::resolve_unit;
use crate::effects::post::apply_post_effects;
use crate::effects::synergy::summon_count;
use crate::effects::weather::{Weather, STORM_IMMUNE_TYPE};
use crate::simulation::events::{BoardEvent, BoardEventKind, MatchEventKind, MatchEventLog};
use crate::simulation::outcome::{MatchPhase, MatchResult, Winner};
use crate::simulation::setup::{MatchSetup, SideSetup};
use crate::telemetry::meter::TeamTelemetry;
use crate::unit::contract::{AttackType, CombatUnit, UnitAction};
use crate::unit::roster::Roster;
use crate::unit::source::RosterUnit;

/// Everything one side owns during a match
#[derive(Debug, Clone)]
struct Side<U> {
    owner: Owner,
    roster: Roster<U>,
    effects: EffectSet,
    telemetry: TeamTelemetry,
}

impl<U: CombatUnit> Side<U> {
    fn new(team: Team, owner: Owner, effects: EffectSet) -> Self {
        Self {
            owner,
            roster: Roster::new(team),
            effects,
            telemetry: TeamTelemetry::new(),
        }
    }
}

/// One match between a blue and a red side
pub struct Simulation<U: CombatUnit, R: Rng> {
    id: MatchId,
    config: SimulationConfig,
    board: Board,
    blue: Side<U>,
    red: Side<U>,
    weather: Weather,
    stage_level: u32,
    /// Time left until the next lightning strike
    storm_countdown: Millis,
    elapsed: Millis,
    phase: MatchPhase,
    winner: Option<Winner>,
    rng: R,
}

impl<U: CombatUnit, R: Rng> Simulation<U, R> {
    /// Build a match and run its setup phase
    pub fn new(config: SimulationConfig, setup: MatchSetup, rng: R) -> Result<Self> {
        config.validate()?;

        let blue = Side::new(
            Team::Blue,
            setup.blue.owner,
            setup.blue.team_effects(setup.terrain),
        );
        let red = Side::new(
            Team::Red,
            setup.red.owner,
            setup.red.team_effects(setup.terrain),
        );

        let mut sim = Self {
            id: setup.id,
            board: Board::new(config.board_width, config.board_height),
            config,
            blue,
            red,
            weather: setup.weather,
            stage_level: setup.stage_level,
            storm_countdown: 0.0,
            elapsed: 0.0,
            phase: MatchPhase::Setup,
            winner: None,
            rng,
        };
        sim.storm_countdown = sim.roll_storm_countdown();

        for team in Team::BOTH {
            for source in setup.side(team).board_units() {
                sim.add_unit(team, source);
            }
        }
        for team in Team::BOTH {
            sim.spawn_clones(team, setup.side(team));
        }
        for team in Team::BOTH {
            let (own, opponent) = match team {
                Team::Blue => (&mut sim.blue, &mut sim.red),
                Team::Red => (&mut sim.red, &mut sim.blue),
            };
            apply_post_effects(&mut own.roster, &mut opponent.roster, &sim.board, &own.effects);
        }

        sim.phase = MatchPhase::Running;
        tracing::info!(
            "Match {} started: {} blue vs {} red units, weather {:?}",
            sim.id,
            sim.blue.roster.len(),
            sim.red.roster.len(),
            sim.weather
        );
        Ok(sim)
    }

    /// Place a source unit at its mapped cell and resolve its effects.
    ///
    /// An occupied target cell falls back to the closest free one. Returns
    /// `None` when the unit cannot be placed.
    pub fn add_unit(&mut self, team: Team, source: &RosterUnit) -> Option<UnitId> {
        let mapped = board_coord(source.position_x, source.position_y, team, self.board.height())
            .filter(|c| self.board.in_bounds(c.x, c.y));
        let Some(coord) = mapped else {
            tracing::warn!(
                "{} ({}) has no {:?} cell for ({}, {})",
                source.name,
                source.id,
                team,
                source.position_x,
                source.position_y
            );
            return None;
        };

        let coord = if self.board.is_free(coord.x, coord.y) {
            coord
        } else {
            let Some(fallback) =
                closest_available_cell(&self.board, source.position_x, source.position_y, team)
            else {
                tracing::warn!("Board full, {} ({}) not placed", source.name, source.id);
                return None;
            };
            tracing::warn!(
                "Cell ({}, {}) taken, {} moved to ({}, {})",
                coord.x,
                coord.y,
                source.name,
                fallback.x,
                fallback.y
            );
            fallback
        };

        self.place(team, source, coord, source.id, false)
    }

    fn place(
        &mut self,
        team: Team,
        source: &RosterUnit,
        coord: Coord,
        id: UnitId,
        is_clone: bool,
    ) -> Option<UnitId> {
        let opponent = match team {
            Team::Blue => &self.red.roster,
            Team::Red => &self.blue.roster,
        };
        debug_assert!(
            !opponent.contains(id),
            "duplicate unit {id} already placed for {:?}",
            team.opponent()
        );
        if opponent.contains(id) {
            tracing::warn!(
                "Dropping {} ({}) for {:?}, id already placed for {:?}",
                source.name,
                id,
                team,
                team.opponent()
            );
            return None;
        }

        let side = match team {
            Team::Blue => &mut self.blue,
            Team::Red => &mut self.red,
        };

        let mut unit = U::spawn(source, coord, team, id);
        unit.set_clone(is_clone);
        if side.owner.is_pve() && self.stage_level > 0 {
            unit.add_max_hp(self.stage_level as f32 * self.config.pve_hp_per_stage, true);
        }
        resolve_unit(&mut unit, &side.effects, self.weather, &self.config, &mut self.rng);

        if !side.roster.insert(unit) {
            return None;
        }
        side.telemetry.register(id);
        self.board.set(coord.x, coord.y, Some(id));
        tracing::debug!(
            "Placed {} ({}) for {:?} at ({}, {})",
            source.name,
            id,
            team,
            coord.x,
            coord.y
        );
        Some(id)
    }

    fn spawn_clones(&mut self, team: Team, side: &SideSetup) {
        let effects = match team {
            Team::Blue => &self.blue.effects,
            Team::Red => &self.red.effects,
        };
        let count = summon_count(effects);
        if count == 0 {
            return;
        }

        for template in side.clone_templates(count) {
            let Some(coord) = closest_available_cell(
                &self.board,
                template.position_x,
                template.position_y,
                team,
            ) else {
                tracing::warn!("Board full, skipping clone of {}", template.name);
                return;
            };
            let id = UnitId::from_rng(&mut self.rng);
            if self.place(team, template, coord, id, true).is_some() {
                tracing::debug!("Cloned {} for {:?}", template.name, team);
            }
        }
    }

    /// Advance the match by `dt` milliseconds
    pub fn advance(&mut self, dt: Millis) -> MatchEventLog {
        let mut events = MatchEventLog::new();

        if self.is_finished() {
            return events;
        }
        self.elapsed += dt;

        // ===== PHASE 1: ELIMINATION =====
        if self.check_elimination(&mut events) {
            return events;
        }

        // ===== PHASE 2: UNITS =====
        for team in Team::BOTH {
            self.tick_side(team, dt, &mut events);
        }

        // ===== PHASE 3: HAZARDS =====
        if self.weather == Weather::Storm {
            self.tick_storm(dt, &mut events);
        }

        events
    }

    fn check_elimination(&mut self, events: &mut MatchEventLog) -> bool {
        let (winner, survivors) = match (self.blue.roster.is_empty(), self.red.roster.is_empty()) {
            (false, false) => return false,
            (true, true) => (Winner::Draw, None),
            (false, true) => (Winner::from(self.blue.owner), Some(&mut self.blue.roster)),
            (true, false) => (Winner::from(self.red.owner), Some(&mut self.red.roster)),
        };

        if let Some(roster) = survivors {
            for unit in roster.iter_mut() {
                unit.status_mut().clear_negative();
                unit.set_action(UnitAction::Hop);
            }
        }

        self.phase = MatchPhase::Finished;
        self.winner = Some(winner);
        events.push(MatchEventKind::MatchFinished { winner }, self.elapsed);
        tracing::info!(
            "Match {} finished after {:.0} ms: {:?}",
            self.id,
            self.elapsed,
            winner
        );
        true
    }

    fn tick_side(&mut self, team: Team, dt: Millis, events: &mut MatchEventLog) {
        let side = match team {
            Team::Blue => &mut self.blue,
            Team::Red => &mut self.red,
        };

        for id in side.roster.ids() {
            let Some(unit) = side.roster.get_mut(id) else {
                continue;
            };
            side.telemetry
                .record(id, unit.damage_totals(), unit.heal_totals());

            if unit.is_defeated() {
                let coord = unit.coord();
                side.roster.remove(id);
                if self.board.get(coord.x, coord.y) == Some(id) {
                    self.board.set(coord.x, coord.y, None);
                }
                events.push(MatchEventKind::UnitDefeated { unit: id, team }, self.elapsed);
                tracing::debug!("{} removed from {:?} roster", id, team);
            } else {
                unit.update(dt, &self.board, self.weather, &side.owner);
            }
        }
    }

    fn tick_storm(&mut self, dt: Millis, events: &mut MatchEventLog) {
        self.storm_countdown -= dt;
        if self.storm_countdown > 0.0 {
            return;
        }
        self.storm_countdown = self.roll_storm_countdown();

        let coord = Coord::new(
            self.rng.gen_range(0..self.board.width()),
            self.rng.gen_range(0..self.board.height()),
        );

        if let Some(id) = self.board.get(coord.x, coord.y) {
            let target = self
                .blue
                .roster
                .get_mut(id)
                .or_else(|| self.red.roster.get_mut(id));
            if let Some(unit) = target {
                if unit.has_type(STORM_IMMUNE_TYPE) {
                    tracing::debug!("Lightning at ({}, {}) grounded by {}", coord.x, coord.y, id);
                } else {
                    let damage = unit.take_damage(self.config.lightning_damage, AttackType::True);
                    events.push(MatchEventKind::UnitStruck { unit: id, damage }, self.elapsed);
                    tracing::debug!(
                        "Lightning hit {} at ({}, {}) for {:.0}",
                        id,
                        coord.x,
                        coord.y,
                        damage
                    );
                }
            }
        }

        events.push(
            MatchEventKind::Board(BoardEvent {
                match_id: self.id,
                kind: BoardEventKind::Lightning,
                coord: Some(coord),
            }),
            self.elapsed,
        );
    }

    fn roll_storm_countdown(&mut self) -> Millis {
        self.rng
            .gen_range(self.config.storm_min_ms..=self.config.storm_max_ms) as Millis
    }

    /// Tear the match down before it finishes on its own.
    ///
    /// Rosters and board are emptied and the winner is cleared; telemetry
    /// stays readable.
    pub fn stop(&mut self) -> BoardEvent {
        self.blue.roster.clear();
        self.red.roster.clear();
        self.board.clear();
        self.weather = Weather::Neutral;
        self.winner = None;
        self.phase = MatchPhase::Finished;
        tracing::info!("Match {} stopped after {:.0} ms", self.id, self.elapsed);

        BoardEvent {
            match_id: self.id,
            kind: BoardEventKind::SimulationStopped,
            coord: None,
        }
    }

    /// Result for a player from current roster sizes, `None` if the player
    /// is not in this match
    pub fn outcome_for(&self, player: PlayerId) -> Option<MatchResult> {
        Team::BOTH
            .into_iter()
            .find(|team| self.owner(*team).player_id() == Some(player))
            .map(|team| self.result_for(team))
    }

    pub fn result_for(&self, team: Team) -> MatchResult {
        MatchResult::from_roster_sizes(
            self.roster(team).len(),
            self.roster(team.opponent()).len(),
        )
    }

    /// Move a unit to a free cell, keeping board and unit coordinates in sync.
    ///
    /// Returns `Ok(false)` for an unknown unit or an occupied cell.
    pub fn move_unit(&mut self, id: UnitId, to: Coord) -> Result<bool> {
        if !self.board.in_bounds(to.x, to.y) {
            return Err(ArenaError::OutOfBounds {
                x: to.x,
                y: to.y,
                width: self.board.width(),
                height: self.board.height(),
            });
        }
        if !self.board.is_free(to.x, to.y) {
            return Ok(false);
        }
        let Some(unit) = self.unit_mut(id) else {
            return Ok(false);
        };
        let from = unit.coord();
        unit.set_coord(to);

        if self.board.get(from.x, from.y) == Some(id) {
            self.board.set(from.x, from.y, None);
        }
        self.board.set(to.x, to.y, Some(id));
        Ok(true)
    }

    fn side(&self, team: Team) -> &Side<U> {
        match team {
            Team::Blue => &self.blue,
            Team::Red => &self.red,
        }
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn roster(&self, team: Team) -> &Roster<U> {
        &self.side(team).roster
    }

    pub fn owner(&self, team: Team) -> Owner {
        self.side(team).owner
    }

    /// Team-wide effect tags, read-only for UI
    pub fn effects(&self, team: Team) -> &EffectSet {
        &self.side(team).effects
    }

    pub fn telemetry(&self, team: Team) -> &TeamTelemetry {
        &self.side(team).telemetry
    }

    pub fn unit(&self, id: UnitId) -> Option<&U> {
        self.blue.roster.get(id).or_else(|| self.red.roster.get(id))
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut U> {
        match self.blue.roster.get_mut(id) {
            Some(unit) => Some(unit),
            None => self.red.roster.get_mut(id),
        }
    }

    pub fn weather(&self) -> Weather {
        self.weather
    }

    pub fn stage_level(&self) -> u32 {
        self.stage_level
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == MatchPhase::Finished
    }

    pub fn elapsed(&self) -> Millis {
        self.elapsed
    }

    pub fn storm_countdown(&self) -> Millis {
        self.storm_countdown
    }
}
