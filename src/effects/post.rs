//! Roster-wide post-effects
//!
//! Runs once per side after every unit of both sides went through the
//! per-unit pipeline. Each step first collects what it will change, then
//! applies it, so a step never reads values it already modified.

use crate::board::grid::Board;
use crate::core::types::{Coord, UnitId};
use crate::effects::constants::*;
use crate::effects::effect::{Effect, EffectSet};
use crate::effects::items::Item;
use crate::unit::contract::CombatUnit;
use crate::unit::roster::Roster;
use crate::unit::source::Passive;
use crate::unit::stats::{StatKind, UnitStats};
use crate::unit::status::StatusKind;

/// Stacking Normal tags and the shield each one grants
pub const TIER_SHIELDS: &[(Effect, f32)] = &[
    (Effect::Stamina, STAMINA_SHIELD),
    (Effect::Strength, STRENGTH_SHIELD),
    (Effect::RockSmash, ROCK_SMASH_SHIELD),
    (Effect::PurePower, PURE_POWER_SHIELD),
];

pub const PASSIVE_IMMUNITIES: &[(Passive, StatusKind)] = &[
    (Passive::WaterVeil, StatusKind::Burn),
    (Passive::Limber, StatusKind::Paralysis),
    (Passive::Insomnia, StatusKind::Sleep),
    (Passive::Immunity, StatusKind::Poison),
];

/// Ghost tags in chain order; holding tier N runs the first N stages
pub const DEBUFF_CHAIN: &[Effect] = &[Effect::Haunt, Effect::Torment, Effect::Spite, Effect::Doom];

/// Run every post-effect for `own`, whose team-wide set is `team_effects`
pub fn apply_post_effects<U: CombatUnit>(
    own: &mut Roster<U>,
    opponents: &mut Roster<U>,
    board: &Board,
    team_effects: &EffectSet,
) {
    apply_high_tier_grants(own);
    apply_tier_shields(own, board);
    apply_aura_items(own, board);
    apply_passive_immunities(own);
    apply_debuff_chain(opponents, team_effects);
}

pub fn apply_high_tier_grants<U: CombatUnit>(roster: &mut Roster<U>) {
    for unit in roster.iter_mut() {
        let tier = unit.rarity().tier() as f32;
        if unit.effects().contains(Effect::MaxGuard) {
            unit.add_shield(MAX_GUARD_SHIELD_PER_TIER * tier, true);
        }
        if unit.effects().contains(Effect::Overdrive) {
            unit.add_attack_speed(OVERDRIVE_ATTACK_SPEED_PER_TIER * tier, true);
        }
        if unit.effects().contains(Effect::EerieSpell) {
            unit.add_ability_power(EERIE_SPELL_AP_PER_TIER * tier, true);
        }
    }
}

pub fn tier_shield(effects: &EffectSet) -> f32 {
    TIER_SHIELDS
        .iter()
        .filter(|(effect, _)| effects.contains(*effect))
        .map(|(_, shield)| shield)
        .sum()
}

/// Each unit's tier shield goes to itself and every adjacent ally
pub fn apply_tier_shields<U: CombatUnit>(roster: &mut Roster<U>, board: &Board) {
    let mut grants: Vec<(UnitId, f32)> = Vec::new();
    for unit in roster.iter() {
        let shield = tier_shield(unit.effects());
        if shield <= 0.0 {
            continue;
        }
        grants.push((unit.id(), shield));
        let coord = unit.coord();
        for cell in board.adjacent_cells(coord.x, coord.y) {
            if roster.contains(cell.unit) {
                grants.push((cell.unit, shield));
            }
        }
    }
    for (id, shield) in grants {
        if let Some(unit) = roster.get_mut(id) {
            unit.add_shield(shield, true);
        }
    }
}

/// Same-row allies at `x - 1`, `x + 1` and, with `include_self`, `x`
fn row_allies<U: CombatUnit>(
    roster: &Roster<U>,
    board: &Board,
    coord: Coord,
    include_self: bool,
) -> Vec<UnitId> {
    [-1, 0, 1]
        .into_iter()
        .filter(|dx| include_self || *dx != 0)
        .filter_map(|dx| coord.offset(dx, 0))
        .filter_map(|c| board.get(c.x, c.y))
        .filter(|id| roster.contains(*id))
        .collect()
}

enum AuraGrant {
    Stat(StatKind, f32),
    Protect(f32),
    Mark(u32),
    /// Raise attack, defense and special defense to at least these values
    Mirror(UnitStats),
}

pub fn apply_aura_items<U: CombatUnit>(roster: &mut Roster<U>, board: &Board) {
    let mut grants: Vec<(UnitId, AuraGrant)> = Vec::new();
    for holder in roster.iter() {
        let coord = holder.coord();
        for item in holder.items().iter() {
            match item {
                Item::LuckyEgg => {
                    for id in row_allies(roster, board, coord, true) {
                        grants.push((id, AuraGrant::Stat(StatKind::AbilityPower, LUCKY_EGG_AP)));
                    }
                }
                Item::KingsRock => {
                    for id in row_allies(roster, board, coord, true) {
                        grants.push((id, AuraGrant::Stat(StatKind::Shield, KINGS_ROCK_SHIELD)));
                        grants.push((id, AuraGrant::Protect(KINGS_ROCK_PROTECT_MS)));
                    }
                }
                Item::FocusBand => {
                    for id in row_allies(roster, board, coord, true) {
                        grants.push((
                            id,
                            AuraGrant::Stat(StatKind::AttackSpeed, FOCUS_BAND_ATTACK_SPEED),
                        ));
                    }
                }
                Item::DeltaOrb => {
                    for id in row_allies(roster, board, coord, true) {
                        grants.push((id, AuraGrant::Mark(DELTA_ORB_MARKS)));
                    }
                }
                Item::MirrorHerb => {
                    for id in row_allies(roster, board, coord, false) {
                        grants.push((id, AuraGrant::Mirror(holder.stats().clone())));
                    }
                }
                _ => {}
            }
        }
    }

    for (id, grant) in grants {
        let Some(unit) = roster.get_mut(id) else {
            continue;
        };
        match grant {
            AuraGrant::Stat(stat, delta) => unit.add_stat(stat, delta, true),
            AuraGrant::Protect(duration) => {
                unit.trigger_protect(duration);
            }
            AuraGrant::Mark(count) => unit.status_mut().mark_stacks += count,
            AuraGrant::Mirror(source) => {
                for stat in [StatKind::Attack, StatKind::Defense, StatKind::SpecialDefense] {
                    let gap = source.get(stat) - unit.stats().get(stat);
                    if gap > 0.0 {
                        unit.add_stat(stat, gap, true);
                    }
                }
            }
        }
    }
}

pub fn apply_passive_immunities<U: CombatUnit>(roster: &mut Roster<U>) {
    for unit in roster.iter_mut() {
        let passive = unit.passive();
        for (p, kind) in PASSIVE_IMMUNITIES {
            if *p == passive {
                unit.status_mut().grant_immunity(*kind);
            }
        }
    }
}

/// Number of debuff stages a side's effects unlock (0 to 4)
pub fn debuff_tier(team_effects: &EffectSet) -> usize {
    DEBUFF_CHAIN
        .iter()
        .rposition(|effect| team_effects.contains(*effect))
        .map_or(0, |index| index + 1)
}

/// Pick the eligible opponent with the highest `key`. With `inclusive`
/// a later unit wins a tie, otherwise the earliest one keeps it.
fn select_target<U, F>(opponents: &Roster<U>, key: F, inclusive: bool) -> Option<UnitId>
where
    U: CombatUnit,
    F: Fn(&U) -> f32,
{
    let mut best: Option<(UnitId, f32)> = None;
    for unit in opponents.iter() {
        if unit.status().is_debuff_immune() {
            continue;
        }
        let value = key(unit);
        let better = match best {
            None => true,
            Some((_, current)) if inclusive => value >= current,
            Some((_, current)) => value > current,
        };
        if better {
            best = Some((unit.id(), value));
        }
    }
    best.map(|(id, _)| id)
}

pub fn apply_debuff_chain<U: CombatUnit>(opponents: &mut Roster<U>, team_effects: &EffectSet) {
    let tier = debuff_tier(team_effects);
    if tier == 0 {
        return;
    }

    if let Some(id) = select_target(opponents, |u| u.stats().durability(), false) {
        if let Some(unit) = opponents.get_mut(id) {
            let max_hp_cut = unit.stats().max_hp * HAUNT_HP_FRACTION;
            let shield_cut = unit.stats().shield * HAUNT_SHIELD_FRACTION;
            unit.add_max_hp(-max_hp_cut, true);
            unit.add_shield(-shield_cut, true);
            unit.trigger_flinch(HAUNT_FLINCH_MS, None);
            tracing::debug!("Haunt hit {}", id);
        }
    }
    if tier < 2 {
        return;
    }

    if let Some(id) = select_target(opponents, |u| u.stats().attack, false) {
        if let Some(unit) = opponents.get_mut(id) {
            let cut = unit.stats().attack * TORMENT_ATTACK_FRACTION;
            unit.add_attack(-cut, true);
            unit.trigger_paralysis(TORMENT_PARALYSIS_MS, None);
            tracing::debug!("Torment hit {}", id);
        }
    }
    if tier < 3 {
        return;
    }

    if let Some(id) = select_target(opponents, |u| u.stats().ability_power, true) {
        if let Some(unit) = opponents.get_mut(id) {
            unit.add_ability_power(-SPITE_AP_REDUCTION, true);
            unit.trigger_silence(SPITE_SILENCE_MS, None);
            tracing::debug!("Spite hit {}", id);
        }
    }
    if tier < 4 {
        return;
    }

    if let Some(id) = select_target(opponents, |u| u.stats().power_score(), false) {
        if let Some(unit) = opponents.get_mut(id) {
            unit.trigger_curse(DOOM_CURSE_MS, None);
            tracing::debug!("Doom hit {}", id);
        }
    }
}
