//! Effect pipeline and post-effect integration tests

use auto_arena::core::*;
use auto_arena::effects::*;
use auto_arena::effects::constants::*;
use auto_arena::simulation::*;
use auto_arena::unit::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

type Match = Simulation<BattleUnit, ChaCha8Rng>;

fn start(setup: MatchSetup) -> Match {
    Simulation::new(SimulationConfig::default(), setup, ChaCha8Rng::seed_from_u64(17)).unwrap()
}

fn pve(units: Vec<RosterUnit>) -> SideSetup {
    SideSetup::new(Owner::Pve, units)
}

fn player(units: Vec<RosterUnit>) -> SideSetup {
    SideSetup::new(Owner::Player(PlayerId::new()), units)
}

#[test]
fn test_synergy_then_items_then_weather() {
    // Fire tier 1 scales attack by 10%, MuscleBand then scales the buffed
    // value by 20%
    let blue = player(vec![
        RosterUnit::new("Charmander", 0, 1)
            .with_types(&[Synergy::Fire])
            .with_items(&[Item::MuscleBand]),
        RosterUnit::new("Vulpix", 1, 1).with_types(&[Synergy::Fire]),
    ]);
    let id = blue.roster[0].id;
    let setup = MatchSetup::new(blue, pve(vec![RosterUnit::new("Geodude", 0, 1)]))
        .with_weather(Weather::Sun);
    let sim = start(setup);

    let unit = sim.unit(id).unwrap();
    assert!((unit.stats.attack - 13.2).abs() < 1e-4);
    assert!(unit.effects.contains(Effect::Blaze));
    assert!(unit.effects.contains(Effect::Sunny));
    assert_eq!(unit.stats.crit_chance, 15.0);
}

#[test]
fn test_terrain_reaches_both_sides() {
    let blue = player(vec![RosterUnit::new("Jigglypuff", 0, 1)]);
    let red = pve(vec![RosterUnit::new("Clefairy", 0, 1).with_types(&[Synergy::Fairy])]);
    let blue_id = blue.roster[0].id;
    let red_id = red.roster[0].id;
    let sim = start(MatchSetup::new(blue, red).with_terrain(Terrain::Misty));

    for team in Team::BOTH {
        assert!(sim.effects(team).contains(Effect::MistyTerrain));
    }
    for id in [blue_id, red_id] {
        let unit = sim.unit(id).unwrap();
        assert!(unit.effects.contains(Effect::MistyTerrain));
        assert!(unit.status.is_immune(StatusKind::Sleep));
    }
}

#[test]
fn test_tier_shield_stacks_from_adjacent_holders() {
    let normals: Vec<RosterUnit> = ["Rattata", "Pidgey", "Meowth"]
        .iter()
        .enumerate()
        .map(|(x, name)| RosterUnit::new(*name, x, 1).with_types(&[Synergy::Normal]))
        .collect();
    let mut units = normals;
    units.push(RosterUnit::new("Onix", 3, 1));
    units.push(RosterUnit::new("Geodude", 6, 1));
    let ids: Vec<UnitId> = units.iter().map(|u| u.id).collect();
    let sim = start(MatchSetup::new(player(units), pve(vec![RosterUnit::new("Zubat", 0, 1)])));

    let shield = |i: usize| sim.unit(ids[i]).unwrap().stats.shield;
    assert_eq!(shield(0), 2.0 * STAMINA_SHIELD);
    assert_eq!(shield(1), 3.0 * STAMINA_SHIELD);
    assert_eq!(shield(2), 2.0 * STAMINA_SHIELD);
    assert_eq!(shield(3), STAMINA_SHIELD);
    assert_eq!(shield(4), 0.0);
}

#[test]
fn test_high_tier_flying_shield_scales_with_rarity() {
    let flyers: Vec<RosterUnit> = (0..8)
        .map(|x| {
            RosterUnit::new(format!("Bird{x}"), x, 1)
                .with_types(&[Synergy::Flying])
                .with_rarity(Rarity::Epic)
        })
        .collect();
    let id = flyers[0].id;
    let sim = start(MatchSetup::new(player(flyers), pve(vec![RosterUnit::new("Geodude", 0, 1)])));

    assert!(sim.effects(Team::Blue).contains(Effect::MaxGuard));
    assert_eq!(sim.unit(id).unwrap().stats.shield, MAX_GUARD_SHIELD_PER_TIER * 4.0);
}

#[test]
fn test_bug_clone_lands_next_to_template() {
    let bugs: Vec<RosterUnit> = ["Caterpie", "Weedle", "Venonat", "Paras", "Scyther", "Pinsir"]
        .iter()
        .enumerate()
        .map(|(x, name)| {
            let attack = 10.0 + x as f32;
            RosterUnit::new(*name, x, 1)
                .with_types(&[Synergy::Bug])
                .with_stats(UnitStats {
                    attack,
                    ..Default::default()
                })
        })
        .collect();
    let sim = start(MatchSetup::new(player(bugs), pve(vec![RosterUnit::new("Geodude", 0, 1)])));

    assert!(sim.effects(Team::Blue).contains(Effect::Horde));
    let clones: Vec<&BattleUnit> = sim.roster(Team::Blue).iter().filter(|u| u.is_clone).collect();
    assert_eq!(clones.len(), 2);
    // Front row is full from x = 0 to 5, so Pinsir's clone takes the free
    // cell to its right and Scyther's goes one row back
    assert_eq!(clones[0].name, "Pinsir");
    assert_eq!(clones[0].coord, Coord::new(6, 0));
    assert_eq!(clones[1].name, "Scyther");
    assert_eq!(clones[1].coord, Coord::new(4, 1));
    assert_eq!(sim.board().occupied_count(), 9);
}

#[test]
fn test_mirror_herb_copies_holder_stats_to_neighbours() {
    let strong = UnitStats {
        attack: 40.0,
        defense: 2.0,
        special_defense: 9.0,
        ..Default::default()
    };
    let tanky = UnitStats {
        defense: 12.0,
        ..Default::default()
    };
    let blue = player(vec![
        RosterUnit::new("Ditto", 2, 1)
            .with_items(&[Item::MirrorHerb])
            .with_stats(strong),
        RosterUnit::new("Onix", 3, 1).with_stats(tanky),
        RosterUnit::new("Far", 5, 1),
    ]);
    let onix = blue.roster[1].id;
    let far = blue.roster[2].id;
    let sim = start(MatchSetup::new(blue, pve(vec![RosterUnit::new("Geodude", 0, 1)])));

    let unit = sim.unit(onix).unwrap();
    assert_eq!(unit.stats.attack, 40.0);
    assert_eq!(unit.stats.defense, 12.0);
    assert_eq!(unit.stats.special_defense, 9.0);
    assert_eq!(sim.unit(far).unwrap().stats.attack, 10.0);
}

#[test]
fn test_debuff_chain_hits_single_strongest_eligible_unit() {
    let ghosts: Vec<RosterUnit> = (0..8)
        .map(|x| RosterUnit::new(format!("Ghost{x}"), x, 1).with_types(&[Synergy::Ghost]))
        .collect();

    let champion = UnitStats {
        max_hp: 500.0,
        hp: 500.0,
        attack: 50.0,
        ability_power: 100.0,
        ..Default::default()
    };
    let shielded = UnitStats {
        max_hp: 900.0,
        hp: 900.0,
        attack: 90.0,
        ability_power: 200.0,
        ..Default::default()
    };
    let blue = player(vec![
        RosterUnit::new("Weak", 0, 1),
        RosterUnit::new("Champion", 1, 1).with_stats(champion),
        RosterUnit::new("Warded", 2, 1)
            .with_stats(shielded)
            .with_items(&[Item::RuneStone]),
        RosterUnit::new("Weaker", 3, 1),
    ]);
    let ids: Vec<UnitId> = blue.roster.iter().map(|u| u.id).collect();
    let sim = start(MatchSetup::new(blue, pve(ghosts)));

    let debuffs = [
        StatusKind::Flinch,
        StatusKind::Paralysis,
        StatusKind::Silence,
        StatusKind::Curse,
    ];
    let champion = sim.unit(ids[1]).unwrap();
    for kind in debuffs {
        assert!(champion.status.is_active(kind), "champion missing {kind:?}");
    }
    assert_eq!(champion.stats.max_hp, 400.0);
    assert_eq!(champion.stats.attack, 40.0);
    assert_eq!(champion.stats.ability_power, 100.0 - SPITE_AP_REDUCTION);

    for i in [0, 2, 3] {
        let unit = sim.unit(ids[i]).unwrap();
        for kind in debuffs {
            assert!(!unit.status.is_active(kind), "{} got {kind:?}", unit.name);
        }
    }
    assert_eq!(sim.unit(ids[2]).unwrap().stats.max_hp, 900.0);
}

#[test]
fn test_lower_ghost_tier_stops_chain_early() {
    let ghosts: Vec<RosterUnit> = (0..4)
        .map(|x| RosterUnit::new(format!("Ghost{x}"), x, 1).with_types(&[Synergy::Ghost]))
        .collect();
    let blue = player(vec![RosterUnit::new("Target", 0, 1)]);
    let id = blue.roster[0].id;
    let sim = start(MatchSetup::new(blue, pve(ghosts)));

    let unit = sim.unit(id).unwrap();
    assert!(unit.status.is_active(StatusKind::Flinch));
    assert!(unit.status.is_active(StatusKind::Paralysis));
    assert!(!unit.status.is_active(StatusKind::Silence));
    assert!(!unit.status.is_active(StatusKind::Curse));
}

#[test]
fn test_pickup_and_passive_weather() {
    let blue = player(vec![
        RosterUnit::new("Meowth", 0, 1).with_passive(Passive::Pickup),
        RosterUnit::new("Lotad", 1, 1).with_passive(Passive::SwiftSwim),
        RosterUnit::new("Poliwag", 2, 1).with_passive(Passive::WaterVeil),
    ]);
    let ids: Vec<UnitId> = blue.roster.iter().map(|u| u.id).collect();
    let setup = MatchSetup::new(blue, pve(vec![RosterUnit::new("Geodude", 0, 1)]))
        .with_weather(Weather::Rain);
    let sim = start(setup);

    let meowth = sim.unit(ids[0]).unwrap();
    assert_eq!(meowth.items.len(), 1);
    assert!(BASIC_ITEMS.contains(&meowth.items.iter().next().unwrap()));

    let lotad = sim.unit(ids[1]).unwrap();
    assert!((lotad.stats.attack_speed - 0.95).abs() < 1e-6);
    assert!(lotad.effects.contains(Effect::Rainy));

    let poliwag = sim.unit(ids[2]).unwrap();
    assert!(poliwag.status.is_immune(StatusKind::Burn));
}

#[test]
fn test_auto_weather_from_synergies() {
    let blue = player(
        (0..5)
            .map(|x| RosterUnit::new(format!("Volt{x}"), x, 1).with_types(&[Synergy::Electric]))
            .collect(),
    );
    let red = pve(
        (0..3)
            .map(|x| RosterUnit::new(format!("Spark{x}"), x, 1).with_types(&[Synergy::Electric]))
            .collect(),
    );
    let setup = MatchSetup::new(blue, red);
    assert_eq!(setup.derived_weather(), Weather::Storm);
}
