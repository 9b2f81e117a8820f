//! Held items and their per-unit effects

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::effects::constants::{FLAME_ORB_BURN_MS, RUNE_STONE_PROTECT_MS, TOXIC_ORB_POISON_MS};
use crate::effects::mutation::Mutation;
use crate::unit::stats::StatKind::*;
use crate::unit::status::StatusKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Item {
    // Basic components
    FossilStone,
    TwistedSpoon,
    MysticWater,
    Magnet,
    BlackGlasses,
    MiracleSeed,
    NeverMeltIce,
    Charcoal,
    HeartScale,
    // Crafted
    MuscleBand,
    WhiteGlasses,
    AssaultVest,
    RazorClaw,
    Leftovers,
    FlameOrb,
    ToxicOrb,
    RuneStone,
    MaxRevive,
    // Auras, resolved in the post-effect pass
    LuckyEgg,
    KingsRock,
    FocusBand,
    DeltaOrb,
    MirrorHerb,
    /// Consumed on placement and replaced by rolled items
    MysteryBox,
}

pub const BASIC_ITEMS: &[Item] = &[
    Item::FossilStone,
    Item::TwistedSpoon,
    Item::MysticWater,
    Item::Magnet,
    Item::BlackGlasses,
    Item::MiracleSeed,
    Item::NeverMeltIce,
    Item::Charcoal,
    Item::HeartScale,
];

/// Pool a `MysteryBox` rolls from
pub const ROLLABLE_ITEMS: &[Item] = &[
    Item::MuscleBand,
    Item::WhiteGlasses,
    Item::AssaultVest,
    Item::RazorClaw,
    Item::Leftovers,
    Item::FlameOrb,
    Item::ToxicOrb,
    Item::RuneStone,
    Item::MaxRevive,
    Item::LuckyEgg,
    Item::KingsRock,
    Item::FocusBand,
    Item::DeltaOrb,
    Item::MirrorHerb,
];

/// Per-unit mutations for each item; aura items and `MysteryBox` have none
pub const ITEM_RULES: &[(Item, &[Mutation])] = &[
    (Item::FossilStone, &[Mutation::Add(Shield, 15.0)]),
    (Item::TwistedSpoon, &[Mutation::Add(AbilityPower, 10.0)]),
    (Item::MysticWater, &[Mutation::Add(Mana, 15.0)]),
    (Item::Magnet, &[Mutation::Add(AttackSpeed, 0.1)]),
    (Item::BlackGlasses, &[Mutation::Add(CritChance, 10.0)]),
    (Item::MiracleSeed, &[Mutation::Add(MaxHp, 15.0)]),
    (Item::NeverMeltIce, &[Mutation::Add(SpecialDefense, 1.0)]),
    (Item::Charcoal, &[Mutation::Add(Attack, 1.0)]),
    (Item::HeartScale, &[Mutation::Add(Defense, 1.0)]),
    (Item::MuscleBand, &[Mutation::Scale(Attack, 0.2)]),
    (Item::WhiteGlasses, &[Mutation::Add(CritDamage, 0.3)]),
    (
        Item::AssaultVest,
        &[Mutation::Add(SpecialDefense, 5.0), Mutation::Add(MaxHp, 20.0)],
    ),
    (Item::RazorClaw, &[Mutation::Add(CritChance, 25.0)]),
    (Item::Leftovers, &[Mutation::Add(MaxHp, 40.0)]),
    (
        Item::FlameOrb,
        &[
            Mutation::Scale(Attack, 0.3),
            Mutation::Status(StatusKind::Burn, FLAME_ORB_BURN_MS),
        ],
    ),
    (
        Item::ToxicOrb,
        &[
            Mutation::Add(AbilityPower, 30.0),
            Mutation::Status(StatusKind::Poison, TOXIC_ORB_POISON_MS),
        ],
    ),
    (
        Item::RuneStone,
        &[Mutation::Status(StatusKind::RuneProtect, RUNE_STONE_PROTECT_MS)],
    ),
    (Item::MaxRevive, &[Mutation::Revival]),
];

pub fn item_rule(item: Item) -> Option<&'static [Mutation]> {
    ITEM_RULES
        .iter()
        .find(|(candidate, _)| *candidate == item)
        .map(|(_, mutations)| *mutations)
}

pub fn random_basic_item<R: Rng + ?Sized>(rng: &mut R) -> Option<Item> {
    BASIC_ITEMS.choose(rng).copied()
}

pub fn random_rollable_item<R: Rng + ?Sized>(rng: &mut R) -> Option<Item> {
    ROLLABLE_ITEMS.choose(rng).copied()
}

/// Items held by one in-match unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSet(BTreeSet<Item>);

impl ItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: Item) -> bool {
        self.0.insert(item)
    }

    pub fn remove(&mut self, item: Item) -> bool {
        self.0.remove(&item)
    }

    pub fn contains(&self, item: Item) -> bool {
        self.0.contains(&item)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Item> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Item> for ItemSet {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
