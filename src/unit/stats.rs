//! Core combat stats and their clamping rules

use serde::{Deserialize, Serialize};

pub const MIN_ATTACK_SPEED: f32 = 0.4;
pub const MAX_ATTACK_SPEED: f32 = 2.5;
pub const MAX_CRIT_CHANCE: f32 = 100.0;
pub const MAX_DODGE: f32 = 0.9;

/// Every stat the effect tables are allowed to touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Attack,
    Defense,
    SpecialDefense,
    AbilityPower,
    /// Percent, 0-100
    CritChance,
    /// Multiplier applied on crit
    CritDamage,
    /// Attacks per second
    AttackSpeed,
    Range,
    MaxHp,
    Shield,
    Mana,
    /// Probability 0-0.9
    Dodge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    pub attack: f32,
    pub defense: f32,
    pub special_defense: f32,
    pub ability_power: f32,
    pub crit_chance: f32,
    pub crit_damage: f32,
    pub attack_speed: f32,
    pub range: f32,
    pub max_hp: f32,
    pub hp: f32,
    pub shield: f32,
    pub mana: f32,
    pub max_mana: f32,
    pub dodge: f32,
}

impl Default for UnitStats {
    fn default() -> Self {
        Self {
            attack: 10.0,
            defense: 1.0,
            special_defense: 1.0,
            ability_power: 0.0,
            crit_chance: 5.0,
            crit_damage: 2.0,
            attack_speed: 0.75,
            range: 1.0,
            max_hp: 100.0,
            hp: 100.0,
            shield: 0.0,
            mana: 0.0,
            max_mana: 100.0,
            dodge: 0.0,
        }
    }
}

impl UnitStats {
    pub fn get(&self, stat: StatKind) -> f32 {
        match stat {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpecialDefense => self.special_defense,
            StatKind::AbilityPower => self.ability_power,
            StatKind::CritChance => self.crit_chance,
            StatKind::CritDamage => self.crit_damage,
            StatKind::AttackSpeed => self.attack_speed,
            StatKind::Range => self.range,
            StatKind::MaxHp => self.max_hp,
            StatKind::Shield => self.shield,
            StatKind::Mana => self.mana,
            StatKind::Dodge => self.dodge,
        }
    }

    /// Add a delta and clamp the stat into its legal range.
    ///
    /// Lowering max HP drags current HP down with it; raising it does not heal.
    pub fn add(&mut self, stat: StatKind, delta: f32) {
        match stat {
            StatKind::Attack => self.attack = (self.attack + delta).max(0.0),
            StatKind::Defense => self.defense = (self.defense + delta).max(0.0),
            StatKind::SpecialDefense => {
                self.special_defense = (self.special_defense + delta).max(0.0)
            }
            StatKind::AbilityPower => self.ability_power += delta,
            StatKind::CritChance => {
                self.crit_chance = (self.crit_chance + delta).clamp(0.0, MAX_CRIT_CHANCE)
            }
            StatKind::CritDamage => self.crit_damage = (self.crit_damage + delta).max(0.0),
            StatKind::AttackSpeed => {
                self.attack_speed =
                    (self.attack_speed + delta).clamp(MIN_ATTACK_SPEED, MAX_ATTACK_SPEED)
            }
            StatKind::Range => self.range = (self.range + delta).max(1.0),
            StatKind::MaxHp => {
                self.max_hp = (self.max_hp + delta).max(1.0);
                self.hp = self.hp.min(self.max_hp);
            }
            StatKind::Shield => self.shield = (self.shield + delta).max(0.0),
            StatKind::Mana => self.mana = (self.mana + delta).clamp(0.0, self.max_mana),
            StatKind::Dodge => self.dodge = (self.dodge + delta).clamp(0.0, MAX_DODGE),
        }
    }

    /// Restore HP without exceeding max HP
    pub fn heal(&mut self, amount: f32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    /// Effective durability, used to rank units for targeting
    pub fn durability(&self) -> f32 {
        self.hp + self.shield
    }

    /// Single number used to rank units as "strongest".
    ///
    /// Durability, sustained physical output and ability power, weighted so
    /// each contributes on a similar scale for typical units.
    pub fn power_score(&self) -> f32 {
        self.durability() / 10.0 + self.attack * self.attack_speed * 2.0 + self.ability_power / 5.0
    }
}
