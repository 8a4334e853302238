//! Combat presets and their TOML configuration.

use serde::{Deserialize, Serialize};

use super::{CombatAction, DamageRange, DamageRoller};
use crate::error::Result;

/// Threshold for a coin-flip survival check.
pub const SURVIVAL_THRESHOLD: f64 = 0.5;

/// Resolve a binary survival check: success when the roll exceeds `threshold`.
pub fn survival_check(roller: &mut dyn DamageRoller, threshold: f64) -> bool {
    roller.chance() > threshold
}

/// How fleeing a fight works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscapeRules {
    /// Range of the escape roll.
    pub roll: DamageRange,
    /// The roll must be strictly greater than this to escape.
    pub threshold: i32,
    /// Damage taken while getting away.
    pub penalty: i32,
    /// Whether the enemy strikes after a failed attempt.
    #[serde(default)]
    pub retaliate_on_failure: bool,
}

/// Numbers for one kind of fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRules {
    pub enemy_hp: i32,
    pub attack: DamageRange,
    pub enemy_attack: DamageRange,
    pub heal_amount: i32,
    /// Reduced hit taken instead of the normal retaliation. `None` disables Defend.
    #[serde(default)]
    pub defend: Option<DamageRange>,
    /// `None` disables Escape.
    #[serde(default)]
    pub escape: Option<EscapeRules>,
}

impl CombatRules {
    /// The security-droid fight: heavy hits, Defend available, no escape.
    pub fn lost_sector() -> Self {
        Self {
            enemy_hp: 50,
            attack: DamageRange::new(20, 30),
            enemy_attack: DamageRange::new(15, 25),
            heal_amount: 25,
            defend: Some(DamageRange::new(5, 10)),
            escape: None,
        }
    }

    /// The void-crawler fight: lighter hits, escape available, no Defend.
    pub fn abyss() -> Self {
        Self {
            enemy_hp: 50,
            attack: DamageRange::new(10, 25),
            enemy_attack: DamageRange::new(5, 15),
            heal_amount: 30,
            defend: None,
            escape: Some(EscapeRules {
                roll: DamageRange::new(1, 10),
                threshold: 5,
                penalty: 15,
                retaliate_on_failure: false,
            }),
        }
    }

    /// Check every range and amount.
    pub fn validate(&self) -> Result<()> {
        self.attack.validate()?;
        self.enemy_attack.validate()?;
        DamageRange::new(self.heal_amount, self.heal_amount).validate()?;
        DamageRange::new(self.enemy_hp, self.enemy_hp).validate()?;
        if let Some(defend) = &self.defend {
            defend.validate()?;
        }
        if let Some(escape) = &self.escape {
            escape.roll.validate()?;
            DamageRange::new(escape.penalty, escape.penalty).validate()?;
        }
        Ok(())
    }

    pub fn allows(&self, action: CombatAction) -> bool {
        match action {
            CombatAction::Attack | CombatAction::Heal => true,
            CombatAction::Defend => self.defend.is_some(),
            CombatAction::Escape => self.escape.is_some(),
        }
    }
}

/// Preset overrides loaded from a rules file.
///
/// ```toml
/// [abyss]
/// enemy_hp = 60
/// attack = { min = 10, max = 25 }
/// enemy_attack = { min = 5, max = 15 }
/// heal_amount = 30
/// escape = { roll = { min = 1, max = 10 }, threshold = 5, penalty = 15 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesFile {
    #[serde(default)]
    pub lost_sector: Option<CombatRules>,
    #[serde(default)]
    pub abyss: Option<CombatRules>,
}

impl RulesFile {
    /// Parse and validate a rules file.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: RulesFile = toml::from_str(source)?;
        if let Some(rules) = &file.lost_sector {
            rules.validate()?;
        }
        if let Some(rules) = &file.abyss {
            rules.validate()?;
        }
        Ok(file)
    }

    pub fn lost_sector_rules(&self) -> CombatRules {
        self.lost_sector.clone().unwrap_or_else(CombatRules::lost_sector)
    }

    pub fn abyss_rules(&self) -> CombatRules {
        self.abyss.clone().unwrap_or_else(CombatRules::abyss)
    }
}
