//! Combat encounters - how a fight is entered and where each outcome leads.

use game_rules::{CombatAction, CombatRules};
use serde::{Deserialize, Serialize};

use crate::scene::{ChoiceId, Destination, Effect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterId {
    SecurityDroid,
    VoidCrawler,
}

/// One entry on the combat menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOption {
    pub key: ChoiceId,
    pub action: CombatAction,
    pub label: String,
}

/// What follows a finished fight.
#[derive(Debug, Clone)]
pub struct Aftermath {
    pub narration: Vec<String>,
    pub effects: Vec<Effect>,
    pub destination: Destination,
}

impl Aftermath {
    pub fn new(destination: Destination) -> Self {
        Self {
            narration: Vec::new(),
            effects: Vec::new(),
            destination,
        }
    }

    pub fn narrate(mut self, line: impl Into<String>) -> Self {
        self.narration.push(line.into());
        self
    }

    pub fn effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// A fight against a single enemy.
#[derive(Debug, Clone)]
pub struct Encounter {
    pub id: EncounterId,
    pub enemy: String,
    pub intro: Vec<String>,
    pub rules: CombatRules,
    menu: Vec<ActionOption>,
    pub victory: Aftermath,
    /// Falls back to the victory destination, without its loot, when unset.
    pub escape: Option<Aftermath>,
    pub defeat_reason: String,
}

impl Encounter {
    pub fn new(
        id: EncounterId,
        enemy: impl Into<String>,
        rules: CombatRules,
        victory: Aftermath,
        defeat_reason: impl Into<String>,
    ) -> Self {
        Self {
            id,
            enemy: enemy.into(),
            intro: Vec::new(),
            rules,
            menu: Vec::new(),
            victory,
            escape: None,
            defeat_reason: defeat_reason.into(),
        }
    }

    pub fn intro(mut self, line: impl Into<String>) -> Self {
        self.intro.push(line.into());
        self
    }

    pub fn action(
        mut self,
        key: impl Into<String>,
        action: CombatAction,
        label: impl Into<String>,
    ) -> Self {
        self.menu.push(ActionOption {
            key: ChoiceId::new(key),
            action,
            label: label.into(),
        });
        self
    }

    pub fn on_escape(mut self, aftermath: Aftermath) -> Self {
        self.escape = Some(aftermath);
        self
    }

    /// Menu entries the rules allow, in menu order.
    pub fn menu(&self) -> Vec<&ActionOption> {
        self.menu
            .iter()
            .filter(|option| self.rules.allows(option.action))
            .collect()
    }

    pub fn offers(&self, action: CombatAction) -> bool {
        self.menu().iter().any(|option| option.action == action)
    }

    /// Aftermath for a successful escape.
    pub fn escape_aftermath(&self) -> Aftermath {
        self.escape
            .clone()
            .unwrap_or_else(|| Aftermath::new(self.victory.destination.clone()))
    }
}
