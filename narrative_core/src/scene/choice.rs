//! Choices, the guards that gate them, and the effects they apply.

use game_rules::{Capability, HealthStatus, PlayerState};
use serde::{Deserialize, Serialize};

use super::SceneId;
use crate::encounter::EncounterId;
use crate::ending::EndingId;

/// Identifier a shell uses to pick a choice (e.g. `"1"` or `"L"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChoiceId(pub String);

impl ChoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ChoiceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A precondition on the player's state.
#[derive(Debug, Clone, PartialEq)]
pub enum Guard {
    Always,
    HasItem(String),
    HasCrew(String),
    Has(Capability),
    Not(Box<Guard>),
    All(Vec<Guard>),
}

impl Guard {
    pub fn has_item(name: impl Into<String>) -> Self {
        Guard::HasItem(name.into())
    }

    pub fn has_crew(name: impl Into<String>) -> Self {
        Guard::HasCrew(name.into())
    }

    pub fn lacks(capability: Capability) -> Self {
        Guard::Not(Box::new(Guard::Has(capability)))
    }

    pub fn allows(&self, player: &PlayerState) -> bool {
        match self {
            Guard::Always => true,
            Guard::HasItem(name) => player.has_item(name),
            Guard::HasCrew(name) => player.has_crew(name),
            Guard::Has(capability) => player.has_capability(*capability),
            Guard::Not(inner) => !inner.allows(player),
            Guard::All(guards) => guards.iter().all(|guard| guard.allows(player)),
        }
    }
}

/// A state mutation applied to the player.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    AddItem(String),
    AddCrew(String),
    /// Energy delta; may be negative.
    Energy(i32),
    Damage(i32),
    GrantKeycard,
    /// Apply the inner effect only if the guard holds at application time.
    When(Guard, Box<Effect>),
}

impl Effect {
    pub fn add_item(name: impl Into<String>) -> Self {
        Effect::AddItem(name.into())
    }

    pub fn add_crew(name: impl Into<String>) -> Self {
        Effect::AddCrew(name.into())
    }

    pub fn when(guard: Guard, effect: Effect) -> Self {
        Effect::When(guard, Box::new(effect))
    }

    /// Apply to the player and report health afterwards.
    pub fn apply(&self, player: &mut PlayerState) -> HealthStatus {
        match self {
            Effect::AddItem(name) => {
                player.add_item(name.as_str());
            }
            Effect::AddCrew(name) => {
                player.add_crew(name.as_str());
            }
            Effect::Energy(delta) => player.adjust_energy(*delta),
            Effect::Damage(amount) => {
                player.take_damage(*amount);
            }
            Effect::GrantKeycard => player.grant_keycard(),
            Effect::When(guard, inner) => {
                if guard.allows(player) {
                    return inner.apply(player);
                }
            }
        }

        if player.is_alive() {
            HealthStatus::Alive
        } else {
            HealthStatus::Defeated
        }
    }
}

/// Apply effects in order. Stops at the first one that defeats the player.
pub fn apply_effects(effects: &[Effect], player: &mut PlayerState) -> HealthStatus {
    for effect in effects {
        if effect.apply(player).is_defeated() {
            return HealthStatus::Defeated;
        }
    }
    HealthStatus::Alive
}

/// Where a choice leads, possibly depending on state or chance.
#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    Scene(SceneId),
    Combat(EncounterId),
    Ending(EndingId),
    /// Game over with the given reason.
    GameOver(String),
    /// Pick a branch by the player's state on arrival.
    Branch {
        guard: Guard,
        then: Box<Destination>,
        otherwise: Box<Destination>,
    },
    /// Survival check through the damage roller: success above `threshold`.
    Gamble {
        threshold: f64,
        success: Box<Destination>,
        failure: Box<Destination>,
    },
}

impl Destination {
    pub fn branch(guard: Guard, then: Destination, otherwise: Destination) -> Self {
        Destination::Branch {
            guard,
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    pub fn gamble(threshold: f64, success: Destination, failure: Destination) -> Self {
        Destination::Gamble {
            threshold,
            success: Box::new(success),
            failure: Box::new(failure),
        }
    }

    pub fn game_over(reason: impl Into<String>) -> Self {
        Destination::GameOver(reason.into())
    }
}

/// A labeled option at a scene.
#[derive(Debug, Clone)]
pub struct Choice {
    pub id: ChoiceId,
    pub label: String,
    pub guard: Guard,
    /// Lines shown right after the choice is made.
    pub narration: Vec<String>,
    pub effects: Vec<Effect>,
    pub destination: Destination,
}

impl Choice {
    pub fn new(id: impl Into<String>, label: impl Into<String>, destination: Destination) -> Self {
        Self {
            id: ChoiceId::new(id),
            label: label.into(),
            guard: Guard::Always,
            narration: Vec::new(),
            effects: Vec::new(),
            destination,
        }
    }

    pub fn when(mut self, guard: Guard) -> Self {
        self.guard = guard;
        self
    }

    pub fn narrate(mut self, line: impl Into<String>) -> Self {
        self.narration.push(line.into());
        self
    }

    pub fn effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn is_available(&self, player: &PlayerState) -> bool {
        self.guard.allows(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_rules::items;

    #[test]
    fn test_guards() {
        let mut player = PlayerState::new();
        let chip = Guard::Has(Capability::Navigation);
        let no_chip = Guard::lacks(Capability::Navigation);

        assert!(!chip.allows(&player));
        assert!(no_chip.allows(&player));

        player.add_item(items::NAVIGATION_CHIP);
        assert!(chip.allows(&player));
        assert!(!no_chip.allows(&player));
        assert!(Guard::All(vec![chip, Guard::Always]).allows(&player));
        assert!(!Guard::has_crew("Dr. Chen").allows(&player));
    }

    #[test]
    fn test_conditional_effect() {
        let mut player = PlayerState::new();
        let loot = Effect::when(
            Guard::Has(Capability::BlueKeycard),
            Effect::add_item(items::NAVIGATION_CHIP),
        );

        loot.apply(&mut player);
        assert!(!player.has_item(items::NAVIGATION_CHIP));

        player.grant_keycard();
        loot.apply(&mut player);
        loot.apply(&mut player);
        assert!(player.has_item(items::NAVIGATION_CHIP));
        assert_eq!(player.inventory().len(), 1);
    }

    #[test]
    fn test_apply_effects_stops_on_defeat() {
        let mut player = PlayerState::new();
        let effects = vec![
            Effect::Damage(120),
            Effect::add_item(items::POWER_CELL),
        ];

        assert_eq!(apply_effects(&effects, &mut player), HealthStatus::Defeated);
        assert_eq!(player.hp(), 0);
        assert!(!player.has_item(items::POWER_CELL));
    }

    #[test]
    fn test_energy_effect() {
        let mut player = PlayerState::new();
        apply_effects(&[Effect::Energy(-5), Effect::Energy(10)], &mut player);
        assert_eq!(player.energy, 55);
    }
}
