//! Scene Graph - the nodes of the story.
//!
//! A scene is immutable data:
//! - **Beats**: narrative lines, optionally gated on the player's state
//! - **On-enter effects**: applied once each time the scene is entered
//! - **Choices**: labeled, guarded transitions to the next destination

mod choice;

pub use choice::*;

use game_rules::PlayerState;
use serde::{Deserialize, Serialize};

/// Every scene across both stories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneId {
    // The Lost Sector
    DistressSignal,
    InvestigateShip,
    ProbeScan,
    AlienEncounter,
    AncientArtifact,
    SignalSource,
    Gateway,

    // Protocol Abyss
    CentralHub,
    Bridge,
    Armory,
    EscapePods,
}

/// A narrative line shown only when its guard holds on arrival.
#[derive(Debug, Clone)]
pub struct Beat {
    pub text: String,
    pub guard: Guard,
}

/// A node in the narrative graph.
#[derive(Debug, Clone)]
pub struct Scene {
    pub id: SceneId,
    pub title: Option<String>,
    pub beats: Vec<Beat>,
    pub prompt: Option<String>,
    pub on_enter: Vec<Effect>,
    pub choices: Vec<Choice>,
}

impl Scene {
    pub fn new(id: SceneId) -> Self {
        Self {
            id,
            title: None,
            beats: Vec::new(),
            prompt: None,
            on_enter: Vec::new(),
            choices: Vec::new(),
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn beat(self, text: impl Into<String>) -> Self {
        self.beat_if(Guard::Always, text)
    }

    pub fn beat_if(mut self, guard: Guard, text: impl Into<String>) -> Self {
        self.beats.push(Beat {
            text: text.into(),
            guard,
        });
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn on_enter(mut self, effect: Effect) -> Self {
        self.on_enter.push(effect);
        self
    }

    pub fn choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Beats visible to the player in this state.
    pub fn visible_beats(&self, player: &PlayerState) -> Vec<String> {
        self.beats
            .iter()
            .filter(|beat| beat.guard.allows(player))
            .map(|beat| beat.text.clone())
            .collect()
    }

    /// Choices whose guards hold for this player, in display order.
    pub fn available_choices(&self, player: &PlayerState) -> Vec<&Choice> {
        self.choices
            .iter()
            .filter(|choice| choice.is_available(player))
            .collect()
    }

    /// Look up an offered choice by id.
    pub fn find_choice(&self, player: &PlayerState, id: &ChoiceId) -> Option<&Choice> {
        self.choices
            .iter()
            .find(|choice| &choice.id == id && choice.is_available(player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_rules::Capability;

    fn pods() -> Scene {
        Scene::new(SceneId::EscapePods)
            .beat("You reach the escape pods.")
            .beat_if(Guard::Has(Capability::Navigation), "The chip clicks in.")
            .choice(
                Choice::new("L", "Launch", Destination::Scene(SceneId::CentralHub))
                    .when(Guard::Has(Capability::Navigation)),
            )
            .choice(
                Choice::new("L", "Launch anyway", Destination::game_over("Lost."))
                    .when(Guard::lacks(Capability::Navigation)),
            )
    }

    #[test]
    fn test_visible_beats_follow_guards() {
        let scene = pods();
        let mut player = PlayerState::new();
        assert_eq!(scene.visible_beats(&player).len(), 1);

        player.add_item(game_rules::items::NAVIGATION_CHIP);
        assert_eq!(scene.visible_beats(&player).len(), 2);
    }

    #[test]
    fn test_only_valid_choices_are_offered() {
        let scene = pods();
        let player = PlayerState::new();

        let offered = scene.available_choices(&player);
        assert_eq!(offered.len(), 1);
        assert_eq!(offered[0].label, "Launch anyway");

        let found = scene.find_choice(&player, &ChoiceId::from("L")).unwrap();
        assert_eq!(found.label, "Launch anyway");
        assert!(scene.find_choice(&player, &ChoiceId::from("X")).is_none());
    }
}
