//! Story Engine - the finite scene graph for each narrative and the pure
//! transition function over it.
//!
//! Given a scene, a snapshot of the player, and a chosen option, the engine
//! returns the narration, the effects to apply, and the next target. It never
//! mutates the player itself; the session applies the returned effects.

mod abyss;
mod lost_sector;

use game_rules::{DamageRoller, PlayerState, RulesFile};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::encounter::{Encounter, EncounterId};
use crate::ending::{Ending, EndingId};
use crate::error::{EngineError, Result};
use crate::scene::{ChoiceId, Destination, Effect, Scene, SceneId};

/// No scene offers more choices than this.
pub const MAX_CHOICES: usize = 4;

/// Which narrative to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoryKind {
    /// Starship Odyssey: The Lost Sector.
    LostSector,
    /// Protocol: Abyss.
    Abyss,
}

impl std::str::FromStr for StoryKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lost-sector" | "lost_sector" | "odyssey" => Ok(StoryKind::LostSector),
            "abyss" => Ok(StoryKind::Abyss),
            other => Err(EngineError::UnknownStory(other.to_string())),
        }
    }
}

impl std::fmt::Display for StoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoryKind::LostSector => write!(f, "lost-sector"),
            StoryKind::Abyss => write!(f, "abyss"),
        }
    }
}

/// A concrete place the session moves to once branches and gambles are settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Scene(SceneId),
    Combat(EncounterId),
    Ending(EndingId),
    GameOver(String),
}

/// Result of resolving one choice.
#[derive(Debug, Clone)]
pub struct Transition {
    pub narration: Vec<String>,
    pub effects: Vec<Effect>,
    pub target: Target,
}

/// Immutable story data shared by every session playing it.
#[derive(Debug, Clone)]
pub struct Story {
    pub kind: StoryKind,
    pub title: String,
    pub prologue: Vec<String>,
    pub start: SceneId,
    /// Reason reported when a narrative effect drops HP to zero.
    pub fatal_reason: String,
    scenes: HashMap<SceneId, Scene>,
    encounters: HashMap<EncounterId, Encounter>,
    endings: HashMap<EndingId, Ending>,
}

impl Story {
    pub fn new(kind: StoryKind, title: impl Into<String>, start: SceneId) -> Self {
        Self {
            kind,
            title: title.into(),
            prologue: Vec::new(),
            start,
            fatal_reason: String::new(),
            scenes: HashMap::new(),
            encounters: HashMap::new(),
            endings: HashMap::new(),
        }
    }

    /// Build a story with combat presets taken from `rules`.
    pub fn build(kind: StoryKind, rules: &RulesFile) -> Self {
        match kind {
            StoryKind::LostSector => lost_sector::build(rules.lost_sector_rules()),
            StoryKind::Abyss => abyss::build(rules.abyss_rules()),
        }
    }

    /// Build a story with the built-in combat presets.
    pub fn with_defaults(kind: StoryKind) -> Self {
        Self::build(kind, &RulesFile::default())
    }

    pub fn prologue_line(mut self, line: impl Into<String>) -> Self {
        self.prologue.push(line.into());
        self
    }

    pub fn fatal_reason(mut self, reason: impl Into<String>) -> Self {
        self.fatal_reason = reason.into();
        self
    }

    pub fn add_scene(mut self, scene: Scene) -> Self {
        self.scenes.insert(scene.id, scene);
        self
    }

    pub fn add_encounter(mut self, encounter: Encounter) -> Self {
        self.encounters.insert(encounter.id, encounter);
        self
    }

    pub fn add_ending(mut self, ending: Ending) -> Self {
        self.endings.insert(ending.id, ending);
        self
    }

    pub fn scene(&self, id: SceneId) -> Result<&Scene> {
        self.scenes.get(&id).ok_or(EngineError::UnknownScene(id))
    }

    pub fn encounter(&self, id: EncounterId) -> Result<&Encounter> {
        self.encounters
            .get(&id)
            .ok_or(EngineError::UnknownEncounter(id))
    }

    /// Look up the payload for a terminal scene.
    pub fn ending(&self, id: EndingId) -> Result<&Ending> {
        self.endings.get(&id).ok_or(EngineError::UnknownEnding(id))
    }

    pub fn scene_ids(&self) -> impl Iterator<Item = SceneId> + '_ {
        self.scenes.keys().copied()
    }

    /// Resolve a choice at `scene` for a player in the given state.
    ///
    /// Fails with [`EngineError::InvalidChoice`] if the choice is not offered.
    pub fn resolve(
        &self,
        scene: SceneId,
        player: &PlayerState,
        choice: &ChoiceId,
        roller: &mut dyn DamageRoller,
    ) -> Result<Transition> {
        let node = self.scene(scene)?;
        let picked = node
            .find_choice(player, choice)
            .ok_or_else(|| EngineError::InvalidChoice {
                scene,
                choice: choice.clone(),
            })?;

        let target = self.settle(&picked.destination, player, roller);
        debug!(?scene, choice = %choice, ?target, "Choice resolved");

        Ok(Transition {
            narration: picked.narration.clone(),
            effects: picked.effects.clone(),
            target,
        })
    }

    /// Settle branches and gambles into a concrete target.
    ///
    /// Branch guards see the player as they are before the choice's effects.
    pub fn settle(
        &self,
        destination: &Destination,
        player: &PlayerState,
        roller: &mut dyn DamageRoller,
    ) -> Target {
        match destination {
            Destination::Scene(id) => Target::Scene(*id),
            Destination::Combat(id) => Target::Combat(*id),
            Destination::Ending(id) => Target::Ending(*id),
            Destination::GameOver(reason) => Target::GameOver(reason.clone()),
            Destination::Branch {
                guard,
                then,
                otherwise,
            } => {
                if guard.allows(player) {
                    self.settle(then, player, roller)
                } else {
                    self.settle(otherwise, player, roller)
                }
            }
            Destination::Gamble {
                threshold,
                success,
                failure,
            } => {
                if game_rules::survival_check(roller, *threshold) {
                    self.settle(success, player, roller)
                } else {
                    self.settle(failure, player, roller)
                }
            }
        }
    }

    /// Check that the graph is closed and every scene stays within the choice limit.
    pub fn validate(&self) -> Result<()> {
        self.scene(self.start)?;
        self.ending(EndingId::GameOver)?;

        for scene in self.scenes.values() {
            if scene.choices.len() > MAX_CHOICES {
                return Err(EngineError::TooManyChoices(scene.id));
            }
            for choice in &scene.choices {
                self.check_destination(&choice.destination)?;
            }
        }

        for encounter in self.encounters.values() {
            self.check_destination(&encounter.victory.destination)?;
            self.check_destination(&encounter.escape_aftermath().destination)?;
        }

        Ok(())
    }

    fn check_destination(&self, destination: &Destination) -> Result<()> {
        match destination {
            Destination::Scene(id) => self.scene(*id).map(|_| ()),
            Destination::Combat(id) => self.encounter(*id).map(|_| ()),
            Destination::Ending(id) => self.ending(*id).map(|_| ()),
            Destination::GameOver(_) => Ok(()),
            Destination::Branch {
                then, otherwise, ..
            } => {
                self.check_destination(then)?;
                self.check_destination(otherwise)
            }
            Destination::Gamble {
                success, failure, ..
            } => {
                self.check_destination(success)?;
                self.check_destination(failure)
            }
        }
    }
}
