//! Session - one playthrough of a story, and the contract shells drive.
//!
//! A shell starts a session, renders whatever [`View`] it reports, and feeds
//! back either a scene choice ([`Session::choose`]) or a combat action
//! ([`Session::act`]) until an ending is reached.

mod view;

pub use view::*;

use game_rules::{
    CombatAction, CombatOutcome, CombatSession, DamageRoller, PlayerState, RoundReport,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::encounter::{Aftermath, EncounterId};
use crate::ending::EndingId;
use crate::error::{EngineError, Result};
use crate::scene::{apply_effects, ChoiceId, SceneId};
use crate::story::{Story, Target, Transition};

/// Unique identifier for sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

enum Position {
    Scene {
        id: SceneId,
        /// Beats as they read on arrival.
        beats: Vec<String>,
    },
    Combat {
        encounter: EncounterId,
        combat: CombatSession,
    },
    Ended {
        ending: EndingId,
        reason: Option<String>,
    },
}

/// A single playthrough. Owns the player state and the damage roller.
pub struct Session {
    id: SessionId,
    story: Arc<Story>,
    player: PlayerState,
    captain: Option<String>,
    roller: Box<dyn DamageRoller>,
    position: Position,
    narration: Vec<String>,
    last_round: Option<RoundReport>,
}

impl Session {
    /// Start a new playthrough at the story's first scene.
    ///
    /// A blank captain name is treated as no name.
    pub fn start(
        story: Arc<Story>,
        captain: Option<String>,
        roller: Box<dyn DamageRoller>,
    ) -> Result<Self> {
        let captain = captain
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        let start = story.start;
        let prologue = story.prologue.clone();

        let mut session = Self {
            id: SessionId::new(),
            story,
            player: PlayerState::new(),
            captain,
            roller,
            position: Position::Scene {
                id: start,
                beats: Vec::new(),
            },
            narration: Vec::new(),
            last_round: None,
        };

        info!(
            session = %session.id,
            story = %session.story.kind,
            captain = session.captain.as_deref().unwrap_or("-"),
            "Session started"
        );

        session.enter(Target::Scene(start), prologue)?;
        Ok(session)
    }

    /// A fresh session on the same story with the same captain.
    pub fn restart(&self, roller: Box<dyn DamageRoller>) -> Result<Self> {
        Self::start(Arc::clone(&self.story), self.captain.clone(), roller)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn story(&self) -> &Story {
        &self.story
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn captain(&self) -> Option<&str> {
        self.captain.as_deref()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.position, Position::Ended { .. })
    }

    /// The ending reached, if the session is over.
    pub fn outcome(&self) -> Option<EndingId> {
        match &self.position {
            Position::Ended { ending, .. } => Some(*ending),
            _ => None,
        }
    }

    /// Describe whatever the session is showing now.
    pub fn describe(&self) -> Result<View> {
        match &self.position {
            Position::Scene { id, beats } => self.scene_view(*id, beats).map(View::Scene),
            Position::Combat { encounter, combat } => {
                self.combat_view(*encounter, combat).map(View::Combat)
            }
            Position::Ended { ending, reason } => {
                self.ending_view(*ending, reason.as_deref()).map(View::Ending)
            }
        }
    }

    /// Describe the current scene.
    pub fn describe_current(&self) -> Result<SceneView> {
        match &self.position {
            Position::Scene { id, beats } => self.scene_view(*id, beats),
            Position::Combat { .. } => Err(EngineError::NotInScene),
            Position::Ended { .. } => Err(EngineError::SessionOver),
        }
    }

    /// Describe the fight in progress.
    pub fn describe_combat(&self) -> Result<CombatView> {
        match &self.position {
            Position::Combat { encounter, combat } => self.combat_view(*encounter, combat),
            Position::Scene { .. } => Err(EngineError::NotInCombat),
            Position::Ended { .. } => Err(EngineError::SessionOver),
        }
    }

    /// Take one of the choices currently offered.
    pub fn choose(&mut self, choice: &ChoiceId) -> Result<View> {
        let scene = match &self.position {
            Position::Scene { id, .. } => *id,
            Position::Combat { .. } => return Err(EngineError::NotInScene),
            Position::Ended { .. } => return Err(EngineError::SessionOver),
        };

        let story = Arc::clone(&self.story);
        let transition = story
            .resolve(scene, &self.player, choice, self.roller.as_mut())
            .inspect_err(|err| {
                warn!(session = %self.id, ?scene, choice = %choice, %err, "Choice rejected");
            })?;

        let Transition {
            narration,
            effects,
            target,
        } = transition;

        self.last_round = None;
        if apply_effects(&effects, &mut self.player).is_defeated() {
            self.enter(Target::GameOver(story.fatal_reason.clone()), narration)?;
        } else {
            self.enter(target, narration)?;
        }

        self.describe()
    }

    /// Resolve one combat round with the given action.
    pub fn act(&mut self, action: CombatAction) -> Result<View> {
        let story = Arc::clone(&self.story);
        let (encounter_id, combat) = match &mut self.position {
            Position::Combat { encounter, combat } => (*encounter, combat),
            Position::Scene { .. } => return Err(EngineError::NotInCombat),
            Position::Ended { .. } => return Err(EngineError::SessionOver),
        };

        let encounter = story.encounter(encounter_id)?;
        if !encounter.offers(action) {
            warn!(session = %self.id, ?action, "Combat action rejected");
            return Err(EngineError::InvalidAction(action));
        }

        let report = combat.act(&mut self.player, action, self.roller.as_mut())?;
        let outcome = report.outcome;
        self.last_round = Some(report);
        self.narration.clear();

        match outcome {
            CombatOutcome::Ongoing => {}
            CombatOutcome::Victory => self.conclude(encounter.victory.clone())?,
            CombatOutcome::Escaped => self.conclude(encounter.escape_aftermath())?,
            CombatOutcome::Defeat => {
                self.enter(Target::GameOver(encounter.defeat_reason.clone()), Vec::new())?
            }
        }

        self.describe()
    }

    fn conclude(&mut self, aftermath: Aftermath) -> Result<()> {
        if apply_effects(&aftermath.effects, &mut self.player).is_defeated() {
            let reason = self.story.fatal_reason.clone();
            return self.enter(Target::GameOver(reason), aftermath.narration);
        }
        let target = self
            .story
            .settle(&aftermath.destination, &self.player, self.roller.as_mut());
        self.enter(target, aftermath.narration)
    }

    fn enter(&mut self, target: Target, mut narration: Vec<String>) -> Result<()> {
        let story = Arc::clone(&self.story);

        match target {
            Target::Scene(id) => {
                let scene = story.scene(id)?;
                let beats = scene.visible_beats(&self.player);
                if apply_effects(&scene.on_enter, &mut self.player).is_defeated() {
                    return self.enter(Target::GameOver(story.fatal_reason.clone()), narration);
                }
                debug!(session = %self.id, scene = ?id, hp = self.player.hp(), "Entered scene");
                self.position = Position::Scene { id, beats };
            }
            Target::Combat(id) => {
                let encounter = story.encounter(id)?;
                narration.extend(encounter.intro.iter().cloned());
                debug!(session = %self.id, encounter = ?id, "Combat started");
                self.position = Position::Combat {
                    encounter: id,
                    combat: CombatSession::new(encounter.rules.clone()),
                };
            }
            Target::Ending(id) => {
                let ending = story.ending(id)?;
                info!(session = %self.id, ending = ?id, success = ending.success, "Session ended");
                self.position = Position::Ended {
                    ending: id,
                    reason: None,
                };
            }
            Target::GameOver(reason) => {
                story.ending(EndingId::GameOver)?;
                info!(session = %self.id, %reason, "Session ended in game over");
                self.position = Position::Ended {
                    ending: EndingId::GameOver,
                    reason: Some(reason),
                };
            }
        }

        self.narration = narration;
        Ok(())
    }

    fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot::capture(&self.player, self.captain.as_deref())
    }

    fn scene_view(&self, id: SceneId, beats: &[String]) -> Result<SceneView> {
        let scene = self.story.scene(id)?;
        Ok(SceneView {
            session: self.id,
            story: self.story.title.clone(),
            scene: id,
            title: scene.title.clone(),
            narration: self.narration.clone(),
            beats: beats.to_vec(),
            prompt: scene.prompt.clone(),
            choices: scene
                .available_choices(&self.player)
                .into_iter()
                .map(|choice| ChoiceView {
                    id: choice.id.clone(),
                    label: choice.label.clone(),
                })
                .collect(),
            player: self.snapshot(),
            last_round: self.last_round.clone(),
        })
    }

    fn combat_view(&self, id: EncounterId, combat: &CombatSession) -> Result<CombatView> {
        let encounter = self.story.encounter(id)?;
        Ok(CombatView {
            session: self.id,
            encounter: id,
            enemy: encounter.enemy.clone(),
            enemy_hp: combat.enemy_hp().max(0),
            enemy_max_hp: combat.rules().enemy_hp,
            round: combat.round(),
            narration: self.narration.clone(),
            actions: encounter.menu().into_iter().cloned().collect(),
            player: self.snapshot(),
            last_round: self.last_round.clone(),
        })
    }

    fn ending_view(&self, id: EndingId, reason: Option<&str>) -> Result<EndingView> {
        let ending = self.story.ending(id)?;
        Ok(EndingView {
            session: self.id,
            ending: id,
            title: ending.title.clone(),
            narration: self.narration.clone(),
            lines: ending.render(self.captain.as_deref(), reason),
            success: ending.success,
            player: self.snapshot(),
            last_round: self.last_round.clone(),
        })
    }
}
