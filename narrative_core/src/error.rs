//! Errors surfaced to presentation shells.

use game_rules::{CombatAction, RulesError};
use thiserror::Error;

use crate::encounter::EncounterId;
use crate::ending::EndingId;
use crate::scene::{ChoiceId, SceneId};

/// Errors from the story engine and session contract.
///
/// Every variant is recoverable; reaching an ending or game over is reported
/// through views, never through this type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The shell passed a choice that is not currently offered.
    #[error("choice '{choice}' is not offered at scene {scene:?}")]
    InvalidChoice { scene: SceneId, choice: ChoiceId },

    /// The shell passed a combat action that is not on the menu.
    #[error("combat action {0:?} is not offered in this fight")]
    InvalidAction(CombatAction),

    #[error("the session is in combat, not at a scene")]
    NotInScene,

    #[error("the session is not in combat")]
    NotInCombat,

    #[error("the session has already ended")]
    SessionOver,

    #[error("unknown scene {0:?}")]
    UnknownScene(SceneId),

    #[error("unknown encounter {0:?}")]
    UnknownEncounter(EncounterId),

    #[error("unknown ending {0:?}")]
    UnknownEnding(EndingId),

    #[error("scene {0:?} offers more than four choices")]
    TooManyChoices(SceneId),

    #[error("unknown story '{0}'")]
    UnknownStory(String),

    #[error(transparent)]
    Rules(#[from] RulesError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
