//! Read-only descriptions handed to presentation shells.

use game_rules::{Capability, PlayerState, RoundReport};
use serde::Serialize;

use super::SessionId;
use crate::encounter::{ActionOption, EncounterId};
use crate::ending::EndingId;
use crate::scene::{ChoiceId, SceneId};

/// The player's state as a shell should display it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSnapshot {
    pub captain: Option<String>,
    pub hp: i32,
    pub max_hp: i32,
    pub energy: i32,
    pub inventory: Vec<String>,
    pub crew: Vec<String>,
    pub keycard: bool,
}

impl PlayerSnapshot {
    pub fn capture(player: &PlayerState, captain: Option<&str>) -> Self {
        Self {
            captain: captain.map(str::to_string),
            hp: player.hp(),
            max_hp: player.max_hp(),
            energy: player.energy,
            inventory: player.inventory().to_vec(),
            crew: player.crew().to_vec(),
            keycard: player.has_capability(Capability::BlueKeycard),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
    pub id: ChoiceId,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneView {
    pub session: SessionId,
    pub story: String,
    pub scene: SceneId,
    pub title: Option<String>,
    /// Lines produced by the transition that led here.
    pub narration: Vec<String>,
    pub beats: Vec<String>,
    pub prompt: Option<String>,
    pub choices: Vec<ChoiceView>,
    pub player: PlayerSnapshot,
    /// The final round, when this scene follows a fight.
    pub last_round: Option<RoundReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CombatView {
    pub session: SessionId,
    pub encounter: EncounterId,
    pub enemy: String,
    pub enemy_hp: i32,
    pub enemy_max_hp: i32,
    pub round: u32,
    pub narration: Vec<String>,
    pub actions: Vec<ActionOption>,
    pub player: PlayerSnapshot,
    pub last_round: Option<RoundReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EndingView {
    pub session: SessionId,
    pub ending: EndingId,
    pub title: String,
    pub narration: Vec<String>,
    pub lines: Vec<String>,
    pub success: bool,
    pub player: PlayerSnapshot,
    pub last_round: Option<RoundReport>,
}

/// Whatever the session is showing right now.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Scene(SceneView),
    Combat(CombatView),
    Ending(EndingView),
}

impl View {
    pub fn player(&self) -> &PlayerSnapshot {
        match self {
            View::Scene(view) => &view.player,
            View::Combat(view) => &view.player,
            View::Ending(view) => &view.player,
        }
    }

    pub fn is_ending(&self) -> bool {
        matches!(self, View::Ending(_))
    }
}
