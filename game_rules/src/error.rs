//! Error types for rule evaluation and rules configuration.

use thiserror::Error;

use crate::mechanics::CombatAction;

/// Errors raised by the rules layer.
///
/// Terminal game conditions (defeat, victory, escape) are never errors; they
/// are reported through [`crate::CombatOutcome`] and [`crate::HealthStatus`].
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("invalid damage range {min}..={max}")]
    InvalidRange { min: i32, max: i32 },

    #[error("combat action {0:?} is not available under these rules")]
    ActionUnavailable(CombatAction),

    #[error("combat already finished")]
    CombatFinished,

    #[error("failed to parse rules file: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RulesError>;
