use game_rules::RulesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    /// Player input that does not match anything offered. Re-prompt.
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShellError>;
