use thiserror::Error;
use vttkit_domain::DomainError;

/// Errors surfaced while handling one chat command or object event.
///
/// `Validation` carries a message fit to whisper back to the invoker;
/// everything else is reported as a generic bad-command reply with the
/// underlying error logged for the operator.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Host(#[from] anyhow::Error),
}

impl ScriptError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
