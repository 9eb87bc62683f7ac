//! Fatal run errors.

use crate::core::Token;
use thiserror::Error;

/// Errors that abort a run.
///
/// Token-level misses are not errors: they are logged and skipped. Every
/// variant keeps the records that were flushed before the failure.
#[derive(Debug, Error)]
pub enum RunError<S> {
    #[error("Reached undefined state '{state}'")]
    UndefinedState { state: String, partial: Vec<Token<S>> },

    #[error("Step limit ({limit}) exceeded; a transform hook is probably cycling")]
    StepLimitExceeded { limit: usize, partial: Vec<Token<S>> },
}

impl<S> RunError<S> {
    /// Output records completed before the run was aborted.
    pub fn partial(&self) -> &[Token<S>] {
        match self {
            Self::UndefinedState { partial, .. } | Self::StepLimitExceeded { partial, .. } => {
                partial
            }
        }
    }

    pub fn into_partial(self) -> Vec<Token<S>> {
        match self {
            Self::UndefinedState { partial, .. } | Self::StepLimitExceeded { partial, .. } => {
                partial
            }
        }
    }
}
