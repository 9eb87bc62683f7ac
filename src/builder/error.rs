//! Build errors for machines.

use thiserror::Error;

/// Errors that can occur when building a machine.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Start state not specified. Call .start(state) before .build()")]
    MissingStartState,

    #[error("Start state '{state}' has no transition table")]
    UndefinedStartState { state: String },

    #[error("Literal {literal:?} is already mapped in state '{state}'")]
    DuplicateLiteral { state: String, literal: String },
}
