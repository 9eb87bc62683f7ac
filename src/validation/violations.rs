//! Table defects reported by machine validation.

use thiserror::Error;

/// Defects found in a machine's tables.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MachineViolation {
    #[error("Transition for {literal:?} in state '{state}' targets undefined state '{target}'")]
    UndefinedTarget {
        state: String,
        literal: String,
        target: String,
    },

    #[error("State '{state}' maps the empty literal")]
    EmptyLiteral { state: String },

    #[error("Transition for {literal:?} in state '{state}' re-queues its own literal without leaving the state")]
    SelfRequeue { state: String, literal: String },

    #[error("Custom check failed: {message}")]
    CustomCheckFailed { message: String },
}
