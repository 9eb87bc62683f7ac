//! Generic finite-state token transduction.
//!
//! A machine consumes a queue of tokens. Each token is matched by exact text
//! against the current state's table, or handed to the transform hook when
//! nothing matches. Transitions may push derived tokens back onto the front
//! of the queue, append text to an output buffer, and flush that buffer into
//! an output record.
//!
//! # Error Severities
//!
//! - A token nobody recognises is logged and skipped; the run continues.
//! - Reaching a state with no table, or exhausting the step budget, aborts
//!   the run with a [`RunError`] that still carries the output produced so far.

mod error;
mod hooks;
mod machine;

pub use error::RunError;
pub use hooks::{Hooks, PostprocessFn, TransformFn};
pub use machine::{Machine, StepBudget, TracedRun, TransitionTable};
