//! Core value types shared by every machine.
//!
//! - `State` names a transition table
//! - `Token` is the (text, tag) unit consumed and produced
//! - `Transition` and `Emit` describe the effect of consuming a token
//! - `RunTrace` records applied transitions when tracing is requested
//!
//! Everything here is a plain value; the executor lives in `engine`.

mod history;
mod state;
mod token;
mod transition;

pub use history::{RunTrace, StepRecord, StepSource};
pub use state::State;
pub use token::{char_tokens, Token};
pub use transition::{Emit, Transition};
