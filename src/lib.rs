//! braille-fsm: text to Braille on a small finite-state token transducer
//!
//! The core is a generic, table-driven transducer: tokens are matched by
//! exact text against the current state's transitions, unknown tokens are
//! handed to a pluggable transform hook, and derived tokens are pushed back
//! onto the input so they are resolved depth-first. Two machines built on
//! it make up the Braille pipeline: a tokenizer that classifies raw text
//! into runs, and a translator that turns those runs into Braille cells.
//!
//! # Core Concepts
//!
//! - **Token**: a piece of text with an optional tag
//! - **Transition**: tokens to re-queue, output to emit, and the next state
//! - **Hooks**: the transform fallback and the postprocess step for records
//! - **Validation**: lints over a machine's tables, reporting every defect
//!
//! # Example
//!
//! ```rust
//! use braille_fsm::braille::{Pipeline, RunClass};
//!
//! let pipeline = Pipeline::new().unwrap();
//!
//! let runs = pipeline.tokenize("OK 42").unwrap();
//! assert_eq!(runs[0].tag(), Some(&RunClass::Upper));
//!
//! assert_eq!(pipeline.translate("OK 42").unwrap(), "⠠⠠⠕⠅⠀⠼⠙⠃");
//! ```

pub mod braille;
pub mod builder;
pub mod core;
pub mod engine;
pub mod mesh;
pub mod validation;

// Re-export commonly used types
pub use crate::braille::{translate, Pipeline, TranslateError};
pub use crate::builder::{BuildError, MachineBuilder};
pub use crate::core::{Emit, State, Token, Transition};
pub use crate::engine::{Hooks, Machine, RunError, StepBudget};
