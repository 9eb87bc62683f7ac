//! Step-by-step trace of a machine run.
//!
//! A trace records every applied transition in order, along with the tokens
//! that were dropped as unrecognised. It is only collected on request.

use super::state::State;
use super::token::Token;
use serde::{Deserialize, Serialize};

/// Where the transition applied for a step came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepSource {
    /// Exact match in the current state's table
    Literal,
    /// Produced by the transform hook
    Transform,
}

/// Record of a single applied transition.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize, T: Serialize",
    deserialize = "S: Deserialize<'de>, T: Deserialize<'de>"
))]
pub struct StepRecord<S, T> {
    /// The state the token was consumed in
    pub from: S,
    /// The state after the transition
    pub to: S,
    /// The consumed token
    pub input: Token<T>,
    /// Whether the table or the transform hook supplied the transition
    pub source: StepSource,
    /// Number of tokens pushed back onto the input
    pub pushed: usize,
    /// Number of output records completed by this step
    pub emitted: usize,
}

/// Ordered trace of a run.
///
/// # Example
///
/// ```rust
/// use braille_fsm::core::{RunTrace, StepRecord, StepSource, Token};
///
/// let mut trace: RunTrace<String, ()> = RunTrace::new();
/// trace.record(StepRecord {
///     from: "start".to_string(),
///     to: "word".to_string(),
///     input: Token::untagged("a"),
///     source: StepSource::Literal,
///     pushed: 0,
///     emitted: 0,
/// });
///
/// let path = trace.get_path();
/// assert_eq!(path.len(), 2); // start -> word
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize, T: Serialize",
    deserialize = "S: Deserialize<'de>, T: Deserialize<'de>"
))]
pub struct RunTrace<S, T> {
    steps: Vec<StepRecord<S, T>>,
    dropped: Vec<Token<T>>,
}

impl<S, T> Default for RunTrace<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, T> RunTrace<S, T> {
    /// Create a new empty trace.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            dropped: Vec::new(),
        }
    }

    /// Append an applied transition.
    pub fn record(&mut self, step: StepRecord<S, T>) {
        self.steps.push(step);
    }

    /// Remember a token that no transition accepted.
    pub fn record_dropped(&mut self, token: Token<T>) {
        self.dropped.push(token);
    }

    /// Get all steps, in the order they were applied.
    pub fn steps(&self) -> &[StepRecord<S, T>] {
        &self.steps
    }

    /// Tokens skipped as unrecognised, in the order they were met.
    pub fn dropped(&self) -> &[Token<T>] {
        &self.dropped
    }

    /// Get the path of states traversed.
    ///
    /// Returns the state of the first step, then the `to` state of each step.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.steps.first() {
            path.push(&first.from);
        }
        for step in &self.steps {
            path.push(&step.to);
        }
        path
    }

    /// Number of steps whose transition came from the transform hook.
    pub fn transform_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.source == StepSource::Transform)
            .count()
    }
}

impl<S: State, T> RunTrace<S, T> {
    /// Names of the states traversed, for display.
    pub fn path_names(&self) -> Vec<&str> {
        self.get_path().into_iter().map(State::name).collect()
    }
}
