//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::core::{State, Token, Transition};
use crate::engine::{Hooks, Machine, StepBudget, TransitionTable};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Builder for constructing machines with a fluent API.
///
/// Tables for a state may be supplied in several batches; they are merged,
/// and mapping the same literal twice in one state is an error.
pub struct MachineBuilder<S: State, T> {
    start: Option<S>,
    states: HashMap<S, TransitionTable<S, T>>,
    hooks: Hooks<S, T>,
    budget: StepBudget,
}

impl<S: State, T> MachineBuilder<S, T> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            start: None,
            states: HashMap::new(),
            hooks: Hooks::new(),
            budget: StepBudget::Unlimited,
        }
    }

    /// Set the start state (required).
    pub fn start(mut self, state: S) -> Self {
        self.start = Some(state);
        self
    }

    /// Add literal transitions to a state, creating the state if needed.
    /// Returns an error if a literal is already mapped in that state.
    pub fn state<I>(mut self, state: S, transitions: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = (String, Transition<S, T>)>,
    {
        let table = self.states.entry(state.clone()).or_default();
        for (literal, transition) in transitions {
            match table.entry(literal) {
                Entry::Occupied(occupied) => {
                    return Err(BuildError::DuplicateLiteral {
                        state: state.name().to_string(),
                        literal: occupied.key().clone(),
                    });
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(transition);
                }
            }
        }
        Ok(self)
    }

    /// Set the transform hook.
    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str, Option<&T>, &S) -> Option<Transition<S, T>> + Send + Sync + 'static,
    {
        self.hooks = self.hooks.with_transform(transform);
        self
    }

    /// Set the postprocess hook.
    pub fn postprocess<F>(mut self, postprocess: F) -> Self
    where
        F: Fn(String, Option<&T>, &S) -> Option<Token<S>> + Send + Sync + 'static,
    {
        self.hooks = self.hooks.with_postprocess(postprocess);
        self
    }

    /// Replace both hooks at once.
    pub fn hooks(mut self, hooks: Hooks<S, T>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Bound the number of steps a run may take.
    pub fn step_budget(mut self, budget: StepBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Build the machine.
    /// Returns an error if the start state is missing or has no table.
    pub fn build(self) -> Result<Machine<S, T>, BuildError> {
        let start = self.start.ok_or(BuildError::MissingStartState)?;

        if !self.states.contains_key(&start) {
            return Err(BuildError::UndefinedStartState {
                state: start.name().to_string(),
            });
        }

        tracing::debug!(
            start = start.name(),
            states = self.states.len(),
            literals = self.states.values().map(HashMap::len).sum::<usize>(),
            "machine built"
        );

        Ok(Machine {
            states: self.states,
            start,
            hooks: self.hooks,
            budget: self.budget,
        })
    }
}

impl<S: State, T> Default for MachineBuilder<S, T> {
    fn default() -> Self {
        Self::new()
    }
}
