//! Validation rules over machine tables.

use crate::core::State;
use crate::engine::Machine;
use crate::validation::violations::MachineViolation;
use std::fmt::Debug;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of validating a machine.
pub type MachineValidation = Validation<(), NonEmptyVec<MachineViolation>>;

/// Type alias for validation check functions
pub type ValidationCheck<S, T> = Box<dyn Fn(&Machine<S, T>) -> MachineValidation + Send + Sync>;

/// A set of checks run over a built machine.
/// Uses Validation to accumulate ALL violations.
///
/// Validation is a lint: a machine that fails it still runs, and any
/// undefined state it reaches is reported as a fatal run error instead.
pub struct ValidationRules<S: State, T> {
    checks: Vec<ValidationCheck<S, T>>,
}

impl<S, T> ValidationRules<S, T>
where
    S: State + 'static,
    T: Clone + PartialEq + Debug + 'static,
{
    /// No checks at all.
    pub fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    /// The built-in checks: undefined targets, empty literals and literal
    /// transitions that re-queue themselves.
    pub fn standard() -> Self {
        Self::empty()
            .require(check_targets::<S, T>)
            .require(check_empty_literals::<S, T>)
            .require(check_self_requeue::<S, T>)
    }

    /// Add a custom validation check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&Machine<S, T>) -> MachineValidation + Send + Sync + 'static,
    {
        self.checks.push(Box::new(check));
        self
    }

    /// Add a simple predicate check with error message
    pub fn require_pred<F>(mut self, predicate: F, error_msg: String) -> Self
    where
        F: Fn(&Machine<S, T>) -> bool + Send + Sync + 'static,
    {
        let check = move |machine: &Machine<S, T>| {
            if predicate(machine) {
                Validation::success(())
            } else {
                Validation::fail(MachineViolation::CustomCheckFailed {
                    message: error_msg.clone(),
                })
            }
        };
        self.checks.push(Box::new(check));
        self
    }

    /// Run all checks, accumulating ALL violations.
    pub fn validate(&self, machine: &Machine<S, T>) -> MachineValidation {
        let checks: Vec<MachineValidation> =
            self.checks.iter().map(|check| check(machine)).collect();

        Validation::all_vec(checks).map(|_| ())
    }
}

impl<S, T> Default for ValidationRules<S, T>
where
    S: State + 'static,
    T: Clone + PartialEq + Debug + 'static,
{
    fn default() -> Self {
        Self::standard()
    }
}

impl<S, T> Machine<S, T>
where
    S: State + 'static,
    T: Clone + PartialEq + Debug + 'static,
{
    /// Validate this machine against the standard rules.
    pub fn validate(&self) -> MachineValidation {
        ValidationRules::standard().validate(self)
    }
}

/// Every (state, literal) pair of a machine, sorted for stable reporting.
fn sorted_entries<S, T>(machine: &Machine<S, T>) -> Vec<(&S, &str, &crate::core::Transition<S, T>)>
where
    S: State,
    T: Clone + PartialEq + Debug,
{
    let mut entries: Vec<_> = machine
        .states()
        .flat_map(|(state, table)| {
            table
                .iter()
                .map(move |(literal, t)| (state, literal.as_str(), t))
        })
        .collect();
    entries.sort_by(|a, b| (a.0.name(), a.1).cmp(&(b.0.name(), b.1)));
    entries
}

fn check_targets<S, T>(machine: &Machine<S, T>) -> MachineValidation
where
    S: State,
    T: Clone + PartialEq + Debug,
{
    let checks: Vec<MachineValidation> = sorted_entries(machine)
        .into_iter()
        .map(|(state, literal, t)| {
            if machine.has_state(&t.next) {
                Validation::success(())
            } else {
                Validation::fail(MachineViolation::UndefinedTarget {
                    state: state.name().to_string(),
                    literal: literal.to_string(),
                    target: t.next.name().to_string(),
                })
            }
        })
        .collect();

    Validation::all_vec(checks).map(|_| ())
}

fn check_empty_literals<S, T>(machine: &Machine<S, T>) -> MachineValidation
where
    S: State,
    T: Clone + PartialEq + Debug,
{
    let checks: Vec<MachineValidation> = sorted_entries(machine)
        .into_iter()
        .map(|(state, literal, _)| {
            if literal.is_empty() {
                Validation::fail(MachineViolation::EmptyLiteral {
                    state: state.name().to_string(),
                })
            } else {
                Validation::success(())
            }
        })
        .collect();

    Validation::all_vec(checks).map(|_| ())
}

fn check_self_requeue<S, T>(machine: &Machine<S, T>) -> MachineValidation
where
    S: State,
    T: Clone + PartialEq + Debug,
{
    // Literal lookup ignores tags, so re-pushing the same text loops forever.
    let checks: Vec<MachineValidation> = sorted_entries(machine)
        .into_iter()
        .map(|(state, literal, t)| {
            let loops = t.next == *state && t.input_push.iter().any(|p| p.text() == literal);
            if loops {
                Validation::fail(MachineViolation::SelfRequeue {
                    state: state.name().to_string(),
                    literal: literal.to_string(),
                })
            } else {
                Validation::success(())
            }
        })
        .collect();

    Validation::all_vec(checks).map(|_| ())
}
