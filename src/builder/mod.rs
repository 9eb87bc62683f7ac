//! Builder API for ergonomic machine construction.
//!
//! This module provides a fluent builder, table helpers and a macro for
//! declaring state enums with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::MachineBuilder;

use crate::core::Transition;

/// Build table entries for a set of literals, one transition per literal.
///
/// # Example
///
/// ```
/// use braille_fsm::builder::literal_table;
/// use braille_fsm::core::Transition;
///
/// let state = "word".to_string();
/// let table = literal_table("abc".chars().map(String::from), |l| {
///     Transition::<String, ()>::to(state.clone()).emit(l)
/// });
///
/// assert_eq!(table.len(), 3);
/// assert_eq!(table[1].0, "b");
/// ```
pub fn literal_table<S, T, I, F>(literals: I, mut transition: F) -> Vec<(String, Transition<S, T>)>
where
    I: IntoIterator<Item = String>,
    F: FnMut(&str) -> Transition<S, T>,
{
    literals
        .into_iter()
        .map(|literal| {
            let t = transition(&literal);
            (literal, t)
        })
        .collect()
}

/// A transition that stays in `state` and emits `text`.
pub fn emit_transition<S, T>(state: S, text: impl Into<String>) -> Transition<S, T> {
    Transition::to(state).emit(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Emit;

    #[test]
    fn literal_table_keeps_literal_order() {
        let table = literal_table(vec!["x".to_string(), "yz".to_string()], |l| {
            emit_transition::<u8, ()>(0, l.to_uppercase())
        });

        let keys: Vec<&str> = table.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["x", "yz"]);
        assert_eq!(table[1].1.output_push, vec![Emit::text("YZ")]);
    }

    #[test]
    fn emit_transition_stays_in_state() {
        let t = emit_transition::<u8, ()>(3, "a");
        assert_eq!(t.next, 3);
        assert!(t.input_push.is_empty());
    }
}
