//! Transition rules applied when a token is consumed.

use super::token::Token;

/// One entry of a transition's output.
///
/// `Flush` closes the output record being accumulated. It is a distinct
/// variant, so no literal text can ever be mistaken for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Emit {
    /// Append text to the pending output record
    Text(String),

    /// Hand the pending record to the postprocess hook and start a new one
    Flush,
}

impl Emit {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn is_flush(&self) -> bool {
        matches!(self, Self::Flush)
    }
}

/// The effect of consuming one token.
///
/// `input_push` tokens are pushed to the front of the pending input, in
/// order, so they are fully resolved before anything already queued.
/// `output_push` is applied to the output buffer, and the machine then moves
/// to `next`.
///
/// # Example
///
/// ```rust
/// use braille_fsm::core::{Emit, Token, Transition};
///
/// // Close the current run, then start a new one with "a".
/// let start_word: Transition<String, ()> = Transition::to("word".to_string())
///     .flush()
///     .emit("a");
///
/// // Replace "you" with "y", re-queued for further lookup.
/// let abbreviate: Transition<String, &str> = Transition::to("default".to_string())
///     .push(Token::new("y", "lower"));
///
/// assert_eq!(start_word.output_push, vec![Emit::Flush, Emit::text("a")]);
/// assert_eq!(abbreviate.input_push.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<S, T> {
    pub input_push: Vec<Token<T>>,
    pub output_push: Vec<Emit>,
    pub next: S,
}

impl<S, T> Transition<S, T> {
    /// A transition to `next` that pushes nothing.
    pub fn to(next: S) -> Self {
        Self {
            input_push: Vec::new(),
            output_push: Vec::new(),
            next,
        }
    }

    /// Append literal text to the output.
    pub fn emit(mut self, text: impl Into<String>) -> Self {
        self.output_push.push(Emit::text(text));
        self
    }

    /// Append a flush marker to the output.
    pub fn flush(mut self) -> Self {
        self.output_push.push(Emit::Flush);
        self
    }

    /// Re-queue a token ahead of the pending input.
    pub fn push(mut self, token: Token<T>) -> Self {
        self.input_push.push(token);
        self
    }

    /// Re-queue several tokens ahead of the pending input, keeping their order.
    pub fn push_all(mut self, tokens: impl IntoIterator<Item = Token<T>>) -> Self {
        self.input_push.extend(tokens);
        self
    }
}

impl<S: PartialEq, T: PartialEq> Transition<S, T> {
    /// True when applying this transition in `state` would put `token` back
    /// on the queue unchanged without leaving the state: a guaranteed loop.
    pub fn requeues_unchanged(&self, token: &Token<T>, state: &S) -> bool {
        self.next == *state && self.input_push.iter().any(|pushed| pushed == token)
    }
}
