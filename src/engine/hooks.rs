//! Pluggable fallback and output hooks.
//!
//! A machine's static tables only ever match literal text. Hooks let a
//! machine handle everything else: `transform` synthesizes a transition for
//! input the tables do not cover, and `postprocess` turns each flushed buffer
//! into an output record.

use crate::core::{State, Token, Transition};

/// Fallback invoked when no literal transition matches.
pub type TransformFn<S, T> =
    Box<dyn Fn(&str, Option<&T>, &S) -> Option<Transition<S, T>> + Send + Sync>;

/// Conversion of a flushed buffer into zero or one output record.
pub type PostprocessFn<S, T> = Box<dyn Fn(String, Option<&T>, &S) -> Option<Token<S>> + Send + Sync>;

/// The pair of hooks a machine runs with.
///
/// Unset hooks fall back to the default behaviour: `transform` declines
/// everything, `postprocess` wraps non-empty text in a record tagged with the
/// current state and produces nothing for empty text.
///
/// # Example
///
/// ```rust
/// use braille_fsm::core::{Token, Transition};
/// use braille_fsm::engine::Hooks;
///
/// let hooks: Hooks<String, ()> = Hooks::new().with_transform(|text, _tag, state: &String| {
///     // Break unknown words into characters.
///     (text.chars().count() > 1).then(|| {
///         Transition::to(state.clone())
///             .push_all(text.chars().map(|c| Token::untagged(c.to_string())))
///     })
/// });
///
/// let state = "default".to_string();
/// assert!(hooks.transform("ab", None, &state).is_some());
/// assert!(hooks.transform("a", None, &state).is_none());
/// assert_eq!(
///     hooks.postprocess(String::new(), None, &state),
///     None
/// );
/// ```
pub struct Hooks<S, T> {
    transform: Option<TransformFn<S, T>>,
    postprocess: Option<PostprocessFn<S, T>>,
}

impl<S: State, T> Hooks<S, T> {
    /// Hooks with default behaviour for both extension points.
    pub fn new() -> Self {
        Self {
            transform: None,
            postprocess: None,
        }
    }

    /// Install a transform hook.
    ///
    /// The hook must never hand back a transition that re-queues the token it
    /// was given, unchanged, in the same state. The engine drops such
    /// transitions rather than loop.
    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str, Option<&T>, &S) -> Option<Transition<S, T>> + Send + Sync + 'static,
    {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Install a postprocess hook.
    pub fn with_postprocess<F>(mut self, postprocess: F) -> Self
    where
        F: Fn(String, Option<&T>, &S) -> Option<Token<S>> + Send + Sync + 'static,
    {
        self.postprocess = Some(Box::new(postprocess));
        self
    }

    pub fn transform(&self, text: &str, tag: Option<&T>, state: &S) -> Option<Transition<S, T>> {
        self.transform
            .as_ref()
            .and_then(|transform| transform(text, tag, state))
    }

    pub fn postprocess(&self, text: String, tag: Option<&T>, state: &S) -> Option<Token<S>> {
        match &self.postprocess {
            Some(postprocess) => postprocess(text, tag, state),
            None => default_postprocess(text, state),
        }
    }
}

impl<S: State, T> Default for Hooks<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

fn default_postprocess<S: State>(text: String, state: &S) -> Option<Token<S>> {
    if text.is_empty() {
        None
    } else {
        Some(Token::new(text, state.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> String {
        "default".to_string()
    }

    #[test]
    fn default_transform_declines() {
        let hooks: Hooks<String, u8> = Hooks::new();
        assert!(hooks.transform("anything", Some(&1), &state()).is_none());
    }

    #[test]
    fn default_postprocess_tags_with_state() {
        let hooks: Hooks<String, u8> = Hooks::new();
        let record = hooks.postprocess("abc".to_string(), Some(&3), &state());
        assert_eq!(record, Some(Token::new("abc", state())));
    }

    #[test]
    fn default_postprocess_skips_empty_text() {
        let hooks: Hooks<String, u8> = Hooks::new();
        assert_eq!(hooks.postprocess(String::new(), None, &state()), None);
    }

    #[test]
    fn custom_postprocess_can_record_empty_runs() {
        let hooks: Hooks<String, u8> =
            Hooks::new().with_postprocess(|text, _tag, state: &String| {
                Some(Token::new(format!("[{text}]"), state.clone()))
            });

        let record = hooks.postprocess(String::new(), None, &state());
        assert_eq!(record, Some(Token::new("[]", state())));
    }

    #[test]
    fn custom_transform_sees_tag_and_state() {
        let hooks: Hooks<String, u8> = Hooks::new().with_transform(|text, tag, state| {
            (tag == Some(&9)).then(|| Transition::to(format!("{state}:{text}")))
        });

        let t = hooks.transform("x", Some(&9), &state()).unwrap();
        assert_eq!(t.next, "default:x");
        assert!(hooks.transform("x", Some(&1), &state()).is_none());
    }
}
