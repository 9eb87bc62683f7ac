//! Tokens: the unit every machine consumes and produces.

use serde::{Deserialize, Serialize};

/// A piece of text with an optional classification tag.
///
/// Tokens are immutable values. Tags are opaque to the engine and are only
/// ever compared by equality; raw character input carries no tag.
///
/// # Example
///
/// ```rust
/// use braille_fsm::core::Token;
///
/// let raw: Token<&str> = Token::untagged("a");
/// let word = Token::new("hello", "lower");
///
/// assert_eq!(raw.tag(), None);
/// assert_eq!(word.tag(), Some(&"lower"));
/// assert_eq!(word.text(), "hello");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token<T> {
    text: String,
    tag: Option<T>,
}

impl<T> Token<T> {
    /// Create a tagged token.
    pub fn new(text: impl Into<String>, tag: T) -> Self {
        Self {
            text: text.into(),
            tag: Some(tag),
        }
    }

    /// Create a token with no tag.
    pub fn untagged(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tag(&self) -> Option<&T> {
        self.tag.as_ref()
    }

    /// Number of characters (not bytes) in the token text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn into_parts(self) -> (String, Option<T>) {
        (self.text, self.tag)
    }
}

/// Wrap every character of `text` as an untagged token, in order.
pub fn char_tokens<T>(text: &str) -> impl Iterator<Item = Token<T>> + '_ {
    text.chars().map(|c| Token::untagged(c.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_compare_by_text_and_tag() {
        assert_eq!(Token::new("ab", 1), Token::new("ab", 1));
        assert_ne!(Token::new("ab", 1), Token::new("ab", 2));
        assert_ne!(Token::new("ab", 1), Token::untagged("ab"));
    }

    #[test]
    fn char_tokens_split_by_scalar_value() {
        let tokens: Vec<Token<()>> = char_tokens("a⠁b").collect();
        let texts: Vec<&str> = tokens.iter().map(Token::text).collect();

        assert_eq!(texts, vec!["a", "⠁", "b"]);
        assert!(tokens.iter().all(|t| t.tag().is_none()));
    }

    #[test]
    fn char_len_counts_characters() {
        let token: Token<()> = Token::untagged("⠁⠃");
        assert_eq!(token.char_len(), 2);
        assert_eq!(token.text().len(), 6);
    }

    #[test]
    fn token_serializes_with_tag() {
        let token = Token::new("Hi", "mixed".to_string());
        let json = serde_json::to_string(&token).unwrap();
        let back: Token<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(token, back);
    }
}
