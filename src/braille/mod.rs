//! Text to Braille: cell mapping, tokenizer, translator and the pipeline
//! that chains them.
//!
//! The pipeline is best-effort. It covers letters, digits, basic
//! punctuation and a handful of contractions; it does not implement the
//! full contraction rules of any Braille code.
//!
//! # Example
//!
//! ```rust
//! use braille_fsm::braille;
//!
//! assert_eq!(braille::translate("Hi there.").unwrap(), "⠠⠓⠊⠀⠞⠓⠑⠗⠑⠲");
//! ```

pub mod cells;
pub mod config;
pub mod tokenizer;
pub mod translator;

pub use cells::{is_cell, Cell, CellError, CellMap};
pub use config::TranslatorConfig;
pub use tokenizer::{RunClass, Tokenizer};
pub use translator::{Translator, TranslatorError, TranslatorState};

use std::sync::OnceLock;
use thiserror::Error;

use crate::core::Token;
use crate::engine::RunError;

/// Errors raised while translating text.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Tokenizer failed: {0}")]
    Tokenize(#[from] RunError<RunClass>),

    #[error("Translator failed: {0}")]
    Translate(#[from] RunError<TranslatorState>),

    #[error("Translation pipeline unavailable: {0}")]
    Unavailable(String),
}

/// Tokenizer and translator, built once and reused for every call.
pub struct Pipeline {
    tokenizer: Tokenizer,
    translator: Translator,
}

impl Pipeline {
    pub fn new() -> Result<Self, TranslatorError> {
        Self::with_config(TranslatorConfig::default())
    }

    pub fn with_config(config: TranslatorConfig) -> Result<Self, TranslatorError> {
        Ok(Self {
            tokenizer: Tokenizer::new()?,
            translator: Translator::with_config(config)?,
        })
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Classified runs of `text`.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token<RunClass>>, TranslateError> {
        Ok(self.tokenizer.tokenize(text)?)
    }

    /// Translate `text` into a string of Braille cells.
    pub fn translate(&self, text: &str) -> Result<String, TranslateError> {
        let runs = self.tokenize(text)?;
        let records = self.translator.translate_tokens(runs)?;
        Ok(records.iter().map(Token::text).collect())
    }
}

fn default_pipeline() -> Result<&'static Pipeline, TranslateError> {
    static DEFAULT: OnceLock<Result<Pipeline, String>> = OnceLock::new();

    DEFAULT
        .get_or_init(|| Pipeline::new().map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|e| TranslateError::Unavailable(e.clone()))
}

/// Translate `text` with the default tables.
pub fn translate(text: &str) -> Result<String, TranslateError> {
    default_pipeline()?.translate(text)
}
