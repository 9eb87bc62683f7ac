//! Classifying tokenizer: raw characters into tagged runs.
//!
//! Letters and digits merge into progressively coarser runs (lower or upper,
//! then mixed, then alphanumeric) so that downstream stages see the longest
//! possible span. Entering or leaving whitespace or punctuation always
//! closes the run in progress.

use crate::builder::{BuildError, MachineBuilder};
use crate::core::{Token, Transition};
use crate::engine::{Machine, RunError};
use crate::state_enum;

use super::cells::Cell;

state_enum! {
    /// Classification of a run of input; doubles as the tokenizer's state.
    #[serde(rename_all = "snake_case")]
    pub enum RunClass {
        Whitespace,
        Lower,
        Upper,
        Mixed,
        Alphanumeric,
        Number,
        Punctuation,
    }
}

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const WHITESPACE: &str = "\t ";
pub const PUNCTUATION: &str = ",.;:";

/// Class of a single input character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CharClass {
    Lower,
    Upper,
    Digit,
    White,
    Punct,
}

impl CharClass {
    /// The run a character of this class starts on its own.
    fn run(self) -> RunClass {
        match self {
            Self::Lower => RunClass::Lower,
            Self::Upper => RunClass::Upper,
            Self::Digit => RunClass::Number,
            Self::White => RunClass::Whitespace,
            Self::Punct => RunClass::Punctuation,
        }
    }
}

impl RunClass {
    /// Runs built only from letters and digits.
    pub fn is_word(self) -> bool {
        !matches!(self, Self::Whitespace | Self::Punctuation)
    }
}

/// Run that results from extending `run` with a character of `class`, and
/// whether the run in progress has to be flushed first.
fn extend(run: RunClass, class: CharClass) -> (RunClass, bool) {
    use CharClass as C;
    use RunClass as R;

    let merged = match (run, class) {
        (R::Whitespace, C::White) | (R::Punctuation, C::Punct) => Some(run),
        (R::Lower, C::Lower) => Some(R::Lower),
        (R::Upper, C::Upper) => Some(R::Upper),
        (R::Lower, C::Upper) | (R::Upper, C::Lower) | (R::Mixed, C::Lower | C::Upper) => {
            Some(R::Mixed)
        }
        (R::Number, C::Digit) => Some(R::Number),
        (R::Number, C::Lower | C::Upper)
        | (R::Lower | R::Upper | R::Mixed | R::Alphanumeric, C::Digit)
        | (R::Alphanumeric, C::Lower | C::Upper) => Some(R::Alphanumeric),
        _ => None,
    };

    match merged {
        Some(next) => (next, false),
        None => (class.run(), true),
    }
}

fn characters() -> impl Iterator<Item = (char, CharClass)> {
    LOWERCASE
        .chars()
        .map(|c| (c, CharClass::Lower))
        .chain(UPPERCASE.chars().map(|c| (c, CharClass::Upper)))
        .chain(DIGITS.chars().map(|c| (c, CharClass::Digit)))
        .chain(WHITESPACE.chars().map(|c| (c, CharClass::White)))
        .chain(PUNCTUATION.chars().map(|c| (c, CharClass::Punct)))
        .chain(Cell::all().map(|cell| (cell.to_char(), CharClass::Punct)))
}

fn run_table(run: RunClass) -> Vec<(String, Transition<RunClass, RunClass>)> {
    characters()
        .map(|(c, class)| {
            let literal = c.to_string();
            let (next, flush) = extend(run, class);
            let transition = if flush {
                Transition::to(next).flush().emit(literal.clone())
            } else {
                Transition::to(next).emit(literal.clone())
            };
            (literal, transition)
        })
        .collect()
}

/// Build the tokenizer machine.
///
/// Pre-encoded Braille cells are classified with punctuation so they reach
/// the translator as their own runs.
pub fn tokenizer_machine() -> Result<Machine<RunClass, RunClass>, BuildError> {
    let mut builder = MachineBuilder::new().start(RunClass::Whitespace);
    for &run in RunClass::ALL {
        builder = builder.state(run, run_table(run))?;
    }

    let machine = builder.build()?;
    tracing::debug!(
        classes = RunClass::ALL.len(),
        literals = characters().count(),
        "tokenizer built"
    );
    Ok(machine)
}

/// Splits text into classified runs.
///
/// # Example
///
/// ```rust
/// use braille_fsm::braille::{RunClass, Tokenizer};
/// use braille_fsm::core::Token;
///
/// let tokenizer = Tokenizer::new().unwrap();
/// let runs = tokenizer.tokenize("Hi there.").unwrap();
/// assert_eq!(
///     runs,
///     vec![
///         Token::new("Hi", RunClass::Mixed),
///         Token::new(" ", RunClass::Whitespace),
///         Token::new("there", RunClass::Lower),
///         Token::new(".", RunClass::Punctuation),
///     ]
/// );
/// ```
pub struct Tokenizer {
    machine: Machine<RunClass, RunClass>,
}

impl Tokenizer {
    pub fn new() -> Result<Self, BuildError> {
        Ok(Self {
            machine: tokenizer_machine()?,
        })
    }

    /// Classify `text`. Characters outside the known classes are skipped.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token<RunClass>>, RunError<RunClass>> {
        self.machine.run_chars(text)
    }

    pub fn machine(&self) -> &Machine<RunClass, RunClass> {
        &self.machine
    }
}
