//! Translating transducer: classified runs into Grade 2 style Braille.
//!
//! A single-state machine. Letters, digits, a few punctuation marks, common
//! words and word fragments have static codes; everything else is broken
//! down by the transform hook until the pieces hit a literal. Pre-encoded
//! Braille cells pass through unchanged.
//!
//! This is a best-effort translator. It knows only a small part of the
//! contraction rules and is no substitute for an authoritative one.

use std::collections::HashMap;

use thiserror::Error;

use crate::builder::{emit_transition, literal_table, BuildError, MachineBuilder};
use crate::core::{Token, Transition};
use crate::engine::{Machine, RunError, StepBudget};
use crate::state_enum;

use super::cells::{CellError, CellMap};
use super::config::TranslatorConfig;
use super::tokenizer::RunClass;

state_enum! {
    /// The translator's only state; also tags every output record.
    #[serde(rename_all = "snake_case")]
    pub enum TranslatorState {
        Braille,
    }
}

/// Capital indicator; one marks a letter, two mark a whole word.
pub const UPPER_INDICATOR_DOTS: &str = "000 001";

/// Numeric indicator; the following letter codes a-j read as digits 1-0.
pub const NUMBER_INDICATOR_DOTS: &str = "001 111";

/// Digits in the order they share codes with the letters a-j.
pub const NUMERALS: &str = "1234567890";

const LETTER_DOTS: [(char, &str); 26] = [
    ('a', "100 000"),
    ('b', "110 000"),
    ('c', "100 100"),
    ('d', "100 110"),
    ('e', "100 010"),
    ('f', "110 100"),
    ('g', "110 110"),
    ('h', "110 010"),
    ('i', "010 100"),
    ('j', "010 110"),
    ('k', "101 000"),
    ('l', "111 000"),
    ('m', "101 100"),
    ('n', "101 110"),
    ('o', "101 010"),
    ('p', "111 100"),
    ('q', "111 110"),
    ('r', "111 010"),
    ('s', "011 100"),
    ('t', "011 110"),
    ('u', "101 001"),
    ('v', "111 001"),
    ('w', "010 111"),
    ('x', "101 101"),
    ('y', "101 111"),
    ('z', "101 011"),
];

const WORD_DOTS: [(&str, &str); 6] = [
    (" ", "000 000"),
    (",", "010 000"),
    (".", "010 011"),
    ("for", "111 111"),
    ("and", "111 101"),
    ("the", "011 101"),
];

const FRAGMENT_DOTS: [(&str, &str); 2] = [("ed", "110 101"), ("ing", "001 101")];

/// Errors setting up a translator.
#[derive(Debug, Error)]
pub enum TranslatorError {
    #[error("Failed to build translation tables: {0}")]
    Build(#[from] BuildError),

    #[error("Bad dot pattern in translation tables: {0}")]
    Cell(#[from] CellError),

    #[error("Failed to parse translator config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid translator config: {0}")]
    InvalidConfig(String),
}

/// Cells the transform hook inserts.
#[derive(Clone, Copy, Debug)]
struct Codes {
    upper: char,
    number: char,
    /// Letter codes of the digits, in `NUMERALS` order
    numerals: [char; 10],
}

impl Codes {
    fn numeral(&self, digit: char) -> Option<char> {
        NUMERALS.find(digit).map(|i| self.numerals[i])
    }
}

/// Earliest fragment inside `text`, ties going to the first configured one.
/// A fragment equal to the whole text is not a split.
fn find_fragment<'a>(text: &str, fragments: &'a [String]) -> Option<(usize, &'a str)> {
    fragments
        .iter()
        .filter(|f| f.as_str() != text)
        .filter_map(|f| text.find(f.as_str()).map(|i| (i, f.as_str())))
        .min_by_key(|(i, _)| *i)
}

/// Breaks down a run that no literal matched.
fn fallback(
    text: &str,
    tag: Option<&RunClass>,
    fragments: &[String],
    codes: Codes,
) -> Option<Transition<TranslatorState, RunClass>> {
    // Single characters have nowhere left to go.
    if text.chars().count() <= 1 {
        return None;
    }

    let stay = Transition::to(TranslatorState::Braille);
    match tag {
        // Digits go back as finished cells so no word or fragment can
        // match the letters they share codes with.
        Some(RunClass::Number) => {
            let digits = text.chars().map(|c| match codes.numeral(c) {
                Some(cell) => Token::new(cell.to_string(), RunClass::Punctuation),
                None => Token::untagged(c.to_string()),
            });
            return Some(
                stay.push(Token::new(codes.number.to_string(), RunClass::Number))
                    .push_all(digits),
            );
        }
        Some(RunClass::Upper) => {
            let upper = Token::new(codes.upper.to_string(), RunClass::Upper);
            return Some(
                stay.push(upper.clone())
                    .push(upper)
                    .push(Token::new(text.to_lowercase(), RunClass::Lower)),
            );
        }
        _ => {}
    }

    let retag = |piece: &str| match tag {
        Some(tag) => Token::new(piece, *tag),
        None => Token::untagged(piece),
    };

    if let Some((at, fragment)) = find_fragment(text, fragments) {
        let pieces = [&text[..at], fragment, &text[at + fragment.len()..]];
        return Some(stay.push_all(pieces.into_iter().filter(|p| !p.is_empty()).map(retag)));
    }

    Some(stay.push_all(text.chars().map(|c| retag(&c.to_string()))))
}

/// Translates classified runs into Braille cells.
///
/// # Example
///
/// ```rust
/// use braille_fsm::braille::{RunClass, Translator};
/// use braille_fsm::core::Token;
///
/// let translator = Translator::new().unwrap();
/// let out = translator
///     .translate_tokens(vec![Token::new("OK", RunClass::Upper)])
///     .unwrap();
/// assert_eq!(out[0].text(), "⠠⠠⠕⠅");
/// ```
pub struct Translator {
    machine: Machine<TranslatorState, RunClass>,
    config: TranslatorConfig,
    codes: Codes,
    fragment_codes: HashMap<String, char>,
}

impl Translator {
    pub fn new() -> Result<Self, TranslatorError> {
        Self::with_config(TranslatorConfig::default())
    }

    pub fn with_config(config: TranslatorConfig) -> Result<Self, TranslatorError> {
        config.check()?;

        let cells = CellMap::new();
        let state = TranslatorState::Braille;

        let letters = LETTER_DOTS
            .iter()
            .map(|&(letter, dots)| cells.char_of(dots).map(|cell| (letter, cell)))
            .collect::<Result<Vec<_>, CellError>>()?;
        let codes = Codes {
            upper: cells.char_of(UPPER_INDICATOR_DOTS)?,
            number: cells.char_of(NUMBER_INDICATOR_DOTS)?,
            numerals: std::array::from_fn(|i| letters[i].1),
        };

        let lower = letters
            .iter()
            .map(|&(letter, cell)| (letter.to_string(), emit_transition(state, cell)));
        let upper = letters.iter().map(|&(letter, cell)| {
            let emit = format!("{}{cell}", codes.upper);
            (letter.to_ascii_uppercase().to_string(), emit_transition(state, emit))
        });
        let digits = NUMERALS.chars().zip(codes.numerals).map(|(digit, cell)| {
            let emit = format!("{}{cell}", codes.number);
            (digit.to_string(), emit_transition(state, emit))
        });

        let mut fragment_codes = HashMap::with_capacity(FRAGMENT_DOTS.len());
        let mut words = Vec::with_capacity(WORD_DOTS.len() + FRAGMENT_DOTS.len());
        for (word, dots) in WORD_DOTS.into_iter().chain(FRAGMENT_DOTS) {
            let cell = cells.char_of(dots)?;
            if FRAGMENT_DOTS.iter().any(|(f, _)| *f == word) {
                fragment_codes.insert(word.to_string(), cell);
            }
            words.push((word.to_string(), emit_transition(state, cell)));
        }

        let identity = literal_table(cells.chars().map(String::from), |c| emit_transition(state, c));

        let abbreviations = config.abbreviations.iter().map(|(word, short)| {
            let push = Token::new(short.clone(), RunClass::Lower);
            (word.clone(), Transition::to(state).push(push))
        });
        let tab = (0..config.spaces_per_tab).map(|_| Token::new(" ", RunClass::Whitespace));
        let tab = std::iter::once(("\t".to_string(), Transition::to(state).push_all(tab)));

        let fragments = config.fragments.clone();
        let machine = MachineBuilder::new()
            .start(state)
            .state(state, lower)?
            .state(state, upper)?
            .state(state, digits)?
            .state(state, words)?
            .state(state, identity)?
            .state(state, abbreviations)?
            .state(state, tab)?
            .transform(move |text, tag, _state| fallback(text, tag, &fragments, codes))
            .step_budget(StepBudget::PerInputChar(config.steps_per_char()))
            .build()?;

        tracing::debug!(
            abbreviations = config.abbreviations.len(),
            fragments = config.fragments.len(),
            spaces_per_tab = config.spaces_per_tab,
            "translator built"
        );

        Ok(Self {
            machine,
            config,
            codes,
            fragment_codes,
        })
    }

    pub fn upper_indicator(&self) -> char {
        self.codes.upper
    }

    pub fn number_indicator(&self) -> char {
        self.codes.number
    }

    /// Code of a word fragment such as `"ed"`, if it has one.
    pub fn fragment_code(&self, fragment: &str) -> Option<char> {
        self.fragment_codes.get(fragment).copied()
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub fn machine(&self) -> &Machine<TranslatorState, RunClass> {
        &self.machine
    }

    /// Translate tokenizer output.
    pub fn translate_tokens<I>(
        &self,
        tokens: I,
    ) -> Result<Vec<Token<TranslatorState>>, RunError<TranslatorState>>
    where
        I: IntoIterator<Item = Token<RunClass>>,
    {
        self.machine.run(tokens)
    }

    /// Translate raw text one character at a time, without classification.
    pub fn translate_chars(
        &self,
        text: &str,
    ) -> Result<Vec<Token<TranslatorState>>, RunError<TranslatorState>> {
        self.machine.run_chars(text)
    }
}
