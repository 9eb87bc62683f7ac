//! Six-dot cells and their Unicode code points.
//!
//! Dot numbering within a cell:
//!
//! ```text
//! 1 4
//! 2 5
//! 3 6
//! ```
//!
//! A dot pattern is written as two columns, dots 1-3 then dots 4-6, e.g.
//! `"101 000"` for dots 1 and 3. Read in reverse, the six bits are the
//! binary offset of the glyph inside the Braille Patterns block: the two
//! high bits (dots 6 and 5) select a page of sixteen glyphs, the four low
//! bits (dots 4 to 1) the glyph within the page.
//!
//! `"101 000"` reverses to `00 0101`, page 0 offset 5, so U+2805.
//! `"101 010"` reverses to `01 0101`, page 1 offset 5, so U+2815.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// First code point of the Braille Patterns block.
pub const CELL_BASE: u32 = 0x2800;

/// Number of distinct six-dot cells.
pub const CELL_COUNT: usize = 64;

/// Glyphs of all cells, indexed by dot bits. Built at compile time.
const GLYPHS: [char; CELL_COUNT] = {
    let mut glyphs = ['\u{2800}'; CELL_COUNT];
    let mut bits = 0;
    while bits < CELL_COUNT {
        glyphs[bits] = match char::from_u32(CELL_BASE + bits as u32) {
            Some(c) => c,
            None => panic!("Braille Patterns block is not valid Unicode"),
        };
        bits += 1;
    }
    glyphs
};

/// Errors converting between dot patterns, cells and characters.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CellError {
    #[error("Malformed dot pattern {0:?}; expected two columns of 0/1 like \"100 010\"")]
    MalformedPattern(String),

    #[error("Character {0:?} is not a six-dot Braille cell")]
    NotACell(char),

    #[error("Dot bits {0:#04x} set dots above dot 6")]
    BitsOutOfRange(u8),
}

/// One six-dot Braille cell. Bit `k - 1` is set when dot `k` is raised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct Cell(u8);

impl TryFrom<u8> for Cell {
    type Error = CellError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::from_bits(bits).ok_or(CellError::BitsOutOfRange(bits))
    }
}

impl Cell {
    /// The blank cell (no dots raised).
    pub const BLANK: Cell = Cell(0);

    /// Build a cell from its dot bits; bits above dot 6 are rejected.
    pub fn from_bits(bits: u8) -> Option<Self> {
        (usize::from(bits) < CELL_COUNT).then_some(Self(bits))
    }

    /// Build a cell from the numbers (1-6) of its raised dots.
    pub fn from_dots(dots: &[u8]) -> Option<Self> {
        dots.iter().try_fold(Self::BLANK, |cell, &dot| {
            (1..=6)
                .contains(&dot)
                .then(|| Self(cell.0 | 1 << (dot - 1)))
        })
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether dot `dot` (1-6) is raised.
    pub fn is_raised(self, dot: u8) -> bool {
        (1..=6).contains(&dot) && self.0 & (1 << (dot - 1)) != 0
    }

    /// Parse a two-column pattern such as `"100 010"`.
    pub fn parse_pattern(pattern: &str) -> Result<Self, CellError> {
        let malformed = || CellError::MalformedPattern(pattern.to_string());
        let chars: Vec<char> = pattern.chars().collect();
        if chars.len() != 7 || chars[3] != ' ' {
            return Err(malformed());
        }

        let mut bits = 0u8;
        let columns = chars[..3].iter().chain(&chars[4..]);
        for (dot, c) in columns.enumerate() {
            match c {
                '1' => bits |= 1 << dot,
                '0' => {}
                _ => return Err(malformed()),
            }
        }
        Ok(Self(bits))
    }

    /// Two-column pattern text, dots 1-3 then dots 4-6.
    pub fn pattern(self) -> String {
        let mut out = String::with_capacity(7);
        for dot in 1..=6u8 {
            if dot == 4 {
                out.push(' ');
            }
            out.push(if self.is_raised(dot) { '1' } else { '0' });
        }
        out
    }

    /// Glyph page (0-3) inside the Braille Patterns block.
    pub fn page(self) -> u8 {
        self.0 >> 4
    }

    /// Glyph offset (0-15) inside its page.
    pub fn offset(self) -> u8 {
        self.0 & 0x0F
    }

    pub fn to_char(self) -> char {
        GLYPHS[usize::from(self.0)]
    }

    pub fn from_char(c: char) -> Result<Self, CellError> {
        let code = u32::from(c);
        if (CELL_BASE..CELL_BASE + CELL_COUNT as u32).contains(&code) {
            Ok(Self((code - CELL_BASE) as u8))
        } else {
            Err(CellError::NotACell(c))
        }
    }

    /// All 64 cells in code point order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..CELL_COUNT as u8).map(Cell)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Whether `c` is one of the 64 six-dot cells.
pub fn is_cell(c: char) -> bool {
    Cell::from_char(c).is_ok()
}

/// Lookup service between dot patterns and cell characters, both directions.
///
/// # Example
///
/// ```rust
/// use braille_fsm::braille::CellMap;
///
/// let cells = CellMap::new();
/// assert_eq!(cells.to_char("100 000"), Some('⠁'));
/// assert_eq!(cells.to_pattern('⠁'), Some("100 000"));
/// assert_eq!(cells.len(), 64);
/// ```
#[derive(Clone, Debug)]
pub struct CellMap {
    dots_to_char: HashMap<String, char>,
    char_to_dots: HashMap<char, String>,
}

impl CellMap {
    pub fn new() -> Self {
        let mut dots_to_char = HashMap::with_capacity(CELL_COUNT);
        let mut char_to_dots = HashMap::with_capacity(CELL_COUNT);
        for cell in Cell::all() {
            dots_to_char.insert(cell.pattern(), cell.to_char());
            char_to_dots.insert(cell.to_char(), cell.pattern());
        }
        Self {
            dots_to_char,
            char_to_dots,
        }
    }

    pub fn to_char(&self, pattern: &str) -> Option<char> {
        self.dots_to_char.get(pattern).copied()
    }

    pub fn to_pattern(&self, c: char) -> Option<&str> {
        self.char_to_dots.get(&c).map(String::as_str)
    }

    /// Like `to_char`, with an error naming the bad pattern.
    pub fn char_of(&self, pattern: &str) -> Result<char, CellError> {
        self.to_char(pattern)
            .ok_or_else(|| CellError::MalformedPattern(pattern.to_string()))
    }

    /// Like `to_pattern`, with an error naming the bad character.
    pub fn pattern_of(&self, c: char) -> Result<&str, CellError> {
        self.to_pattern(c).ok_or(CellError::NotACell(c))
    }

    /// Every cell character, in code point order.
    pub fn chars(&self) -> impl Iterator<Item = char> {
        Cell::all().map(Cell::to_char)
    }

    pub fn len(&self) -> usize {
        self.dots_to_char.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dots_to_char.is_empty()
    }
}

impl Default for CellMap {
    fn default() -> Self {
        Self::new()
    }
}
