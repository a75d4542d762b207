use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::Color;
use crate::FontError;

/// Key of a color assignment: a bare word, or a word with an explicit
/// 1-based occurrence index (`HELLO[2]`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColorKey {
    pub word: String,
    pub index: Option<u64>,
}

impl ColorKey {
    pub fn word(word: impl Into<String>) -> Self {
        Self { word: word.into(), index: None }
    }

    pub fn indexed(word: impl Into<String>, index: u64) -> Self {
        Self { word: word.into(), index: Some(index) }
    }

    fn bare(&self) -> Option<ColorKey> {
        self.index.map(|_| ColorKey::word(self.word.clone()))
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{index}]", self.word),
            None => f.write_str(&self.word),
        }
    }
}

/// Parses `WORD` or `WORD[N]`. Anything that is not a well-formed trailing
/// `[digits]` suffix stays part of the word.
impl FromStr for ColorKey {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if key.is_empty() {
            return Err(FontError::InvalidKey(s.to_owned()));
        }

        let indexed = key.strip_suffix(']').and_then(|rest| {
            let (word, digits) = rest.rsplit_once('[')?;
            if word.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            Some(ColorKey::indexed(word, digits.parse().ok()?))
        });

        Ok(indexed.unwrap_or_else(|| ColorKey::word(key)))
    }
}

/// Per-session word colors. Later assignments to the same key overwrite.
#[derive(Clone, Debug, Default)]
pub struct ColorTable {
    entries: HashMap<ColorKey, Color>,
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, key: ColorKey, color: Color) -> Option<Color> {
        self.entries.insert(key, color)
    }

    pub fn get(&self, key: &ColorKey) -> Option<Color> {
        self.entries.get(key).copied()
    }

    /// Resolves a token's color: the exact key first, then the bare word for
    /// indexed keys, then `default`.
    pub fn resolve(&self, key: &ColorKey, default: Color) -> Color {
        self.get(key)
            .or_else(|| key.bare().and_then(|bare| self.get(&bare)))
            .unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
