//! Canonical angle signatures
//!
//! A signature is the orientation-relative record of a stroke: the ordered
//! turns taken at each step, independent of the direction the stroke was
//! started in. Its canonical string form (one character per turn) is the key
//! sigils are registered and persisted under.
//!
//! The alphabet is fixed: `w` straight ahead, `e` right, `d` hard right,
//! `s` back, `a` hard left, `q` left.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SigilError};
use crate::hex::Turn;

/// Ordered sequence of relative turns with a canonical string encoding
///
/// The empty signature is legal and denotes a single-point sigil.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Signature(Vec<Turn>);

impl Signature {
    /// The signature of a single-point sigil
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Build a signature from a turn sequence
    pub fn new(turns: Vec<Turn>) -> Self {
        Self(turns)
    }

    /// Decode a canonical string into a turn sequence
    ///
    /// Fails on any character outside the six-letter alphabet; decoding is
    /// the exact inverse of [`Signature::canonical`] for well-formed input.
    pub fn parse(text: &str) -> Result<Self> {
        let mut turns = Vec::with_capacity(text.len());
        for (index, ch) in text.char_indices() {
            let turn = Self::turn_for(ch).ok_or(SigilError::InvalidAngle { ch, index })?;
            turns.push(turn);
        }
        Ok(Self(turns))
    }

    /// Encode the turn sequence into its canonical string
    pub fn canonical(&self) -> String {
        self.0.iter().map(|turn| Self::char_for(*turn)).collect()
    }

    /// The turns in stroke order
    pub fn turns(&self) -> &[Turn] {
        &self.0
    }

    /// Append one turn to the end of the stroke
    pub fn push(&mut self, turn: Turn) {
        self.0.push(turn);
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the single-point signature
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn char_for(turn: Turn) -> char {
        match turn {
            Turn::Forward => 'w',
            Turn::Right => 'e',
            Turn::HardRight => 'd',
            Turn::Back => 's',
            Turn::HardLeft => 'a',
            Turn::Left => 'q',
        }
    }

    fn turn_for(ch: char) -> Option<Turn> {
        match ch {
            'w' => Some(Turn::Forward),
            'e' => Some(Turn::Right),
            'd' => Some(Turn::HardRight),
            's' => Some(Turn::Back),
            'a' => Some(Turn::HardLeft),
            'q' => Some(Turn::Left),
            _ => None,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl FromStr for Signature {
    type Err = SigilError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Vec<Turn>> for Signature {
    fn from(turns: Vec<Turn>) -> Self {
        Self(turns)
    }
}

impl FromIterator<Turn> for Signature {
    fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(de::Error::custom)
    }
}
