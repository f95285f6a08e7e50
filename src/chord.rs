//! Chord-tone sets: the parsed, size-checked input of every query.

use crate::error::ChordError;
use crate::tone::{PitchClass, ScaleTone};
use serde::Serialize;
use std::fmt;

/// Fewest tones a query may request.
pub const MIN_CHORD_TONES: usize = 3;
/// Most tones a query may request.
pub const MAX_CHORD_TONES: usize = 4;

/// Ordered chord tones; element 0 is the root.
///
/// Order matters to the classifier (intervals are measured between
/// neighbours) but not to the fingering search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChordToneSet {
    tones: Vec<ScaleTone>,
}

impl ChordToneSet {
    /// Build a set from already-parsed tones.
    ///
    /// # Errors
    /// [`ChordError::InvalidChordSize`] unless there are 3 or 4 tones.
    pub fn new(tones: Vec<ScaleTone>) -> Result<Self, ChordError> {
        if !(MIN_CHORD_TONES..=MAX_CHORD_TONES).contains(&tones.len()) {
            return Err(ChordError::InvalidChordSize(tones.len()));
        }
        Ok(Self { tones })
    }

    /// Parse every token, then check the size.
    ///
    /// # Example
    /// ```
    /// use fretchord::ChordToneSet;
    ///
    /// let set = ChordToneSet::parse(&["1", "b3", "5"]).unwrap();
    /// assert_eq!(set.len(), 3);
    /// assert_eq!(set.root().to_string(), "1");
    /// ```
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, ChordError> {
        let tones = tokens
            .iter()
            .map(|token| ScaleTone::parse(token.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(tones)
    }

    pub fn tones(&self) -> &[ScaleTone] {
        &self.tones
    }

    pub fn len(&self) -> usize {
        self.tones.len()
    }

    /// Always false for a constructed set; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }

    pub fn root(&self) -> ScaleTone {
        self.tones[0]
    }

    pub fn root_pitch(&self) -> PitchClass {
        self.root().pitch_class()
    }

    pub fn pitch_classes(&self) -> impl Iterator<Item = PitchClass> + '_ {
        self.tones.iter().map(ScaleTone::pitch_class)
    }

    /// Tones with octave dots dropped, as placed on the fretboard.
    pub(crate) fn spellings(&self) -> Vec<ScaleTone> {
        self.tones.iter().map(ScaleTone::without_octave).collect()
    }
}

impl fmt::Display for ChordToneSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<String> = self.tones.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_sizes() {
        assert_eq!(ChordToneSet::parse(&["1", "3", "5"]).unwrap().len(), 3);
        assert_eq!(ChordToneSet::parse(&["5", "7", "2", "4"]).unwrap().len(), 4);
    }

    #[test]
    fn test_invalid_sizes() {
        assert_eq!(
            ChordToneSet::parse(&["1", "3"]),
            Err(ChordError::InvalidChordSize(2))
        );
        assert_eq!(
            ChordToneSet::parse(&["1", "3", "5", "7", "2"]),
            Err(ChordError::InvalidChordSize(5))
        );
        let empty: [&str; 0] = [];
        assert_eq!(ChordToneSet::parse(&empty), Err(ChordError::InvalidChordSize(0)));
    }

    #[test]
    fn test_tone_error_wins_over_size() {
        let result = ChordToneSet::parse(&["1", "9"]);
        assert!(matches!(result, Err(ChordError::InvalidTone { .. })));
    }

    #[test]
    fn test_root_and_spellings() {
        let set = ChordToneSet::parse(&[".6", "1", "3."]).unwrap();
        assert_eq!(set.root().to_string(), ".6");
        let spellings: Vec<String> = set.spellings().iter().map(ToString::to_string).collect();
        assert_eq!(spellings, vec!["6", "1", "3"]);
        assert_eq!(set.to_string(), "[.6 1 3.]");
    }
}
