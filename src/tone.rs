//! # Pitch-Class Model
//!
//! Scale-degree parsing and semitone arithmetic for chord tones.
//!
//! ## Notation
//! A chord tone is written as a scale degree `1`-`7` relative to C major,
//! with an optional accidental and optional octave dots:
//!
//! ```text
//!   1     C             #4    F#           .6    A, one octave down
//!   b3    Eb            b7    Bb           3.    E, one octave up
//! ```
//!
//! Dots before the degree lower the tone by one octave each, dots after it
//! raise it. At most one accidental (`#` or `b`) is allowed, on either side
//! of the digit.
//!
//! ## Pitch Classes
//! [`PitchClass`] reduces a tone to one of 12 semitone positions. Two
//! spellings of the same position (`#1` and `b2`) compare equal; the
//! accidental the tone was written with is kept only as a display bias
//! for [`preferred_letter_name`].
//!
//! ## Related Modules
//! - `fretboard` - Builds its fret table with [`transpose`]
//! - `classify` - Measures intervals with [`semitone_distance`]

use crate::error::ChordError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Semitone offset of each natural scale degree from degree 1.
const DEGREE_SEMITONES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Solfege syllable for each scale degree.
const SYLLABLES: [&str; 7] = ["do", "re", "mi", "fa", "sol", "la", "si"];

/// Chromatic scale in scale-degree spelling.
///
/// Each entry is `(natural or sharpened degree, flattened degree)`. Entries with
/// a flattened degree have two valid spellings: `#degree` and `bflat_degree`.
const CHROMATIC_SCALE: [(u8, Option<u8>); 12] = [
    (1, None),
    (1, Some(2)),
    (2, None),
    (2, Some(3)),
    (3, None),
    (4, None),
    (4, Some(5)),
    (5, None),
    (5, Some(6)),
    (6, None),
    (6, Some(7)),
    (7, None),
];

/// Letter names per semitone index as `(sharp spelling, flat spelling)`.
const LETTER_NAMES: [(&str, &str); 12] = [
    ("C", "C"),
    ("C#", "Db"),
    ("D", "D"),
    ("D#", "Eb"),
    ("E", "E"),
    ("F", "F"),
    ("F#", "Gb"),
    ("G", "G"),
    ("G#", "Ab"),
    ("A", "A"),
    ("A#", "Bb"),
    ("B", "B"),
];

/// Accidental on a scale degree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Accidental::Sharp),
            'b' => Some(Accidental::Flat),
            _ => None,
        }
    }

    pub fn semitone_offset(self) -> i32 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        }
    }
}

/// One requested chord tone: scale degree, accidental and octave offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScaleTone {
    degree: u8,
    accidental: Accidental,
    octave: i8,
}

impl ScaleTone {
    /// Callers guarantee `degree` is in 1..=7.
    pub(crate) const fn new(degree: u8, accidental: Accidental, octave: i8) -> Self {
        Self {
            degree,
            accidental,
            octave,
        }
    }

    /// Parse a chord-tone token such as `1`, `b3`, `#5`, `.6` or `3.`.
    ///
    /// # Example
    /// ```
    /// use fretchord::{Accidental, ScaleTone};
    ///
    /// let tone = ScaleTone::parse(".b7").unwrap();
    /// assert_eq!(tone.degree(), 7);
    /// assert_eq!(tone.accidental(), Accidental::Flat);
    /// assert_eq!(tone.octave(), -1);
    /// ```
    ///
    /// # Errors
    /// Returns [`ChordError::InvalidTone`] when the digit is missing or outside
    /// 1-7, when more than one accidental or digit is present, or when the
    /// octave dots are malformed.
    pub fn parse(token: &str) -> Result<Self, ChordError> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(ChordError::invalid_tone(token, "empty tone"));
        }

        let mut leading_dots = 0usize;
        let mut trailing_dots = 0usize;
        let mut accidental: Option<Accidental> = None;
        let mut degree: Option<u8> = None;

        for c in trimmed.chars() {
            match c {
                '.' if degree.is_none() => {
                    if accidental.is_some() {
                        return Err(ChordError::invalid_tone(
                            token,
                            "octave marker between accidental and scale degree",
                        ));
                    }
                    leading_dots += 1;
                }
                '.' => trailing_dots += 1,
                '#' | 'b' => {
                    if accidental.is_some() {
                        return Err(ChordError::invalid_tone(token, "more than one accidental"));
                    }
                    if trailing_dots > 0 {
                        return Err(ChordError::invalid_tone(
                            token,
                            "accidental after octave markers",
                        ));
                    }
                    accidental = Accidental::from_char(c);
                }
                '0'..='9' => {
                    if degree.is_some() {
                        return Err(ChordError::invalid_tone(token, "more than one scale degree"));
                    }
                    let digit = c as u8 - b'0';
                    if !(1..=7).contains(&digit) {
                        return Err(ChordError::invalid_tone(token, "scale degree must be 1-7"));
                    }
                    degree = Some(digit);
                }
                other => {
                    return Err(ChordError::invalid_tone(
                        token,
                        format!("unexpected character '{}'", other),
                    ));
                }
            }
        }

        let degree = degree.ok_or_else(|| ChordError::invalid_tone(token, "missing scale degree"))?;
        if leading_dots > 0 && trailing_dots > 0 {
            return Err(ChordError::invalid_tone(
                token,
                "octave markers on both sides of the scale degree",
            ));
        }
        let octave = i8::try_from(trailing_dots)
            .ok()
            .and_then(|up| i8::try_from(leading_dots).ok().map(|down| up - down))
            .ok_or_else(|| ChordError::invalid_tone(token, "too many octave markers"))?;

        Ok(Self::new(degree, accidental.unwrap_or_default(), octave))
    }

    pub fn degree(&self) -> u8 {
        self.degree
    }

    pub fn accidental(&self) -> Accidental {
        self.accidental
    }

    pub fn octave(&self) -> i8 {
        self.octave
    }

    /// Semitones above degree 1 of the reference octave, ignoring `octave`.
    /// May fall outside 0..12 for `b1` and `#7`.
    pub fn semitone(&self) -> i32 {
        DEGREE_SEMITONES[usize::from(self.degree - 1)] + self.accidental.semitone_offset()
    }

    pub fn absolute_semitone(&self) -> i32 {
        i32::from(self.octave) * 12 + self.semitone()
    }

    pub fn pitch_class(&self) -> PitchClass {
        PitchClass::new(self.semitone(), self.accidental)
    }

    /// The same spelling with the octave dots dropped.
    pub fn without_octave(&self) -> Self {
        Self::new(self.degree, self.accidental, 0)
    }

    /// Letter name (`C`, `Eb`, `F#`) using the tone's own accidental as bias.
    pub fn letter_name(&self) -> &'static str {
        self.pitch_class().letter_name()
    }

    /// Solfege syllable of the scale degree (`do`, `re`, `mi`, ...).
    pub fn syllable(&self) -> &'static str {
        SYLLABLES[usize::from(self.degree - 1)]
    }
}

impl FromStr for ScaleTone {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ScaleTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dots = ".".repeat(usize::from(self.octave.unsigned_abs()));
        if self.octave < 0 {
            f.write_str(&dots)?;
        }
        write!(f, "{}{}", self.accidental.symbol(), self.degree)?;
        if self.octave > 0 {
            f.write_str(&dots)?;
        }
        Ok(())
    }
}

impl Serialize for ScaleTone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A pitch reduced to one of 12 semitone positions.
///
/// Equality and hashing look at the semitone index only; `bias` records how
/// the tone was spelled and only affects [`PitchClass::letter_name`].
#[derive(Debug, Clone, Copy)]
pub struct PitchClass {
    index: u8,
    bias: Accidental,
}

impl PitchClass {
    pub fn new(semitone: i32, bias: Accidental) -> Self {
        Self {
            index: semitone.rem_euclid(12) as u8,
            bias,
        }
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn bias(&self) -> Accidental {
        self.bias
    }

    pub fn letter_name(&self) -> &'static str {
        preferred_letter_name(*self, self.bias == Accidental::Flat)
    }
}

impl PartialEq for PitchClass {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for PitchClass {}

impl Hash for PitchClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

/// The one or two equally valid spellings of a transposed tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spellings {
    Single(ScaleTone),
    /// Sharp spelling first, flat spelling second.
    Enharmonic(ScaleTone, ScaleTone),
}

impl Spellings {
    fn for_index(index: u8, octave: i8) -> Self {
        match CHROMATIC_SCALE[usize::from(index)] {
            (degree, None) => Spellings::Single(ScaleTone::new(degree, Accidental::Natural, octave)),
            (sharp, Some(flat)) => Spellings::Enharmonic(
                ScaleTone::new(sharp, Accidental::Sharp, octave),
                ScaleTone::new(flat, Accidental::Flat, octave),
            ),
        }
    }

    /// Resolve to one spelling; `prefer_flat` only matters for enharmonic pairs.
    pub fn prefer(&self, prefer_flat: bool) -> ScaleTone {
        match *self {
            Spellings::Single(tone) => tone,
            Spellings::Enharmonic(sharp, flat) => {
                if prefer_flat {
                    flat
                } else {
                    sharp
                }
            }
        }
    }

    pub fn pitch_class(&self) -> PitchClass {
        self.prefer(false).pitch_class()
    }

    pub fn is_enharmonic(&self) -> bool {
        matches!(self, Spellings::Enharmonic(..))
    }

    pub fn iter(&self) -> impl Iterator<Item = ScaleTone> {
        let (first, second) = match *self {
            Spellings::Single(tone) => (tone, None),
            Spellings::Enharmonic(sharp, flat) => (sharp, Some(flat)),
        };
        std::iter::once(first).chain(second)
    }
}

/// Shift a tone by `semitones`, folding whole octaves into the octave offset.
///
/// # Example
/// ```
/// use fretchord::{transpose, ScaleTone, Spellings};
///
/// let e = ScaleTone::parse("3").unwrap();
/// let up = transpose(e, 2);
/// assert!(up.is_enharmonic());
/// assert_eq!(up.prefer(false).to_string(), "#4");
/// assert_eq!(up.prefer(true).to_string(), "b5");
///
/// let b = ScaleTone::parse("7").unwrap();
/// assert_eq!(transpose(b, 1), Spellings::Single(ScaleTone::parse("1.").unwrap()));
/// ```
pub fn transpose(tone: ScaleTone, semitones: i32) -> Spellings {
    let absolute = tone.absolute_semitone() + semitones;
    let octave = absolute
        .div_euclid(12)
        .clamp(i32::from(i8::MIN), i32::from(i8::MAX)) as i8;
    let index = absolute.rem_euclid(12) as u8;
    Spellings::for_index(index, octave)
}

/// Ascending distance from `from` to `to`, in 0..=11.
pub fn semitone_distance(from: PitchClass, to: PitchClass) -> u8 {
    (i32::from(to.index) - i32::from(from.index)).rem_euclid(12) as u8
}

/// Letter name of a pitch class with degree `1` = `C`.
pub fn preferred_letter_name(pitch: PitchClass, prefer_flat: bool) -> &'static str {
    let (sharp, flat) = LETTER_NAMES[usize::from(pitch.index)];
    if prefer_flat {
        flat
    } else {
        sharp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(s: &str) -> ScaleTone {
        ScaleTone::parse(s).unwrap()
    }

    #[test]
    fn test_parse_plain_and_accidentals() {
        assert_eq!(tone("1"), ScaleTone::new(1, Accidental::Natural, 0));
        assert_eq!(tone("b3"), ScaleTone::new(3, Accidental::Flat, 0));
        assert_eq!(tone("#5"), ScaleTone::new(5, Accidental::Sharp, 0));
        // Accidental after the digit is accepted too
        assert_eq!(tone("5#"), ScaleTone::new(5, Accidental::Sharp, 0));
    }

    #[test]
    fn test_parse_octave_markers() {
        assert_eq!(tone("3.").octave(), 1);
        assert_eq!(tone("3..").octave(), 2);
        assert_eq!(tone(".6").octave(), -1);
        assert_eq!(tone("..6").octave(), -2);
        assert_eq!(tone(".#4"), ScaleTone::new(4, Accidental::Sharp, -1));
        assert_eq!(tone("b7."), ScaleTone::new(7, Accidental::Flat, 1));
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "0", "8", "9", "#", "b", "#b3", "bb3", "12", ".1.", "#.1", "1.#", "x1", "1 3"] {
            let result = ScaleTone::parse(bad);
            assert!(
                matches!(result, Err(ChordError::InvalidTone { .. })),
                "expected InvalidTone for {:?}, got {:?}",
                bad,
                result
            );
        }
    }

    #[test]
    fn test_parse_error_messages() {
        match ScaleTone::parse("8") {
            Err(ChordError::InvalidTone { token, message }) => {
                assert_eq!(token, "8");
                assert!(message.contains("1-7"));
            }
            other => panic!("Expected InvalidTone, got {:?}", other),
        }
        match ScaleTone::parse("#3b") {
            Err(ChordError::InvalidTone { message, .. }) => {
                assert!(message.contains("more than one accidental"));
            }
            other => panic!("Expected InvalidTone, got {:?}", other),
        }
    }

    #[test]
    fn test_display_round_trip_shape() {
        assert_eq!(tone(".#4").to_string(), ".#4");
        assert_eq!(tone("4#").to_string(), "#4");
        assert_eq!(tone("b7..").to_string(), "b7..");
        assert_eq!(tone("5").to_string(), "5");
    }

    #[test]
    fn test_pitch_class_enharmonic_equality() {
        assert_eq!(tone("#1").pitch_class(), tone("b2").pitch_class());
        assert_eq!(tone("#3").pitch_class(), tone("4").pitch_class());
        assert_eq!(tone("#7").pitch_class(), tone("1").pitch_class());
        assert_eq!(tone("b1").pitch_class(), tone("7").pitch_class());
        assert_eq!(tone(".5").pitch_class(), tone("5.").pitch_class());
        assert_ne!(tone("1").pitch_class(), tone("2").pitch_class());
    }

    #[test]
    fn test_transpose_dual_spellings() {
        let spellings = transpose(tone("1"), 1);
        let all: Vec<String> = spellings.iter().map(|t| t.to_string()).collect();
        assert_eq!(all, vec!["#1", "b2"]);

        let from_sharp = transpose(tone("#1"), 0).pitch_class();
        let from_flat = transpose(tone("b2"), 0).pitch_class();
        assert_eq!(from_sharp, from_flat);
        assert_eq!(from_sharp.index(), 1);
    }

    #[test]
    fn test_transpose_octave_folding() {
        // Open low E (.3) up 15 frets = G, same octave as the open G string
        assert_eq!(transpose(tone(".3"), 15).prefer(false), tone("5"));
        assert_eq!(transpose(tone("1"), -1).prefer(false), tone(".7"));
        assert_eq!(transpose(tone("1"), 24).prefer(false), tone("1.."));
        assert_eq!(transpose(tone("#7"), 0).prefer(false), tone("1."));
    }

    #[test]
    fn test_semitone_distance_wraps() {
        assert_eq!(semitone_distance(tone("1").pitch_class(), tone("3").pitch_class()), 4);
        assert_eq!(semitone_distance(tone("3").pitch_class(), tone("1").pitch_class()), 8);
        assert_eq!(semitone_distance(tone("5").pitch_class(), tone("5").pitch_class()), 0);
        assert_eq!(semitone_distance(tone("7").pitch_class(), tone("2").pitch_class()), 3);
    }

    #[test]
    fn test_letter_names_follow_bias() {
        assert_eq!(tone("1").letter_name(), "C");
        assert_eq!(tone("#1").letter_name(), "C#");
        assert_eq!(tone("b2").letter_name(), "Db");
        assert_eq!(tone("b7").letter_name(), "Bb");
        assert_eq!(tone("#6").letter_name(), "A#");
        assert_eq!(tone("#3").letter_name(), "F");
        assert_eq!(preferred_letter_name(tone("#4").pitch_class(), true), "Gb");
    }

    #[test]
    fn test_syllables() {
        let names: Vec<&str> = ["1", "2", "3", "4", "5", "6", "7"]
            .iter()
            .map(|s| tone(s).syllable())
            .collect();
        assert_eq!(names, vec!["do", "re", "mi", "fa", "sol", "la", "si"]);
    }
}
