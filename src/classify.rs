//! # Chord Quality Classifier
//!
//! Name a chord-tone set by matching the intervals between neighbouring tones
//! against ordered rule tables.
//!
//! ## Intervals
//! Intervals are ascending semitone distances between consecutive tones, so
//! the tone order matters: `1 3 5` is `(4, 3)`, a major triad, while
//! `1 5 3` is `(7, 9)` and matches nothing.
//!
//! ## Rules
//! Triads (3 tones) compare `(tone0 -> tone1, tone1 -> tone2)`:
//!
//! ```text
//!   Major           (4, 3)   ""
//!   Minor           (3, 4)   "m"
//!   Augmented       (4, 4)   "aug"
//!   Diminished      (3, 3)   "dim"
//!   SuspendedFourth (5, 2)   "sus4"
//! ```
//!
//! Sevenths (4 tones) combine the triad of tones 0-2 with `tone2 -> tone3`:
//!
//! ```text
//!   DominantSeventh     Major      + 3   "7"
//!   MinorMajorSeventh   Minor      + 4   "mM7"
//!   MajorSeventh        Major      + 4   "maj7"
//!   MinorSeventh        Minor      + 3   "m7"
//!   DiminishedSeventh   Diminished + 3   "dim7"
//!   HalfDiminished      Diminished + 4   "m7-5"
//!   DominantSharpFive   Augmented  + 2   "7#5"
//!   AugmentedSeventh    Augmented  + 3   "aug7"
//! ```
//!
//! Tables are evaluated top to bottom and the first match wins; the order is
//! part of the contract.
//!
//! ## Example
//! ```rust
//! use fretchord::{name_chord, ChordQuality};
//!
//! let name = name_chord(&["5", "7", "2", "4"])?;
//! assert_eq!(name.to_string(), "G7");
//! assert_eq!(name.quality, Some(ChordQuality::DominantSeventh));
//!
//! let unknown = name_chord(&["1", "2", "3"])?;
//! assert!(!unknown.is_resolved());
//! assert_eq!(unknown.to_string(), "C...");
//! # Ok::<(), fretchord::ChordError>(())
//! ```

use crate::chord::ChordToneSet;
use crate::tone::semitone_distance;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// Appended to the root letter when no rule names the chord.
pub const UNRESOLVED_MARKER: &str = "...";

const MINOR_SECOND_THIRD: u8 = 2;
const MINOR_THIRD: u8 = 3;
const MAJOR_THIRD: u8 = 4;
const PERFECT_FOURTH: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChordQuality {
    Major,
    Minor,
    Augmented,
    Diminished,
    SuspendedFourth,
    DominantSeventh,
    MinorMajorSeventh,
    MajorSeventh,
    MinorSeventh,
    DiminishedSeventh,
    HalfDiminished,
    DominantSharpFive,
    AugmentedSeventh,
}

impl ChordQuality {
    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Augmented => "aug",
            ChordQuality::Diminished => "dim",
            ChordQuality::SuspendedFourth => "sus4",
            ChordQuality::DominantSeventh => "7",
            ChordQuality::MinorMajorSeventh => "mM7",
            ChordQuality::MajorSeventh => "maj7",
            ChordQuality::MinorSeventh => "m7",
            ChordQuality::DiminishedSeventh => "dim7",
            ChordQuality::HalfDiminished => "m7-5",
            ChordQuality::DominantSharpFive => "7#5",
            ChordQuality::AugmentedSeventh => "aug7",
        }
    }
}

/// Triad qualities with their `(lower, upper)` third sizes, in priority order.
const TRIAD_RULES: [(ChordQuality, [u8; 2]); 5] = [
    (ChordQuality::Major, [MAJOR_THIRD, MINOR_THIRD]),
    (ChordQuality::Minor, [MINOR_THIRD, MAJOR_THIRD]),
    (ChordQuality::Augmented, [MAJOR_THIRD, MAJOR_THIRD]),
    (ChordQuality::Diminished, [MINOR_THIRD, MINOR_THIRD]),
    (ChordQuality::SuspendedFourth, [PERFECT_FOURTH, MINOR_SECOND_THIRD]),
];

/// Seventh qualities as `(quality, base triad, top interval)`, in priority order.
const SEVENTH_RULES: [(ChordQuality, ChordQuality, u8); 8] = [
    (ChordQuality::DominantSeventh, ChordQuality::Major, MINOR_THIRD),
    (ChordQuality::MinorMajorSeventh, ChordQuality::Minor, MAJOR_THIRD),
    (ChordQuality::MajorSeventh, ChordQuality::Major, MAJOR_THIRD),
    (ChordQuality::MinorSeventh, ChordQuality::Minor, MINOR_THIRD),
    (ChordQuality::DiminishedSeventh, ChordQuality::Diminished, MINOR_THIRD),
    (ChordQuality::HalfDiminished, ChordQuality::Diminished, MAJOR_THIRD),
    (ChordQuality::DominantSharpFive, ChordQuality::Augmented, MINOR_SECOND_THIRD),
    (ChordQuality::AugmentedSeventh, ChordQuality::Augmented, MINOR_THIRD),
];

/// Ascending semitone distances between consecutive tones.
pub fn intervals(tones: &ChordToneSet) -> Vec<u8> {
    let pitches: Vec<_> = tones.pitch_classes().collect();
    pitches
        .windows(2)
        .map(|pair| semitone_distance(pair[0], pair[1]))
        .collect()
}

fn is_triad(triad: ChordQuality, lower: u8, upper: u8) -> bool {
    TRIAD_RULES
        .iter()
        .any(|&(quality, pattern)| quality == triad && pattern == [lower, upper])
}

/// Quality of the tone set, or `None` when no rule matches.
pub fn classify(tones: &ChordToneSet) -> Option<ChordQuality> {
    match intervals(tones).as_slice() {
        &[lower, upper] => TRIAD_RULES
            .iter()
            .find(|(_, pattern)| *pattern == [lower, upper])
            .map(|&(quality, _)| quality),
        &[lower, upper, top] => SEVENTH_RULES
            .iter()
            .find(|&&(_, triad, interval)| is_triad(triad, lower, upper) && interval == top)
            .map(|&(quality, _, _)| quality),
        _ => None,
    }
}

/// A chord name: root letter plus quality, or unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordName {
    pub root: &'static str,
    pub quality: Option<ChordQuality>,
}

impl ChordName {
    /// Name `tones`; the root letter is spelled flat only if the root was written with `b`.
    pub fn of(tones: &ChordToneSet) -> Self {
        Self {
            root: tones.root_pitch().letter_name(),
            quality: classify(tones),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.quality.is_some()
    }
}

impl fmt::Display for ChordName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quality {
            Some(quality) => write!(f, "{}{}", self.root, quality.suffix()),
            None => write!(f, "{}{}", self.root, UNRESOLVED_MARKER),
        }
    }
}

impl Serialize for ChordName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ChordName", 3)?;
        state.serialize_field("name", &self.to_string())?;
        state.serialize_field("resolved", &self.is_resolved())?;
        state.serialize_field("quality", &self.quality)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(tokens: &[&str]) -> String {
        ChordName::of(&ChordToneSet::parse(tokens).unwrap()).to_string()
    }

    #[test]
    fn test_triads() {
        assert_eq!(name(&["1", "3", "5"]), "C");
        assert_eq!(name(&["1", "b3", "5"]), "Cm");
        assert_eq!(name(&["1", "3", "#5"]), "Caug");
        assert_eq!(name(&["1", "b3", "b5"]), "Cdim");
        assert_eq!(name(&["1", "4", "5"]), "Csus4");
    }

    #[test]
    fn test_sevenths() {
        assert_eq!(name(&["1", "3", "5", "b7"]), "C7");
        assert_eq!(name(&["1", "b3", "5", "7"]), "CmM7");
        assert_eq!(name(&["1", "3", "5", "7"]), "Cmaj7");
        assert_eq!(name(&["1", "b3", "5", "b7"]), "Cm7");
        assert_eq!(name(&["1", "b3", "b5", "6"]), "Cdim7");
        assert_eq!(name(&["1", "b3", "b5", "b7"]), "Cm7-5");
        assert_eq!(name(&["1", "3", "#5", "b7"]), "C7#5");
        assert_eq!(name(&["1", "3", "#5", "7"]), "Caug7");
    }

    #[test]
    fn test_other_roots() {
        assert_eq!(name(&["6", "1", "3"]), "Am");
        assert_eq!(name(&["5", "7", "2", "4"]), "G7");
        assert_eq!(name(&["b7", "2", "4"]), "Bb");
        assert_eq!(name(&["#4", "#6", "#1"]), "F#");
        assert_eq!(name(&["b3", "5", "b7", "2"]), "Ebmaj7");
        assert_eq!(name(&["2", "4", "6"]), "Dm");
    }

    #[test]
    fn test_octave_marks_do_not_change_quality() {
        assert_eq!(name(&[".1", "3", "5."]), "C");
        assert_eq!(name(&["5", ".7", "2.", "4.."]), "G7");
    }

    #[test]
    fn test_enharmonic_spellings_share_quality() {
        assert_eq!(name(&["1", "#2", "5"]), "Cm");
        assert_eq!(name(&["1", "3", "b6"]), "Caug");
    }

    #[test]
    fn test_unresolved() {
        assert_eq!(name(&["1", "2", "3"]), "C...");
        assert_eq!(name(&["1", "5", "3"]), "C...");
        assert_eq!(name(&["1", "3", "5", "6"]), "C...");
        let set = ChordToneSet::parse(&["b2", "2", "b3"]).unwrap();
        let chord = ChordName::of(&set);
        assert!(!chord.is_resolved());
        assert_eq!(chord.root, "Db");
    }

    #[test]
    fn test_intervals() {
        let set = ChordToneSet::parse(&["5", "7", "2", "4"]).unwrap();
        assert_eq!(intervals(&set), vec![4, 3, 3]);
        let set = ChordToneSet::parse(&["1", "5", "3"]).unwrap();
        assert_eq!(intervals(&set), vec![7, 9]);
    }

    #[test]
    fn test_seventh_table_order() {
        let order: Vec<&str> = SEVENTH_RULES.iter().map(|(q, _, _)| q.suffix()).collect();
        assert_eq!(
            order,
            vec!["7", "mM7", "maj7", "m7", "dim7", "m7-5", "7#5", "aug7"]
        );
    }
}
