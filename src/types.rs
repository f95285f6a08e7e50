//! Fingering data type definitions
//!
//! This module defines the per-string decisions, the six-string chains the
//! search produces, and the report handed back to callers.

use crate::chord::ChordToneSet;
use crate::classify::ChordName;
use crate::fretboard::STRING_COUNT;
use crate::tone::ScaleTone;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// One string's decision: muted, or a fret sounding one of the chord tones.
///
/// # Fields
/// - `string`: String number, 1 (high E) to 6 (low E)
/// - `fret`: Fret pressed, `None` when the string is muted (0 = open)
/// - `tone`: The requested tone this string sounds, without octave dots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFingering {
    pub string: u8,
    pub fret: Option<u8>,
    pub tone: Option<ScaleTone>,
}

impl StringFingering {
    pub fn muted(string: u8) -> Self {
        Self {
            string,
            fret: None,
            tone: None,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.fret.is_none()
    }

    pub fn is_open(&self) -> bool {
        self.fret == Some(0)
    }

    fn mute(&mut self) {
        self.fret = None;
        self.tone = None;
    }
}

/// A complete assignment for all six strings, ordered string 1 to 6.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FingeringChain {
    strings: [StringFingering; STRING_COUNT],
}

impl FingeringChain {
    /// A chain with every string muted.
    pub fn muted() -> Self {
        Self {
            strings: std::array::from_fn(|i| StringFingering::muted(i as u8 + 1)),
        }
    }

    /// Build a chain from `(fret, tone)` pairs for strings 1 to 6.
    ///
    /// # Example
    /// ```
    /// use fretchord::{FingeringChain, ScaleTone};
    ///
    /// let c = ScaleTone::parse("1").unwrap();
    /// let e = ScaleTone::parse("3").unwrap();
    /// let g = ScaleTone::parse("5").unwrap();
    /// let chain = FingeringChain::from_frets([
    ///     Some((0, e)), Some((1, c)), Some((0, g)), Some((2, e)), Some((3, c)), None,
    /// ]);
    /// assert_eq!(chain.to_string(), "x32010");
    /// ```
    pub fn from_frets(frets: [Option<(u8, ScaleTone)>; STRING_COUNT]) -> Self {
        let mut chain = Self::muted();
        for (slot, fret) in chain.strings.iter_mut().zip(frets) {
            if let Some((fret, tone)) = fret {
                slot.fret = Some(fret);
                slot.tone = Some(tone);
            }
        }
        chain
    }

    pub(crate) fn set(&mut self, string: u8, fret: u8, tone: ScaleTone) {
        if let Some(slot) = self.slot_mut(string) {
            slot.fret = Some(fret);
            slot.tone = Some(tone);
        }
    }

    pub(crate) fn mute(&mut self, string: u8) {
        if let Some(slot) = self.slot_mut(string) {
            slot.mute();
        }
    }

    fn slot_mut(&mut self, string: u8) -> Option<&mut StringFingering> {
        self.strings.get_mut(usize::from(string).checked_sub(1)?)
    }

    pub fn strings(&self) -> &[StringFingering] {
        &self.strings
    }

    /// The decision for `string` (1-6).
    pub fn string(&self, string: u8) -> Option<&StringFingering> {
        self.strings.get(usize::from(string).checked_sub(1)?)
    }

    pub fn sounding(&self) -> impl Iterator<Item = &StringFingering> {
        self.strings.iter().filter(|s| !s.is_muted())
    }

    pub fn sounding_count(&self) -> usize {
        self.sounding().count()
    }

    /// Lowest fret among sounding strings (0 when any string rings open).
    pub fn min_fret(&self) -> Option<u8> {
        self.sounding().filter_map(|s| s.fret).min()
    }

    pub fn max_fret(&self) -> Option<u8> {
        self.sounding().filter_map(|s| s.fret).max()
    }

    /// Fingers needed: one for the lowest fret when it is not open (it may be
    /// a barre), plus one for every string fretted above it.
    pub fn required_fingers(&self) -> usize {
        let Some(min_fret) = self.min_fret() else {
            return 0;
        };
        let barre = usize::from(min_fret > 0);
        barre
            + self
                .sounding()
                .filter(|s| s.fret.is_some_and(|fret| fret > min_fret))
                .count()
    }

    /// Number of different pitch classes the chain sounds.
    pub fn distinct_pitch_count(&self) -> usize {
        self.sounding()
            .filter_map(|s| s.tone.map(|tone| tone.pitch_class()))
            .collect::<HashSet<_>>()
            .len()
    }

    /// The lowest-pitched sounding string (highest string number).
    pub fn bass(&self) -> Option<&StringFingering> {
        self.strings.iter().rev().find(|s| !s.is_muted())
    }
}

/// Tab notation from string 6 to string 1 (`x32010`); frets above 9 switch
/// to dash-separated form (`x-10-12-12-12-10`).
impl fmt::Display for FingeringChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marks: Vec<String> = self
            .strings
            .iter()
            .rev()
            .map(|s| match s.fret {
                Some(fret) => fret.to_string(),
                None => "x".to_string(),
            })
            .collect();
        let separator = if self.max_fret().unwrap_or(0) > 9 { "-" } else { "" };
        f.write_str(&marks.join(separator))
    }
}

/// Everything one query produced: the tones, their name and the fingerings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordReport {
    pub tones: ChordToneSet,
    #[serde(flatten)]
    pub name: ChordName,
    pub fingerings: Vec<FingeringChain>,
}

impl ChordReport {
    /// True when no practical fingering was found.
    pub fn is_unplayable(&self) -> bool {
        self.fingerings.is_empty()
    }

    /// Each fingering paired with the shared chord name.
    pub fn results(&self) -> impl Iterator<Item = ChordResult<'_>> {
        self.fingerings.iter().map(move |chain| ChordResult {
            chain,
            name: &self.name,
        })
    }
}

/// One accepted fingering with the name shared by its whole query.
#[derive(Debug, Clone, Copy)]
pub struct ChordResult<'a> {
    pub chain: &'a FingeringChain,
    pub name: &'a ChordName,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(s: &str) -> ScaleTone {
        ScaleTone::parse(s).unwrap()
    }

    fn open_c() -> FingeringChain {
        FingeringChain::from_frets([
            Some((0, tone("3"))),
            Some((1, tone("1"))),
            Some((0, tone("5"))),
            Some((2, tone("3"))),
            Some((3, tone("1"))),
            None,
        ])
    }

    fn barre_f() -> FingeringChain {
        FingeringChain::from_frets([
            Some((1, tone("4"))),
            Some((1, tone("1"))),
            Some((2, tone("6"))),
            Some((3, tone("4"))),
            Some((3, tone("1"))),
            Some((1, tone("4"))),
        ])
    }

    #[test]
    fn test_muted_chain_shape() {
        let chain = FingeringChain::muted();
        assert_eq!(chain.strings().len(), STRING_COUNT);
        assert_eq!(chain.sounding_count(), 0);
        assert_eq!(chain.min_fret(), None);
        assert_eq!(chain.required_fingers(), 0);
        assert_eq!(chain.to_string(), "xxxxxx");
        let numbers: Vec<u8> = chain.strings().iter().map(|s| s.string).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_open_chord_metrics() {
        let chain = open_c();
        assert_eq!(chain.sounding_count(), 5);
        assert_eq!(chain.min_fret(), Some(0));
        assert_eq!(chain.max_fret(), Some(3));
        // Open strings need no finger
        assert_eq!(chain.required_fingers(), 3);
        assert_eq!(chain.distinct_pitch_count(), 3);
        assert_eq!(chain.bass().map(|s| s.string), Some(5));
    }

    #[test]
    fn test_barre_counts_as_one_finger() {
        let chain = barre_f();
        assert_eq!(chain.min_fret(), Some(1));
        // Barre + three strings above it
        assert_eq!(chain.required_fingers(), 4);
        assert_eq!(chain.to_string(), "133211");
    }

    #[test]
    fn test_mute_and_set() {
        let mut chain = open_c();
        chain.mute(1);
        assert!(chain.string(1).unwrap().is_muted());
        assert_eq!(chain.string(1).unwrap().tone, None);
        chain.set(6, 3, tone("5"));
        assert_eq!(chain.string(6).unwrap().fret, Some(3));
        // Out-of-range strings are ignored
        chain.mute(0);
        chain.set(7, 1, tone("1"));
        assert_eq!(chain.to_string(), "33201x");
    }

    #[test]
    fn test_high_fret_display() {
        let chain = FingeringChain::from_frets([
            Some((10, tone("6"))),
            Some((10, tone("3"))),
            Some((9, tone("1"))),
            Some((10, tone("6"))),
            Some((12, tone("3"))),
            None,
        ]);
        assert_eq!(chain.to_string(), "x-12-10-9-10-10");
    }
}
