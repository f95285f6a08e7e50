//! # Fretboard Model
//!
//! Precomputed pitch for every (string, fret) position of a six-string guitar
//! in standard tuning, spelled in scale degrees of C.
//!
//! Strings are numbered 1 (high E) to 6 (low E). The table is built once and
//! never mutated, so a single [`Fretboard`] can be shared by reference across
//! any number of concurrent queries.

use crate::tone::{transpose, Accidental, PitchClass, ScaleTone, Spellings};

/// Number of strings.
pub const STRING_COUNT: usize = 6;

/// Highest fret considered.
pub const MAX_FRET: u8 = 15;

const FRET_COUNT: usize = MAX_FRET as usize + 1;

/// Open-string tones for strings 1 to 6: E4 B3 G3 D3 A2 E2.
pub const STANDARD_TUNING: [ScaleTone; STRING_COUNT] = [
    ScaleTone::new(3, Accidental::Natural, 1),
    ScaleTone::new(7, Accidental::Natural, 0),
    ScaleTone::new(5, Accidental::Natural, 0),
    ScaleTone::new(2, Accidental::Natural, 0),
    ScaleTone::new(6, Accidental::Natural, -1),
    ScaleTone::new(3, Accidental::Natural, -1),
];

/// Pitch table for the standard-tuned fretboard
#[derive(Debug, Clone)]
pub struct Fretboard {
    table: [[Spellings; FRET_COUNT]; STRING_COUNT],
}

impl Fretboard {
    pub fn standard() -> Self {
        let table = std::array::from_fn(|string| {
            let open = STANDARD_TUNING[string];
            std::array::from_fn(|fret| transpose(open, fret as i32))
        });
        Self { table }
    }

    /// Spellings sounded at `string` (1-6) and `fret` (0-15).
    pub fn spellings_at(&self, string: u8, fret: u8) -> Option<&Spellings> {
        let row = self.table.get(usize::from(string).checked_sub(1)?)?;
        row.get(usize::from(fret))
    }

    pub fn pitch_at(&self, string: u8, fret: u8) -> Option<PitchClass> {
        self.spellings_at(string, fret).map(Spellings::pitch_class)
    }

    /// Ascending frets in `low..=high` where `string` sounds `pitch`.
    ///
    /// The range is clamped to [`MAX_FRET`]; an unknown string gives an empty list.
    ///
    /// # Example
    /// ```
    /// use fretchord::{Fretboard, ScaleTone, MAX_FRET};
    ///
    /// let board = Fretboard::standard();
    /// let c = ScaleTone::parse("1").unwrap().pitch_class();
    /// // C on the A string (string 5)
    /// assert_eq!(board.find_frets(c, 5, 0, MAX_FRET), vec![3, 15]);
    /// assert_eq!(board.find_frets(c, 5, 4, 10), Vec::<u8>::new());
    /// ```
    pub fn find_frets(&self, pitch: PitchClass, string: u8, low: u8, high: u8) -> Vec<u8> {
        let high = high.min(MAX_FRET);
        if low > high {
            return Vec::new();
        }
        (low..=high)
            .filter(|&fret| self.pitch_at(string, fret) == Some(pitch))
            .collect()
    }
}

impl Default for Fretboard {
    fn default() -> Self {
        Self::standard()
    }
}
