//! # fretchord
//!
//! Derive playable guitar fingerings for a set of chord tones written as scale
//! degrees, and name the chord those tones form.
//!
//! ## Pipeline
//! 1. Parse tone tokens (`1`, `b3`, `#5`, `.6`) into a [`ChordToneSet`]
//! 2. Search every fret window of the standard-tuned [`Fretboard`]
//! 3. Filter the raw chains (bass rule, finger budget, tone coverage, dedup)
//! 4. Name the chord from the intervals between its tones
//!
//! ## Example
//! ```rust
//! use fretchord::find_chord;
//!
//! let report = find_chord(&["5", "7", "2", "4"])?;
//! assert_eq!(report.name.to_string(), "G7");
//! # Ok::<(), fretchord::ChordError>(())
//! ```

pub mod api;
pub mod chord;
pub mod classify;
pub mod config;
pub mod diagram;
pub mod error;
pub mod filter;
pub mod fretboard;
pub mod search;
pub mod tone;
pub mod types;

pub use api::{find_chord, name_chord, ChordFinder};
pub use chord::ChordToneSet;
pub use classify::{classify, ChordName, ChordQuality, UNRESOLVED_MARKER};
pub use config::FinderConfig;
pub use diagram::{Barre, ChordDiagram, StringMarker};
pub use error::ChordError;
pub use fretboard::{Fretboard, MAX_FRET, STRING_COUNT};
pub use tone::{
    preferred_letter_name, semitone_distance, transpose, Accidental, PitchClass, ScaleTone,
    Spellings,
};
pub use types::{ChordReport, ChordResult, FingeringChain, StringFingering};
