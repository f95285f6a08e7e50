//! # Public API
//!
//! This module contains the main entry points for the chord finder library.
//!
//! ## Entry Points
//!
//! - [`find_chord()`] - Name a tone set and derive its fingerings (recommended)
//! - [`name_chord()`] - Name a tone set without searching the fretboard
//! - [`ChordFinder`] - Reusable engine holding the fretboard and configuration
//!
//! ## Typical Usage
//!
//! ```rust
//! use fretchord::find_chord;
//!
//! let report = find_chord(&["6", "1", "3"])?;
//! assert_eq!(report.name.to_string(), "Am");
//! for result in report.results() {
//!     println!("{} {}", result.name, result.chain);
//! }
//! # Ok::<(), fretchord::ChordError>(())
//! ```
//!
//! ## Sharing an Engine
//!
//! [`ChordFinder`] is immutable after construction. Build it once and query
//! it from as many threads as needed:
//!
//! ```rust
//! use fretchord::{ChordFinder, FinderConfig};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let finder = Arc::new(ChordFinder::with_config(FinderConfig::default())?);
//! let handles: Vec<_> = [["1", "3", "5"], ["2", "4", "6"]]
//!     .into_iter()
//!     .map(|tokens| {
//!         let finder = Arc::clone(&finder);
//!         thread::spawn(move || finder.find(&tokens).map(|report| report.name.to_string()))
//!     })
//!     .collect();
//! let names: Vec<String> = handles
//!     .into_iter()
//!     .map(|handle| handle.join().unwrap().unwrap())
//!     .collect();
//! assert_eq!(names, vec!["C", "Dm"]);
//! # Ok::<(), fretchord::ChordError>(())
//! ```

use crate::chord::ChordToneSet;
use crate::classify::ChordName;
use crate::config::FinderConfig;
use crate::error::ChordError;
use crate::filter;
use crate::fretboard::Fretboard;
use crate::search::search;
use crate::types::{ChordReport, FingeringChain};
use tracing::info;

/// Fingering engine: a precomputed fretboard plus search limits.
#[derive(Debug, Clone)]
pub struct ChordFinder {
    fretboard: Fretboard,
    config: FinderConfig,
}

impl ChordFinder {
    pub fn new() -> Self {
        Self {
            fretboard: Fretboard::standard(),
            config: FinderConfig::default(),
        }
    }

    /// # Errors
    /// Returns [`ChordError::ConfigError`] if `config` fails validation.
    pub fn with_config(config: FinderConfig) -> Result<Self, ChordError> {
        config.validate()?;
        Ok(Self {
            fretboard: Fretboard::standard(),
            config,
        })
    }

    pub fn fretboard(&self) -> &Fretboard {
        &self.fretboard
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Search and filter fingerings for an already-parsed tone set.
    ///
    /// An empty list means no practical fingering exists; it is not an error.
    pub fn fingerings(&self, tones: &ChordToneSet) -> Vec<FingeringChain> {
        let raw = search(&self.fretboard, tones, &self.config);
        filter::apply(raw, tones, &self.config)
    }

    /// Parse `tokens`, name the chord and derive its fingerings.
    ///
    /// # Errors
    /// Returns [`ChordError::InvalidTone`] or [`ChordError::InvalidChordSize`]
    /// for malformed input; the search itself never fails.
    pub fn find<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ChordReport, ChordError> {
        let tones = ChordToneSet::parse(tokens)?;
        Ok(self.report(tones))
    }

    pub fn report(&self, tones: ChordToneSet) -> ChordReport {
        let name = ChordName::of(&tones);
        let fingerings = self.fingerings(&tones);
        info!(
            chord = %name,
            fingerings = fingerings.len(),
            "derived fingerings for {}",
            tones
        );
        ChordReport {
            tones,
            name,
            fingerings,
        }
    }
}

impl Default for ChordFinder {
    fn default() -> Self {
        Self::new()
    }
}

/// Name a chord and derive its fingerings with the default configuration.
///
/// # Example
/// ```rust
/// use fretchord::find_chord;
///
/// let report = find_chord(&["1", "3", "5"])?;
/// assert_eq!(report.name.to_string(), "C");
/// assert!(report.fingerings.iter().any(|chain| chain.to_string() == "x32010"));
/// # Ok::<(), fretchord::ChordError>(())
/// ```
pub fn find_chord<S: AsRef<str>>(tokens: &[S]) -> Result<ChordReport, ChordError> {
    ChordFinder::new().find(tokens)
}

/// Name a chord without searching for fingerings.
///
/// # Example
/// ```rust
/// use fretchord::name_chord;
///
/// assert_eq!(name_chord(&["1", "b3", "5", "b7"])?.to_string(), "Cm7");
/// assert_eq!(name_chord(&["b2", "4", "b6"])?.to_string(), "Db");
/// # Ok::<(), fretchord::ChordError>(())
/// ```
pub fn name_chord<S: AsRef<str>>(tokens: &[S]) -> Result<ChordName, ChordError> {
    let tones = ChordToneSet::parse(tokens)?;
    Ok(ChordName::of(&tones))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_reports_name_and_fingerings() {
        let report = find_chord(&["1", "3", "5"]).unwrap();
        assert_eq!(report.name.to_string(), "C");
        assert!(!report.is_unplayable());
        assert_eq!(report.results().count(), report.fingerings.len());
        assert!(report.results().all(|r| r.name == &report.name));
    }

    #[test]
    fn test_invalid_input_is_reported() {
        assert_eq!(
            find_chord(&["1", "3"]).unwrap_err(),
            ChordError::InvalidChordSize(2)
        );
        assert!(matches!(
            find_chord(&["1", "3", "8"]),
            Err(ChordError::InvalidTone { .. })
        ));
        assert!(matches!(
            name_chord(&["1", "bb3", "5"]),
            Err(ChordError::InvalidTone { .. })
        ));
    }

    #[test]
    fn test_with_config_validates() {
        let config = FinderConfig {
            max_fingers: 0,
            ..FinderConfig::default()
        };
        assert!(matches!(
            ChordFinder::with_config(config),
            Err(ChordError::ConfigError(_))
        ));
    }

    #[test]
    fn test_tighter_finger_budget_never_adds_fingerings() {
        let tones = ChordToneSet::parse(&["1", "3", "5"]).unwrap();
        let default = ChordFinder::new().fingerings(&tones);
        let strict = ChordFinder::with_config(FinderConfig {
            max_fingers: 2,
            ..FinderConfig::default()
        })
        .unwrap()
        .fingerings(&tones);
        assert!(strict.len() <= default.len());
        assert!(strict.iter().all(|chain| chain.required_fingers() <= 2));
        assert!(strict.iter().all(|chain| default.contains(chain)));
    }

    #[test]
    fn test_engine_is_reusable() {
        let finder = ChordFinder::new();
        let first = finder.find(&["5", "7", "2"]).unwrap();
        let _ = finder.find(&["6", "1", "3"]).unwrap();
        let again = finder.find(&["5", "7", "2"]).unwrap();
        assert_eq!(first.fingerings, again.fingerings);
    }
}
