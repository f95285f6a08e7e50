//! # Search Configuration
//!
//! Tunable limits for the fingering search and filters, loaded from YAML.
//!
//! Every field is optional; missing fields fall back to the built-in
//! constants, so an empty document is a valid configuration.
//!
//! ```yaml
//! max-fingers: 4
//! min-sounding-strings: 4
//! window-span: 4
//! open-window-span: 5
//! ```

use crate::error::ChordError;
use crate::fretboard::{MAX_FRET, STRING_COUNT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Most fingers a fingering may need.
pub const MAX_FINGERS: u8 = 4;

/// Fewest sounding strings left after the bass rule mutes strings below the root.
pub const MIN_SOUNDING_STRINGS: u8 = 4;

/// Frets spanned above the anchor fret of a search window.
pub const WINDOW_SPAN: u8 = 4;

/// Frets spanned by the window anchored at the nut; one wider than
/// [`WINDOW_SPAN`] since open strings need no hand position.
pub const OPEN_WINDOW_SPAN: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FinderConfig {
    pub max_fingers: u8,
    pub min_sounding_strings: u8,
    pub window_span: u8,
    pub open_window_span: u8,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            max_fingers: MAX_FINGERS,
            min_sounding_strings: MIN_SOUNDING_STRINGS,
            window_span: WINDOW_SPAN,
            open_window_span: OPEN_WINDOW_SPAN,
        }
    }
}

impl FinderConfig {
    /// Parse and validate a YAML document.
    ///
    /// # Example
    /// ```
    /// use fretchord::FinderConfig;
    ///
    /// let config = FinderConfig::from_yaml("max-fingers: 3").unwrap();
    /// assert_eq!(config.max_fingers, 3);
    /// assert_eq!(config.window_span, 4);
    /// ```
    pub fn from_yaml(content: &str) -> Result<Self, ChordError> {
        // An empty document deserializes to unit, not to a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: FinderConfig =
            serde_yaml::from_str(content).map_err(|e| ChordError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChordError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ChordError::ConfigError(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    pub fn validate(&self) -> Result<(), ChordError> {
        if !(1..=MAX_FINGERS).contains(&self.max_fingers) {
            return Err(ChordError::ConfigError(format!(
                "max-fingers must be between 1 and {}, got {}",
                MAX_FINGERS, self.max_fingers
            )));
        }
        if !(1..=STRING_COUNT as u8).contains(&self.min_sounding_strings) {
            return Err(ChordError::ConfigError(format!(
                "min-sounding-strings must be between 1 and {}, got {}",
                STRING_COUNT, self.min_sounding_strings
            )));
        }
        for (field, span) in [
            ("window-span", self.window_span),
            ("open-window-span", self.open_window_span),
        ] {
            if !(1..=MAX_FRET).contains(&span) {
                return Err(ChordError::ConfigError(format!(
                    "{} must be between 1 and {}, got {}",
                    field, MAX_FRET, span
                )));
            }
        }
        if self.open_window_span < self.window_span {
            return Err(ChordError::ConfigError(format!(
                "open-window-span ({}) must not be smaller than window-span ({})",
                self.open_window_span, self.window_span
            )));
        }
        Ok(())
    }
}
