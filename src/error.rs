//! # Error Types
//!
//! This module defines all error types for the chord finder.
//!
//! Errors carry the offending input (the tone token or the tone count) so the
//! caller can point at what to fix.
//!
//! ## Error Types
//! - `InvalidTone` - A chord-tone token does not follow the scale-degree grammar
//! - `InvalidChordSize` - The tone list does not hold 3 or 4 tones
//! - `ConfigError` - The YAML configuration is unreadable or out of range
//!
//! ## What is *not* an error
//! A valid tone set for which no fingering survives the filters yields an
//! empty list, and a tone set no rule can name yields an unresolved
//! [`ChordName`](crate::ChordName). Neither is reported through `ChordError`.
//!
//! ## Usage
//! ```rust
//! use fretchord::{find_chord, ChordError};
//!
//! match find_chord(&["1", "3", "9"]) {
//!     Ok(report) => println!("{}", report.name),
//!     Err(ChordError::InvalidTone { token, message }) => {
//!         eprintln!("Bad tone '{}': {}", token, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChordError {
    /// A chord-tone token failed to parse.
    ///
    /// # Example
    /// ```
    /// # use fretchord::ChordError;
    /// let err = ChordError::InvalidTone {
    ///     token: "8".to_string(),
    ///     message: "scale degree must be 1-7".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid tone '8': scale degree must be 1-7");
    /// ```
    #[error("Invalid tone '{token}': {message}")]
    InvalidTone { token: String, message: String },

    /// The chord-tone list holds fewer than 3 or more than 4 tones.
    ///
    /// # Example
    /// ```
    /// # use fretchord::ChordError;
    /// let err = ChordError::InvalidChordSize(2);
    /// assert_eq!(err.to_string(), "Invalid chord size: expected 3 or 4 tones, got 2");
    /// ```
    #[error("Invalid chord size: expected 3 or 4 tones, got {0}")]
    InvalidChordSize(usize),

    /// Invalid configuration file or value.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl ChordError {
    pub(crate) fn invalid_tone(token: &str, message: impl Into<String>) -> Self {
        ChordError::InvalidTone {
            token: token.to_string(),
            message: message.into(),
        }
    }
}
