//! # Error Types
//!
//! This module defines all error types for the fretmap engine.
//!
//! Every error carries the offending input so a caller can reject it as a
//! whole. Nothing here is transient: the engine never retries and never
//! coerces a malformed value into a best guess.
//!
//! ## Error Types
//! - `InvalidPitchFormat` - Pitch text that does not match `<A-G>[#|b]<0-10>`
//! - `BelowRangeFloor` - A transposition that would land below C0
//! - `UnknownPattern` / `UnknownChord` - Registry lookups with no entry
//! - `StringCount` / `DegreeOutOfRange` - Fretboard requests outside their limits
//! - `Config` - YAML that fails to deserialize
//!
//! ## Usage
//! ```rust
//! use fretmap::{parse_pitch, FretError};
//!
//! match parse_pitch("H2") {
//!     Ok(pitch) => println!("Parsed {}", pitch),
//!     Err(FretError::InvalidPitchFormat { input }) => {
//!         eprintln!("Rejected '{}'", input);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

use crate::pitch::Pitch;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FretError {
    /// Malformed pitch text.
    ///
    /// # Example
    /// ```
    /// # use fretmap::FretError;
    /// let err = FretError::InvalidPitchFormat { input: "C11".to_string() };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Invalid pitch format: 'C11' (expected A-G, optional # or b, octave 0-10)"
    /// );
    /// ```
    #[error("Invalid pitch format: '{input}' (expected A-G, optional # or b, octave 0-10)")]
    InvalidPitchFormat { input: String },

    /// Transposition would produce a pitch below C0.
    #[error("Transposing {pitch} by {semitones} semitones falls below C0")]
    BelowRangeFloor { pitch: Pitch, semitones: i32 },

    /// Transposition would produce an octave number that does not fit in a `u32`.
    #[error("Transposing {pitch} by {semitones} semitones leaves the representable octave range")]
    OctaveOverflow { pitch: Pitch, semitones: i32 },

    #[error("Unknown scale pattern: {0}")]
    UnknownPattern(String),

    #[error("Unknown chord: {0}")]
    UnknownChord(String),

    /// Interval data that cannot be used, such as a pattern key containing
    /// non-digits or a chord template whose labels do not line up with its offsets.
    #[error("Invalid interval data: {0}")]
    InvalidInterval(String),

    #[error("A fretboard needs between 4 and 10 strings, got {0}")]
    StringCount(usize),

    /// A chord selection names a degree the active scale does not have.
    ///
    /// # Example
    /// ```
    /// # use fretmap::FretError;
    /// let err = FretError::DegreeOutOfRange { degree: 7, cardinality: 5 };
    /// assert_eq!(err.to_string(), "Scale degree 7 is out of range for a 5-note scale");
    /// ```
    #[error("Scale degree {degree} is out of range for a {cardinality}-note scale")]
    DegreeOutOfRange { degree: usize, cardinality: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),
}
