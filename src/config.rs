//! # Fretboard Configuration
//!
//! A full fretboard request as a YAML document:
//!
//! ```yaml
//! strings: [E1, B1, E2, A2, D3, G3, B3, E4]
//! frets: 24
//! tonic: C4
//! pattern: "2212221"
//! mode: 0
//! chord:
//!   degree: 1
//!   name: maj
//! caged_root_fret: 1
//! ```
//!
//! Every field is optional; missing ones take the eight-string defaults
//! above with no chord selected. Unknown fields and malformed pitches are
//! rejected. String-count, pattern and chord checks happen when the config
//! is computed, not here.

use serde::{Deserialize, Serialize};

use crate::error::FretError;
use crate::fretboard::{StringConfiguration, DEFAULT_FRETS};
use crate::pitch::{Pitch, PitchClass};

/// Diatonic pattern key.
pub const DEFAULT_PATTERN: &str = "2212221";

/// A chord chosen on a scale degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChordSelection {
    /// 1-based scale degree.
    pub degree: usize,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FretboardConfig {
    pub strings: Vec<Pitch>,
    pub frets: u8,
    pub tonic: Pitch,
    pub pattern: String,
    pub mode: i32,
    pub chord: Option<ChordSelection>,
    /// Start fret for CAGED overlays; `null` turns them off.
    pub caged_root_fret: Option<u32>,
}

impl Default for FretboardConfig {
    fn default() -> Self {
        Self {
            strings: StringConfiguration::eight_string().strings().to_vec(),
            frets: DEFAULT_FRETS,
            tonic: Pitch::new(PitchClass::C, 4),
            pattern: DEFAULT_PATTERN.to_string(),
            mode: 0,
            chord: None,
            caged_root_fret: Some(1),
        }
    }
}

impl FretboardConfig {
    /// Parse a YAML document. An empty document gives the defaults.
    pub fn from_yaml(source: &str) -> Result<Self, FretError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source).map_err(|e| FretError::Config(e.to_string()))
    }

    pub fn to_yaml(&self) -> Result<String, FretError> {
        serde_yaml::to_string(self).map_err(|e| FretError::Config(e.to_string()))
    }
}
