//! # Pattern and Chord Registry
//!
//! Immutable lookup tables for scale patterns and chord templates.
//!
//! The built-in tables live in `data/registry.yaml`, are compiled into the
//! binary and parsed once on first use. After that the registry is shared
//! read-only; nothing can be added at runtime.
//!
//! ## Keys
//! - Patterns are keyed by their step digits (`"2212221"`, `"22323"`)
//! - Chords are keyed by their short name (`"maj"`, `"min7"`, `"add9"`)

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::chord::ChordTemplate;
use crate::error::FretError;
use crate::scale::IntervalPattern;

const BUILTIN_REGISTRY: &str = include_str!("../data/registry.yaml");

static BUILTIN: Lazy<Registry> = Lazy::new(|| {
    Registry::from_yaml(BUILTIN_REGISTRY).expect("embedded registry.yaml is valid")
});

/// A named scale pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternEntry {
    pub key: IntervalPattern,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Registry {
    patterns: Vec<PatternEntry>,
    chords: Vec<ChordTemplate>,
}

impl Registry {
    /// The built-in tables.
    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    /// Load tables from a YAML document with `patterns` and `chords` lists.
    ///
    /// Duplicate pattern keys or chord names are rejected.
    pub fn from_yaml(source: &str) -> Result<Self, FretError> {
        let registry: Registry =
            serde_yaml::from_str(source).map_err(|e| FretError::Config(e.to_string()))?;

        let mut seen = HashSet::new();
        for entry in &registry.patterns {
            if !seen.insert(entry.key.key()) {
                return Err(FretError::Config(format!(
                    "duplicate pattern key '{}'",
                    entry.key
                )));
            }
        }
        let mut seen = HashSet::new();
        for chord in &registry.chords {
            if !seen.insert(chord.name()) {
                return Err(FretError::Config(format!(
                    "duplicate chord name '{}'",
                    chord.name()
                )));
            }
        }

        Ok(registry)
    }

    pub fn patterns(&self) -> &[PatternEntry] {
        &self.patterns
    }

    /// Chord templates in their fixed display order.
    pub fn chords(&self) -> &[ChordTemplate] {
        &self.chords
    }

    pub fn pattern(&self, key: &str) -> Result<&IntervalPattern, FretError> {
        self.patterns
            .iter()
            .find(|entry| entry.key.key() == key)
            .map(|entry| &entry.key)
            .ok_or_else(|| FretError::UnknownPattern(key.to_string()))
    }

    pub fn chord(&self, name: &str) -> Result<&ChordTemplate, FretError> {
        self.chords
            .iter()
            .find(|chord| chord.name() == name)
            .ok_or_else(|| FretError::UnknownChord(name.to_string()))
    }
}
