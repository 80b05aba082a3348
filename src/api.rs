//! # Public API
//!
//! One-call entry points for the display layer.
//!
//! ## Functions
//!
//! - [`compute()`] - Full recomputation from a [`FretboardConfig`] with the built-in registry
//! - [`compute_with_registry()`] - Same, against caller-supplied tables
//! - [`compute_yaml()`] - Parse a YAML config and compute
//!
//! Each call takes the whole current configuration and returns a complete
//! [`Computation`]. Nothing is remembered between calls, so overlapping
//! recomputations cannot interfere.
//!
//! ## Typical Usage
//!
//! ```rust
//! use fretmap::compute_yaml;
//!
//! let source = r#"
//! strings: [E2, A2, D3, G3, B3, E4]
//! frets: 12
//! tonic: A3
//! pattern: "32232"
//! chord:
//!   degree: 1
//!   name: min
//! "#;
//!
//! let result = compute_yaml(source)?;
//! assert_eq!(result.scale.notes.len(), 5);
//! assert_eq!(result.chord.as_ref().map(|c| c.notes.len()), Some(3));
//! # Ok::<(), fretmap::FretError>(())
//! ```

use serde::Serialize;
use tracing::debug;

use crate::caged::CagedShape;
use crate::chord::{ChordInstance, ChordMatrix};
use crate::config::FretboardConfig;
use crate::error::FretError;
use crate::fretboard::{Fretboard, FretboardView, StringConfiguration};
use crate::registry::Registry;
use crate::scale::ScaleInstance;

/// Everything the display layer needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Computation {
    pub scale: ScaleInstance,
    pub chord_matrix: ChordMatrix,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chord: Option<ChordInstance>,
    pub fretboard: FretboardView,
    pub caged: Vec<CagedShape>,
}

/// Compute scale, chord matrix, selected chord and fretboard map.
///
/// # Errors
/// - [`FretError::StringCount`] for fewer than 4 or more than 10 strings
/// - [`FretError::UnknownPattern`] / [`FretError::UnknownChord`] for registry misses
/// - [`FretError::DegreeOutOfRange`] when the chord degree exceeds the scale
pub fn compute(config: &FretboardConfig) -> Result<Computation, FretError> {
    compute_with_registry(config, Registry::builtin())
}

pub fn compute_with_registry(
    config: &FretboardConfig,
    registry: &Registry,
) -> Result<Computation, FretError> {
    let strings = StringConfiguration::new(config.strings.clone())?;
    let pattern = registry.pattern(&config.pattern)?;

    let scale = ScaleInstance::build(config.tonic, pattern, config.mode);
    let chord_matrix = ChordMatrix::build(&scale, registry.chords());

    let chord = match &config.chord {
        Some(selection) => {
            let template = registry.chord(&selection.name)?;
            Some(ChordInstance::on_degree(&scale, selection.degree, template)?)
        }
        None => None,
    };

    let board = Fretboard::new(strings, config.frets);
    let fretboard = board.render(scale.notes(), chord.as_ref().map(|c| c.notes.as_slice()))?;
    let caged = config
        .caged_root_fret
        .map(|root_fret| board.caged(root_fret))
        .unwrap_or_default();

    debug!(
        tonic = %config.tonic,
        pattern = %config.pattern,
        mode = config.mode,
        "computed fretboard"
    );

    Ok(Computation {
        scale,
        chord_matrix,
        chord,
        fretboard,
        caged,
    })
}

/// Parse a YAML configuration and compute it.
pub fn compute_yaml(source: &str) -> Result<Computation, FretError> {
    let config = FretboardConfig::from_yaml(source)?;
    compute(&config)
}
