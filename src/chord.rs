//! # Chord Resolver
//!
//! Builds chords from scale degrees and decides which chords belong to a scale.
//!
//! A chord "fits" a scale when every one of its pitch classes already occurs
//! somewhere in the scale, in any octave. The UI uses the resulting
//! degree × template matrix to enable chord buttons, so it is rebuilt for
//! every tonic/pattern/mode combination.
//!
//! ## Supported Templates
//! The built-in registry carries, in order:
//! - **maj** `R 3 5`, **min** `R b3 5`, **dim** `R b3 b5`, **aug** `R 3 #5`
//! - **7** `R 3 5 b7`, **maj7** `R 3 5 7`, **min7** `R b3 5 b7`, **dim7** `R b3 b5 bb7`
//! - **sus2** `R 2 5`, **sus4** `R 4 5`, **add9** `R 3 5 9`
//!
//! ## Example
//! ```rust
//! use fretmap::{parse_pitch, ChordMatrix, Registry, ScaleInstance};
//!
//! let registry = Registry::builtin();
//! let scale = ScaleInstance::build(parse_pitch("C4")?, registry.pattern("2212221")?, 0);
//! let matrix = ChordMatrix::build(&scale, registry.chords());
//!
//! assert_eq!(matrix.fits(1, "maj"), Some(true));
//! assert_eq!(matrix.fits(2, "maj"), Some(false));
//! # Ok::<(), fretmap::FretError>(())
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::FretError;
use crate::pitch::Pitch;
use crate::scale::{Degree, ScaleInstance};
use crate::transpose::transpose;

/// A chord quality: semitone offsets from a root plus a label per offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawChordTemplate")]
pub struct ChordTemplate {
    name: String,
    offsets: Vec<i32>,
    labels: Vec<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawChordTemplate {
    name: String,
    offsets: Vec<i32>,
    labels: Vec<String>,
}

impl TryFrom<RawChordTemplate> for ChordTemplate {
    type Error = FretError;

    fn try_from(raw: RawChordTemplate) -> Result<Self, Self::Error> {
        ChordTemplate::new(raw.name, raw.offsets, raw.labels)
    }
}

impl ChordTemplate {
    /// Offsets and labels must line up one to one.
    pub fn new(
        name: impl Into<String>,
        offsets: Vec<i32>,
        labels: Vec<String>,
    ) -> Result<Self, FretError> {
        let name = name.into();
        if offsets.len() != labels.len() {
            return Err(FretError::InvalidInterval(format!(
                "chord '{}' has {} offsets but {} labels",
                name,
                offsets.len(),
                labels.len()
            )));
        }
        Ok(Self {
            name,
            offsets,
            labels,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offsets(&self) -> &[i32] {
        &self.offsets
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Transpose `root` by every offset of `template`, in template order.
///
/// # Errors
/// [`FretError::BelowRangeFloor`] if a negative offset reaches below C0.
pub fn build_chord(root: Pitch, template: &ChordTemplate) -> Result<Vec<Pitch>, FretError> {
    template
        .offsets()
        .iter()
        .map(|&offset| transpose(root, offset))
        .collect()
}

/// True when `candidate` shares a pitch class with any note of `scale`.
pub fn is_in_scale(candidate: Pitch, scale: &[Pitch]) -> bool {
    scale.iter().any(|&note| note.same_class(candidate))
}

/// True when every chord note is in the scale. An empty chord fits trivially.
pub fn chord_fits_scale(chord: &[Pitch], scale: &[Pitch]) -> bool {
    chord.iter().all(|&note| is_in_scale(note, scale))
}

/// A template applied to one degree of a scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordInstance {
    pub degree: Degree,
    pub numeral: String,
    pub root: Pitch,
    pub name: String,
    pub labels: Vec<String>,
    pub notes: Vec<Pitch>,
}

impl ChordInstance {
    /// Build `template` on the note at 1-based `degree` of `scale`.
    ///
    /// # Errors
    /// - [`FretError::DegreeOutOfRange`] if the scale has no such degree
    /// - [`FretError::BelowRangeFloor`] from chord construction
    pub fn on_degree(
        scale: &ScaleInstance,
        degree: usize,
        template: &ChordTemplate,
    ) -> Result<Self, FretError> {
        let root = scale.degree(degree).ok_or(FretError::DegreeOutOfRange {
            degree,
            cardinality: scale.cardinality(),
        })?;
        let notes = build_chord(root, template)?;
        Ok(Self {
            degree: Degree(degree),
            numeral: Degree(degree).numeral(),
            root,
            name: template.name().to_string(),
            labels: template.labels().to_vec(),
            notes,
        })
    }

    pub fn fits(&self, scale: &ScaleInstance) -> bool {
        chord_fits_scale(&self.notes, scale.notes())
    }

    /// Whether `pitch` shares a class with any chord note.
    pub fn contains(&self, pitch: Pitch) -> bool {
        self.notes.iter().any(|&note| note.same_class(pitch))
    }
}

/// Fit results for one scale degree across all templates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreeChords {
    pub degree: Degree,
    pub numeral: String,
    pub root: Pitch,
    /// Parallel to [`ChordMatrix::templates`].
    pub fits: Vec<bool>,
    pub count: usize,
}

/// Degree × template fit matrix for a scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordMatrix {
    pub templates: Vec<String>,
    pub degrees: Vec<DegreeChords>,
}

impl ChordMatrix {
    /// Test every template on every degree of `scale`.
    ///
    /// A chord that cannot be built (a negative offset reaching below C0)
    /// counts as not fitting.
    pub fn build(scale: &ScaleInstance, templates: &[ChordTemplate]) -> Self {
        let degrees: Vec<DegreeChords> = scale
            .degrees()
            .map(|(degree, root)| {
                let fits: Vec<bool> = templates
                    .iter()
                    .map(|template| match build_chord(root, template) {
                        Ok(chord) => chord_fits_scale(&chord, scale.notes()),
                        Err(e) => {
                            trace!(%root, chord = template.name(), error = %e, "chord not buildable");
                            false
                        }
                    })
                    .collect();
                let count = fits.iter().filter(|&&fit| fit).count();
                DegreeChords {
                    degree,
                    numeral: degree.numeral(),
                    root,
                    fits,
                    count,
                }
            })
            .collect();

        debug!(
            degrees = degrees.len(),
            templates = templates.len(),
            "built chord matrix"
        );

        Self {
            templates: templates.iter().map(|t| t.name().to_string()).collect(),
            degrees,
        }
    }

    fn row(&self, degree: usize) -> Option<&DegreeChords> {
        degree.checked_sub(1).and_then(|i| self.degrees.get(i))
    }

    /// Fit of the named template at a 1-based degree; `None` if either is unknown.
    pub fn fits(&self, degree: usize, chord: &str) -> Option<bool> {
        let column = self.templates.iter().position(|name| name == chord)?;
        self.row(degree).and_then(|row| row.fits.get(column).copied())
    }

    /// Number of fitting templates at a 1-based degree.
    pub fn count(&self, degree: usize) -> Option<usize> {
        self.row(degree).map(|row| row.count)
    }

    /// Names of the templates that fit at a 1-based degree, in template order.
    pub fn fitting(&self, degree: usize) -> Vec<&str> {
        match self.row(degree) {
            Some(row) => self
                .templates
                .iter()
                .zip(&row.fits)
                .filter(|(_, &fit)| fit)
                .map(|(name, _)| name.as_str())
                .collect(),
            None => Vec::new(),
        }
    }
}
