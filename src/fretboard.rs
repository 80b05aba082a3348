//! # Fretboard Map
//!
//! Per-position note data for a stringed instrument: which pitch sits at
//! every string/fret, its frequency, and whether it belongs to the active
//! scale and chord. This is what the display layer draws; fret geometry and
//! drawing stay on the display side.
//!
//! ## Layout
//! - Strings are kept in configuration order, which is also display order
//! - Fret 0 is the open string; fret `n` is the open pitch raised `n` semitones
//! - Membership tests compare pitch classes, so any octave counts

use serde::Serialize;
use tracing::debug;

use crate::caged::{caged_shapes, CagedShape};
use crate::chord::is_in_scale;
use crate::error::FretError;
use crate::pitch::{Pitch, PitchClass};
use crate::transpose::transpose;

pub const MIN_STRINGS: usize = 4;
pub const MAX_STRINGS: usize = 10;

/// Default fret count.
pub const DEFAULT_FRETS: u8 = 24;

/// Open-string pitches in display order, 4 to 10 strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StringConfiguration(Vec<Pitch>);

impl StringConfiguration {
    pub fn new(strings: Vec<Pitch>) -> Result<Self, FretError> {
        if !(MIN_STRINGS..=MAX_STRINGS).contains(&strings.len()) {
            return Err(FretError::StringCount(strings.len()));
        }
        Ok(Self(strings))
    }

    /// Eight-string layout `E1 B1 E2 A2 D3 G3 B3 E4`.
    pub fn eight_string() -> Self {
        use PitchClass::*;
        Self(vec![
            Pitch::new(E, 1),
            Pitch::new(B, 1),
            Pitch::new(E, 2),
            Pitch::new(A, 2),
            Pitch::new(D, 3),
            Pitch::new(G, 3),
            Pitch::new(B, 3),
            Pitch::new(E, 4),
        ])
    }

    pub fn strings(&self) -> &[Pitch] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One fret position on one string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FretCell {
    pub fret: u8,
    pub pitch: Pitch,
    pub frequency_hz: f64,
    pub label: String,
    pub in_scale: bool,
    pub in_chord: bool,
    /// Same class as the scale's first note.
    pub is_root: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringRow {
    pub open: Pitch,
    pub label: String,
    pub cells: Vec<FretCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FretboardView {
    pub frets: u8,
    pub strings: Vec<StringRow>,
}

impl FretboardView {
    /// Cell at a string index and fret, if both exist.
    pub fn cell(&self, string: usize, fret: u8) -> Option<&FretCell> {
        self.strings
            .get(string)
            .and_then(|row| row.cells.get(fret as usize))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fretboard {
    strings: StringConfiguration,
    frets: u8,
}

impl Fretboard {
    pub fn new(strings: StringConfiguration, frets: u8) -> Self {
        Self { strings, frets }
    }

    pub fn strings(&self) -> &StringConfiguration {
        &self.strings
    }

    pub fn frets(&self) -> u8 {
        self.frets
    }

    /// Pitch at a string index and fret, `None` off the board.
    pub fn note_at(&self, string: usize, fret: u8) -> Option<Pitch> {
        if fret > self.frets {
            return None;
        }
        let open = *self.strings.strings().get(string)?;
        transpose(open, i32::from(fret)).ok()
    }

    /// CAGED overlays starting at `root_fret`, wrapped at this board's fret count.
    pub fn caged(&self, root_fret: u32) -> Vec<CagedShape> {
        caged_shapes(self.strings.len(), self.frets, root_fret)
    }

    /// Every position on the board, tagged against `scale` and an optional chord.
    pub fn render(&self, scale: &[Pitch], chord: Option<&[Pitch]>) -> Result<FretboardView, FretError> {
        let root = scale.first().copied();
        let mut rows = Vec::with_capacity(self.strings.len());

        for &open in self.strings.strings() {
            let mut cells = Vec::with_capacity(self.frets as usize + 1);
            for fret in 0..=self.frets {
                let pitch = transpose(open, i32::from(fret))?;
                cells.push(FretCell {
                    fret,
                    pitch,
                    frequency_hz: pitch.frequency_hz(),
                    label: pitch.label(),
                    in_scale: is_in_scale(pitch, scale),
                    in_chord: chord.is_some_and(|notes| is_in_scale(pitch, notes)),
                    is_root: root.is_some_and(|r| r.same_class(pitch)),
                });
            }
            rows.push(StringRow {
                open,
                label: open.label(),
                cells,
            });
        }

        debug!(
            strings = rows.len(),
            frets = self.frets,
            chord = chord.is_some(),
            "rendered fretboard"
        );

        Ok(FretboardView {
            frets: self.frets,
            strings: rows,
        })
    }
}
