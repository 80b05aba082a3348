pub mod api;
pub mod caged;
pub mod chord;
pub mod config;
pub mod error;
pub mod fretboard;
pub mod pitch;
pub mod registry;
pub mod scale;
pub mod transpose;

pub use api::{compute, compute_with_registry, compute_yaml, Computation};
pub use caged::{caged_shapes, CagedShape, ShapeCell};
pub use chord::{
    build_chord, chord_fits_scale, is_in_scale, ChordInstance, ChordMatrix, ChordTemplate,
    DegreeChords,
};
pub use config::{ChordSelection, FretboardConfig};
pub use error::*;
pub use fretboard::{FretCell, Fretboard, FretboardView, StringConfiguration, StringRow};
pub use pitch::{parse_pitch, pitch_to_frequency_hz, same_letter_class, Pitch, PitchClass};
pub use registry::{PatternEntry, Registry};
pub use scale::{build_scale, Degree, IntervalPattern, ScaleInstance};
pub use transpose::transpose;
