//! # Pitch Model
//!
//! Parsing, normalization and frequency conversion for single pitches.
//!
//! ## Spelling
//! Input text follows `<letter A-G>[#|b]<octave 0-10>`. Internally every pitch
//! is stored with its canonical sharp-or-natural spelling from the fixed
//! chromatic order `C C# D D# E F F# G G# A A# B`:
//! - `E#`, `B#`, `Fb` and `Cb` are respelled to `F`, `C`, `E` and `B`,
//!   keeping the written octave
//! - any other flat becomes the sharp one pitch class below (`Db` -> `C#`)
//!
//! ## Absolute Index
//! A pitch is equivalent to `octave * 12 + class`, with C0 = 0. Nothing below
//! C0 can be represented.
//!
//! ## Example
//! ```rust
//! use fretmap::{parse_pitch, pitch_to_frequency_hz};
//!
//! let a4 = parse_pitch("A4")?;
//! assert_eq!(pitch_to_frequency_hz(a4), 440.0);
//!
//! let db4 = parse_pitch("Db4")?;
//! assert_eq!(db4.to_string(), "C#4");
//! # Ok::<(), fretmap::FretError>(())
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FretError;

/// Highest octave accepted from text input.
pub const MAX_INPUT_OCTAVE: u32 = 10;

/// Concert pitch for A4 in Hz.
pub const A4_HZ: f64 = 440.0;

/// One of the twelve pitch classes, in chromatic order starting at C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    /// The fixed chromatic order. All semitone arithmetic indexes into this table.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Wraps any index into the chromatic table.
    pub fn from_index(index: i64) -> Self {
        Self::ALL[index.rem_euclid(12) as usize]
    }

    /// Canonical spelling (`"C#"`, never `"Db"`).
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }

    /// Resolve a letter plus optional accidental to its canonical class.
    ///
    /// Returns `None` for letters outside A-G or accidentals other than `#`/`b`.
    fn from_spelling(letter: char, accidental: Option<char>) -> Option<Self> {
        let natural = match letter {
            'C' => PitchClass::C,
            'D' => PitchClass::D,
            'E' => PitchClass::E,
            'F' => PitchClass::F,
            'G' => PitchClass::G,
            'A' => PitchClass::A,
            'B' => PitchClass::B,
            _ => return None,
        };
        let class = match (natural, accidental) {
            (_, None) => natural,
            // Irregular pairs whose neighbour is a natural letter
            (PitchClass::E, Some('#')) => PitchClass::F,
            (PitchClass::B, Some('#')) => PitchClass::C,
            (PitchClass::F, Some('b')) => PitchClass::E,
            (PitchClass::C, Some('b')) => PitchClass::B,
            (_, Some('#')) => Self::from_index(natural.index() as i64 + 1),
            (_, Some('b')) => Self::from_index(natural.index() as i64 - 1),
            _ => return None,
        };
        Some(class)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pitch class at a specific octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub class: PitchClass,
    pub octave: u32,
}

impl Pitch {
    pub const fn new(class: PitchClass, octave: u32) -> Self {
        Self { class, octave }
    }

    /// Parse pitch text such as `"A4"`, `"F#2"` or `"Bb10"`.
    pub fn parse(text: &str) -> Result<Self, FretError> {
        let invalid = || FretError::InvalidPitchFormat {
            input: text.to_string(),
        };

        let mut chars = text.chars().peekable();
        let letter = chars.next().ok_or_else(invalid)?;
        let accidental = match chars.peek() {
            Some(&c) if c == '#' || c == 'b' => {
                chars.next();
                Some(c)
            }
            _ => None,
        };
        let digits: String = chars.collect();

        // Octave is a single digit or exactly "10"
        let octave_ok = matches!(digits.len(), 1 | 2)
            && digits.chars().all(|c| c.is_ascii_digit())
            && (digits.len() == 1 || digits == "10");
        if !octave_ok {
            return Err(invalid());
        }
        let octave: u32 = digits.parse().map_err(|_| invalid())?;
        if octave > MAX_INPUT_OCTAVE {
            return Err(invalid());
        }

        let class = PitchClass::from_spelling(letter, accidental).ok_or_else(invalid)?;
        Ok(Self { class, octave })
    }

    /// Absolute semitone index, C0 = 0.
    pub fn midi(self) -> i64 {
        self.octave as i64 * 12 + self.class.index() as i64
    }

    /// Inverse of [`Pitch::midi`]. `None` below C0 or past the last `u32` octave.
    pub fn from_midi(midi: i64) -> Option<Self> {
        if midi < 0 {
            return None;
        }
        let octave = u32::try_from(midi / 12).ok()?;
        Some(Self {
            class: PitchClass::from_index(midi % 12),
            octave,
        })
    }

    /// Equal-tempered frequency at A4 = 440 Hz, rounded to two decimals.
    pub fn frequency_hz(self) -> f64 {
        let a4 = Pitch::new(PitchClass::A, 4).midi();
        let distance = (self.midi() - a4) as f64;
        let hz = A4_HZ * 2f64.powf(distance / 12.0);
        (hz * 100.0).round() / 100.0
    }

    /// Same note name in any octave.
    pub fn same_class(self, other: Pitch) -> bool {
        self.class == other.class
    }

    /// Hover/label text, e.g. `"E1 (41.20Hz)"`.
    pub fn label(self) -> String {
        format!("{} ({:.2}Hz)", self, self.frequency_hz())
    }
}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.midi().cmp(&other.midi())
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class, self.octave)
    }
}

impl FromStr for Pitch {
    type Err = FretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pitch::parse(s)
    }
}

impl Serialize for Pitch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pitch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Pitch::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Parse pitch text into its canonical [`Pitch`].
pub fn parse_pitch(text: &str) -> Result<Pitch, FretError> {
    Pitch::parse(text)
}

pub fn pitch_to_frequency_hz(pitch: Pitch) -> f64 {
    pitch.frequency_hz()
}

/// True when both pitches share a pitch class, regardless of octave.
pub fn same_letter_class(a: Pitch, b: Pitch) -> bool {
    a.same_class(b)
}
