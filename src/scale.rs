//! # Scale/Mode Generator
//!
//! Builds the ordered notes of a scale from a tonic, an interval pattern and
//! a mode rotation.
//!
//! ## Construction
//! Starting at the tonic, each step of the pattern except the last is added
//! to the previous note. A 7-step pattern therefore yields 7 notes; the final
//! step only closes the octave and is never emitted.
//!
//! ## Modes
//! The mode is a plain left rotation of the generated list, taken modulo the
//! pattern length. For the diatonic pattern `2212221` built on C4, mode 5
//! gives `A4 B4 C4 D4 E4 F4 G4`: the absolute pitches are unchanged, only
//! the functional root moves.
//!
//! ## Degrees
//! Degrees are 1-based and labelled with Roman numerals. Asking for a degree
//! past the scale's cardinality yields `None`, so callers can hide it.
//!
//! ## Example
//! ```rust
//! use fretmap::{parse_pitch, IntervalPattern, ScaleInstance};
//!
//! let diatonic: IntervalPattern = "2212221".parse()?;
//! let aeolian = ScaleInstance::build(parse_pitch("C4")?, &diatonic, 5);
//! assert_eq!(aeolian.degree(1).map(|p| p.to_string()), Some("A4".to_string()));
//! assert_eq!(aeolian.degree(8), None);
//! # Ok::<(), fretmap::FretError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chord::is_in_scale;
use crate::error::FretError;
use crate::pitch::Pitch;
use crate::transpose::transpose;

/// Largest step a pattern key can spell.
pub const MAX_STEP: u8 = 9;

/// Ordered semitone steps defining a scale family.
///
/// The steps need not add up to 12. Patterns are keyed by their digits,
/// e.g. `"2212221"` for the diatonic family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IntervalPattern {
    steps: Vec<u8>,
}

impl IntervalPattern {
    /// Each step is written as a single digit in the key, so steps above 9 are rejected.
    pub fn new(steps: Vec<u8>) -> Result<Self, FretError> {
        if let Some(step) = steps.iter().find(|&&step| step > MAX_STEP) {
            return Err(FretError::InvalidInterval(format!(
                "step {} does not fit in a single-digit pattern key",
                step
            )));
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[u8] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Registry key, the steps written as digits.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for IntervalPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl FromStr for IntervalPattern {
    type Err = FretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(FretError::InvalidInterval(
                "pattern key must contain at least one step".to_string(),
            ));
        }
        let steps = s
            .chars()
            .map(|c| {
                c.to_digit(10).map(|d| d as u8).ok_or_else(|| {
                    FretError::InvalidInterval(format!(
                        "pattern key '{}' contains non-digit '{}'",
                        s, c
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { steps })
    }
}

impl TryFrom<String> for IntervalPattern {
    type Error = FretError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<IntervalPattern> for String {
    fn from(pattern: IntervalPattern) -> Self {
        pattern.key()
    }
}

/// 1-based position within a scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degree(pub usize);

impl Degree {
    /// Roman numeral label: I, II, III, IV, ...
    pub fn numeral(self) -> String {
        const NUMERALS: [(usize, &str); 13] = [
            (1000, "M"),
            (900, "CM"),
            (500, "D"),
            (400, "CD"),
            (100, "C"),
            (90, "XC"),
            (50, "L"),
            (40, "XL"),
            (10, "X"),
            (9, "IX"),
            (5, "V"),
            (4, "IV"),
            (1, "I"),
        ];

        let mut remaining = self.0;
        let mut out = String::new();
        for (value, symbol) in NUMERALS {
            while remaining >= value {
                out.push_str(symbol);
                remaining -= value;
            }
        }
        out
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.numeral())
    }
}

/// Generate the notes of `pattern` on `tonic`, rotated left by `mode`.
///
/// Total for any mode, negative ones included. An empty pattern gives an
/// empty scale. Steps are non-negative so the walk can never drop below C0.
///
/// A walk that runs past octave `u32::MAX` stops at the last representable
/// note, so the returned scale is then shorter than the pattern. Tonics
/// parsed from text (octave 0-10) never get there.
pub fn build_scale(tonic: Pitch, pattern: &IntervalPattern, mode: i32) -> Vec<Pitch> {
    let len = pattern.len();
    if len == 0 {
        return Vec::new();
    }

    let mut notes = Vec::with_capacity(len);
    let mut current = tonic;
    notes.push(current);
    for &step in &pattern.steps()[..len - 1] {
        match transpose(current, step as i32) {
            Ok(next) => {
                current = next;
                notes.push(current);
            }
            Err(_) => break,
        }
    }

    let rotation = mode.rem_euclid(len as i32) as usize % notes.len();
    notes.rotate_left(rotation);
    notes
}

/// A generated scale together with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleInstance {
    pub tonic: Pitch,
    pub pattern: IntervalPattern,
    /// Rotation already reduced modulo the pattern length.
    pub mode: usize,
    pub notes: Vec<Pitch>,
}

impl ScaleInstance {
    pub fn build(tonic: Pitch, pattern: &IntervalPattern, mode: i32) -> Self {
        let notes = build_scale(tonic, pattern, mode);
        let mode = if pattern.is_empty() {
            0
        } else {
            mode.rem_euclid(pattern.len() as i32) as usize
        };
        debug!(%tonic, pattern = %pattern, mode, notes = notes.len(), "built scale");
        Self {
            tonic,
            pattern: pattern.clone(),
            mode,
            notes,
        }
    }

    pub fn notes(&self) -> &[Pitch] {
        &self.notes
    }

    pub fn cardinality(&self) -> usize {
        self.notes.len()
    }

    /// The functional root after rotation (degree I).
    pub fn root(&self) -> Option<Pitch> {
        self.notes.first().copied()
    }

    /// Note at a 1-based degree, `None` when the scale has no such degree.
    pub fn degree(&self, degree: usize) -> Option<Pitch> {
        degree.checked_sub(1).and_then(|i| self.notes.get(i).copied())
    }

    pub fn degrees(&self) -> impl Iterator<Item = (Degree, Pitch)> + '_ {
        self.notes
            .iter()
            .enumerate()
            .map(|(i, &pitch)| (Degree(i + 1), pitch))
    }

    /// Whether `pitch` shares a class with any note of the scale.
    pub fn contains(&self, pitch: Pitch) -> bool {
        is_in_scale(pitch, &self.notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::parse_pitch;
    use pretty_assertions::assert_eq;

    fn p(text: &str) -> Pitch {
        parse_pitch(text).unwrap()
    }

    fn names(notes: &[Pitch]) -> Vec<String> {
        notes.iter().map(|n| n.to_string()).collect()
    }

    fn diatonic() -> IntervalPattern {
        "2212221".parse().unwrap()
    }

    #[test]
    fn test_c_major() {
        let notes = build_scale(p("C4"), &diatonic(), 0);
        assert_eq!(
            names(&notes),
            vec!["C4", "D4", "E4", "F4", "G4", "A4", "B4"]
        );
    }

    #[test]
    fn test_aeolian_rotation_starts_on_a() {
        let notes = build_scale(p("C4"), &diatonic(), 5);
        assert_eq!(
            names(&notes),
            vec!["A4", "B4", "C4", "D4", "E4", "F4", "G4"]
        );
    }

    #[test]
    fn test_mode_wraps_modulo_length() {
        let pattern = diatonic();
        assert_eq!(build_scale(p("C4"), &pattern, 7), build_scale(p("C4"), &pattern, 0));
        assert_eq!(build_scale(p("C4"), &pattern, -2), build_scale(p("C4"), &pattern, 5));
    }

    #[test]
    fn test_carries_into_next_octave() {
        let notes = build_scale(p("A3"), &diatonic(), 0);
        assert_eq!(
            names(&notes),
            vec!["A3", "B3", "C#4", "D4", "E4", "F#4", "G#4"]
        );
    }

    #[test]
    fn test_pentatonic_has_five_degrees() {
        let pentatonic: IntervalPattern = "22323".parse().unwrap();
        let scale = ScaleInstance::build(p("G2"), &pentatonic, 0);
        assert_eq!(scale.cardinality(), 5);
        assert_eq!(names(scale.notes()), vec!["G2", "A2", "B2", "D3", "E3"]);
        assert_eq!(scale.degree(5), Some(p("E3")));
        assert_eq!(scale.degree(6), None);
        assert_eq!(scale.degree(0), None);
    }

    #[test]
    fn test_pattern_sum_need_not_be_octave() {
        let pattern: IntervalPattern = "444".parse().unwrap();
        let notes = build_scale(p("C4"), &pattern, 1);
        assert_eq!(names(&notes), vec!["E4", "G#4", "C4"]);
    }

    #[test]
    fn test_empty_pattern() {
        let scale = ScaleInstance::build(p("C4"), &IntervalPattern::new(vec![]).unwrap(), 3);
        assert!(scale.notes().is_empty());
        assert_eq!(scale.root(), None);
        assert_eq!(scale.mode, 0);
    }

    #[test]
    fn test_scale_is_short_at_octave_ceiling() {
        let top = Pitch::new(crate::pitch::PitchClass::A, u32::MAX);
        let notes = build_scale(top, &diatonic(), 0);
        assert_eq!(notes, vec![top, Pitch::new(crate::pitch::PitchClass::B, u32::MAX)]);
    }

    #[test]
    fn test_steps_must_fit_key() {
        assert!(matches!(
            IntervalPattern::new(vec![12]),
            Err(FretError::InvalidInterval(_))
        ));
        assert!(IntervalPattern::new(vec![10, 2]).is_err());

        let pattern = IntervalPattern::new(vec![9, 3]).unwrap();
        assert_eq!(pattern.key(), "93");
        assert_eq!(pattern.key().parse::<IntervalPattern>().unwrap(), pattern);
    }

    #[test]
    fn test_pattern_key_serde_round_trip() {
        let pattern = IntervalPattern::new(vec![3, 2, 2, 3, 2]).unwrap();
        let yaml = serde_yaml::to_string(&pattern).unwrap();
        let back: IntervalPattern = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, pattern);
    }

    #[test]
    fn test_pattern_key_parsing() {
        assert_eq!(diatonic().steps(), &[2u8, 2, 1, 2, 2, 2, 1]);
        assert_eq!(diatonic().key(), "2212221");
        assert!("".parse::<IntervalPattern>().is_err());
        assert!("22a".parse::<IntervalPattern>().is_err());
    }

    #[test]
    fn test_contains_is_octave_independent() {
        let scale = ScaleInstance::build(p("C4"), &diatonic(), 0);
        assert!(scale.contains(p("E1")));
        assert!(!scale.contains(p("F#4")));
    }

    #[test]
    fn test_degree_numerals() {
        let labels: Vec<String> = (1..=9).map(|d| Degree(d).numeral()).collect();
        assert_eq!(
            labels,
            vec!["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX"]
        );
        assert_eq!(Degree(12).to_string(), "XII");
    }
}
