use tracing::trace;

use crate::error::FretError;
use crate::pitch::Pitch;

/// Move a pitch by a signed number of semitones.
///
/// Works on the absolute index (C0 = 0), so octaves carry naturally in both
/// directions. The result is always canonically spelled. There is no ceiling;
/// the floor is C0.
///
/// # Errors
/// [`FretError::BelowRangeFloor`] when the result would sit below C0.
///
/// # Example
/// ```rust
/// use fretmap::{parse_pitch, transpose};
///
/// let c4 = parse_pitch("C4")?;
/// assert_eq!(transpose(c4, 12)?.to_string(), "C5");
/// assert_eq!(transpose(c4, -1)?.to_string(), "B3");
/// assert!(transpose(parse_pitch("C0")?, -1).is_err());
/// # Ok::<(), fretmap::FretError>(())
/// ```
pub fn transpose(pitch: Pitch, semitones: i32) -> Result<Pitch, FretError> {
    let absolute = pitch.midi() + semitones as i64;
    if absolute < 0 {
        trace!(%pitch, semitones, "transposition below C0");
        return Err(FretError::BelowRangeFloor { pitch, semitones });
    }
    Pitch::from_midi(absolute).ok_or(FretError::OctaveOverflow { pitch, semitones })
}
