//! # CAGED Shapes
//!
//! Overlay positions for the five CAGED shapes (C, A, G, E, D), walked up the
//! neck twice from a starting fret.
//!
//! Each shape is a table of `(string, fret)` offsets. String 1 is the last
//! configured string (the highest in the usual low-to-high order); entries
//! for strings the instrument does not have are skipped. After a shape is
//! placed, the start moves up by that shape's offset (`2 3 2 2 3`). Fret
//! indices wrap at the fret count, and a shape whose span reaches 10 frets
//! or more (typically one that wrapped) is dropped.

use serde::Serialize;
use tracing::debug;

/// Shape names in walking order. The index doubles as the display color slot.
pub const SHAPE_NAMES: [&str; 5] = ["C", "A", "G", "E", "D"];

/// Frets to move up after placing each shape.
const SHAPE_ADVANCE: [u32; 5] = [2, 3, 2, 2, 3];

/// Times the five shapes are walked.
const CYCLES: usize = 2;

/// Widest span (exclusive) a placed shape may cover.
const MAX_SPAN: u32 = 10;

/// `(string, fret)` pairs, string 1-based from the last configured string.
const SHAPES: [&[(usize, u32)]; 5] = [
    // C
    &[
        (1, 0), (1, 3), (2, 1), (2, 3), (3, 0), (3, 2), (4, 0), (4, 2),
        (5, 0), (5, 3), (6, 0), (6, 3), (7, 1), (7, 3), (8, 0), (8, 3),
    ],
    // A
    &[
        (1, 1), (1, 3), (2, 1), (2, 3), (3, 0), (3, 3), (4, 0), (4, 3),
        (5, 1), (5, 3), (6, 1), (6, 3), (7, 1), (7, 3), (8, 1), (8, 3),
    ],
    // G
    &[
        (1, 0), (1, 3), (2, 0), (2, 3), (3, 0), (3, 2), (4, 0), (4, 2),
        (5, 0), (5, 2), (6, 0), (6, 3), (7, 0), (7, 3), (8, 0), (8, 3),
    ],
    // E
    &[
        (1, 1), (1, 3), (2, 1), (2, 3), (3, 0), (3, 2), (4, 0), (4, 3),
        (5, 0), (5, 3), (6, 1), (6, 3), (7, 1), (7, 3), (8, 1), (8, 3),
    ],
    // D
    &[
        (1, 1), (1, 3), (2, 1), (2, 4), (3, 0), (3, 3), (4, 1), (4, 3),
        (5, 1), (5, 3), (6, 1), (6, 3), (7, 1), (7, 4), (8, 1), (8, 3),
    ],
];

/// One marked position. `string` indexes the string configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShapeCell {
    pub string: usize,
    pub fret: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CagedShape {
    pub name: &'static str,
    pub color: usize,
    pub cycle: usize,
    pub cells: Vec<ShapeCell>,
}

/// Place the CAGED shapes for an instrument with `strings` strings and `frets` frets.
///
/// `root_fret` is the fret the first C shape starts on. Returns nothing when
/// the board has no frets.
pub fn caged_shapes(strings: usize, frets: u8, root_fret: u32) -> Vec<CagedShape> {
    let frets = u32::from(frets);
    if frets == 0 {
        return Vec::new();
    }

    let mut shapes = Vec::new();
    let mut start = root_fret;
    for cycle in 0..CYCLES {
        for (color, (&table, &advance)) in SHAPES.iter().zip(&SHAPE_ADVANCE).enumerate() {
            // Zero-based fret index; fret numbers count from 1
            let indices: Vec<(usize, u32)> = table
                .iter()
                .filter(|&&(string, _)| string <= strings)
                .map(|&(string, offset)| (strings - string, (start + offset + frets - 1) % frets))
                .collect();
            start += advance;

            let lowest = indices.iter().map(|&(_, i)| i).min();
            let highest = indices.iter().map(|&(_, i)| i).max();
            let span = match (lowest, highest) {
                (Some(lo), Some(hi)) => hi - lo,
                _ => continue,
            };
            if span >= MAX_SPAN {
                debug!(shape = SHAPE_NAMES[color], cycle, span, "dropping wrapped shape");
                continue;
            }

            shapes.push(CagedShape {
                name: SHAPE_NAMES[color],
                color,
                cycle,
                cells: indices
                    .into_iter()
                    .map(|(string, index)| ShapeCell {
                        string,
                        fret: index + 1,
                    })
                    .collect(),
            });
        }
    }
    shapes
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_walk_drops_wrapped_d_shape() {
        let shapes = caged_shapes(8, 24, 1);
        let names: Vec<(&str, usize)> = shapes.iter().map(|s| (s.name, s.cycle)).collect();
        assert_eq!(
            names,
            vec![
                ("C", 0),
                ("A", 0),
                ("G", 0),
                ("E", 0),
                ("D", 0),
                ("C", 1),
                ("A", 1),
                ("G", 1),
                ("E", 1),
            ]
        );
    }

    #[test]
    fn test_first_c_shape_cells() {
        let shapes = caged_shapes(8, 24, 1);
        let c = &shapes[0];
        assert_eq!(c.color, 0);
        assert_eq!(c.cells.len(), 16);
        assert_eq!(c.cells[0], ShapeCell { string: 7, fret: 1 });
        assert_eq!(c.cells[1], ShapeCell { string: 7, fret: 4 });
        assert_eq!(c.cells[15], ShapeCell { string: 0, fret: 4 });
    }

    #[test]
    fn test_start_advances_between_shapes() {
        let shapes = caged_shapes(8, 24, 1);
        let lowest: Vec<u32> = shapes
            .iter()
            .map(|s| s.cells.iter().map(|c| c.fret).min().unwrap())
            .collect();
        assert_eq!(lowest, vec![1, 3, 6, 8, 10, 13, 15, 18, 20]);
    }

    #[test]
    fn test_fewer_strings_skip_missing_rows() {
        let shapes = caged_shapes(6, 24, 1);
        assert_eq!(shapes[0].cells.len(), 12);
        assert!(shapes.iter().flat_map(|s| &s.cells).all(|c| c.string < 6));
        assert_eq!(shapes[0].cells[0], ShapeCell { string: 5, fret: 1 });
    }

    #[test]
    fn test_wrapping_near_top_of_neck() {
        let shapes = caged_shapes(8, 12, 10);
        // C from fret 10 spans 10..13, which wraps past fret 12
        assert!(shapes.iter().all(|s| {
            let lo = s.cells.iter().map(|c| c.fret).min().unwrap();
            let hi = s.cells.iter().map(|c| c.fret).max().unwrap();
            hi - lo < MAX_SPAN && hi <= 12
        }));
        assert!(!shapes.iter().any(|s| s.name == "C" && s.cycle == 0));
    }

    #[test]
    fn test_no_frets() {
        assert!(caged_shapes(8, 0, 1).is_empty());
    }
}
