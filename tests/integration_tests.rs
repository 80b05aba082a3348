//! Integration tests for the fretmap engine
//!
//! Exercises the public API end to end: pitch text in, scale/chord/fretboard out.

use fretmap::{
    build_chord, build_scale, chord_fits_scale, compute, compute_yaml, is_in_scale, parse_pitch,
    pitch_to_frequency_hz, same_letter_class, transpose, ChordSelection, FretError,
    FretboardConfig, Pitch, Registry,
};
use pretty_assertions::assert_eq;

fn p(text: &str) -> Pitch {
    parse_pitch(text).unwrap()
}

fn names(notes: &[Pitch]) -> Vec<String> {
    notes.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_parse_is_idempotent_over_grammar() {
    for letter in ["A", "B", "C", "D", "E", "F", "G"] {
        for accidental in ["", "#", "b"] {
            for octave in 0..=10 {
                let text = format!("{}{}{}", letter, accidental, octave);
                let pitch = parse_pitch(&text).unwrap();
                assert_eq!(parse_pitch(&pitch.to_string()).unwrap(), pitch, "{}", text);
            }
        }
    }
}

#[test]
fn test_reference_frequencies() {
    assert_eq!(pitch_to_frequency_hz(p("A4")), 440.00);
    assert_eq!(pitch_to_frequency_hz(p("A3")), 220.00);
}

#[test]
fn test_octave_transposition() {
    let c4 = p("C4");
    let up = transpose(c4, 12).unwrap();
    assert!(same_letter_class(up, c4));
    assert!(up.octave > c4.octave);
}

#[test]
fn test_floor() {
    assert!(matches!(
        transpose(p("C0"), -1),
        Err(FretError::BelowRangeFloor { .. })
    ));
}

#[test]
fn test_enharmonic_flat() {
    let db4 = p("Db4");
    let cs4 = p("C#4");
    assert_eq!(db4.class, cs4.class);
    assert_eq!(db4.octave, cs4.octave);
}

#[test]
fn test_major_scale_and_aeolian() {
    let diatonic = Registry::builtin().pattern("2212221").unwrap();
    assert_eq!(
        names(&build_scale(p("C4"), diatonic, 0)),
        vec!["C4", "D4", "E4", "F4", "G4", "A4", "B4"]
    );
    let aeolian = build_scale(p("C4"), diatonic, 5);
    assert!(same_letter_class(aeolian[0], p("A0")));
}

#[test]
fn test_chord_fit_on_first_and_second_degree() {
    let registry = Registry::builtin();
    let scale = build_scale(p("C4"), registry.pattern("2212221").unwrap(), 0);
    let maj = registry.chord("maj").unwrap();

    let on_one = build_chord(scale[0], maj).unwrap();
    assert!(chord_fits_scale(&on_one, &scale));

    let on_two = build_chord(scale[1], maj).unwrap();
    assert!(!chord_fits_scale(&on_two, &scale));
    assert!(!is_in_scale(on_two[1], &scale));
}

#[test]
fn test_transpose_round_trip() {
    for midi in 0..132 {
        let pitch = Pitch::from_midi(midi).unwrap();
        for k in [-25, -12, -1, 0, 1, 7, 12, 30] {
            if let Ok(moved) = transpose(pitch, k) {
                assert_eq!(transpose(moved, -k).unwrap(), pitch);
            }
        }
    }
}

#[test]
fn test_compute_defaults() {
    let result = compute(&FretboardConfig::default()).unwrap();
    assert_eq!(result.scale.notes.len(), 7);
    assert_eq!(result.chord_matrix.degrees.len(), 7);
    assert_eq!(result.chord, None);
    assert_eq!(result.fretboard.strings.len(), 8);
    assert_eq!(result.fretboard.strings[0].cells.len(), 25);
    assert_eq!(result.fretboard.strings[0].label, "E1 (41.20Hz)");
    assert_eq!(result.caged.len(), 9);
    assert_eq!(result.caged[0].name, "C");
}

#[test]
fn test_compute_without_caged() {
    let config = FretboardConfig {
        caged_root_fret: None,
        ..FretboardConfig::default()
    };
    assert!(compute(&config).unwrap().caged.is_empty());
}

#[test]
fn test_compute_with_chord_selection() {
    let config = FretboardConfig {
        strings: ["E2", "A2", "D3", "G3", "B3", "E4"].iter().map(|s| p(s)).collect(),
        frets: 12,
        tonic: p("G3"),
        chord: Some(ChordSelection {
            degree: 5,
            name: "7".to_string(),
        }),
        ..FretboardConfig::default()
    };
    let result = compute(&config).unwrap();
    let chord = result.chord.unwrap();
    assert_eq!(chord.numeral, "V");
    assert_eq!(names(&chord.notes), vec!["D4", "F#4", "A4", "C5"]);
    assert!(chord.fits(&result.scale));

    // open D string is a chord tone, open E is only a scale tone
    let open_d = result.fretboard.cell(2, 0).unwrap();
    assert!(open_d.in_chord);
    let open_e = result.fretboard.cell(0, 0).unwrap();
    assert!(open_e.in_scale && !open_e.in_chord);
    // G on the low E string is the root
    assert!(result.fretboard.cell(0, 3).unwrap().is_root);
}

#[test]
fn test_compute_rejects_bad_requests() {
    let too_few = FretboardConfig {
        strings: vec![p("E2"), p("A2"), p("D3")],
        ..FretboardConfig::default()
    };
    assert_eq!(compute(&too_few).unwrap_err(), FretError::StringCount(3));

    let unknown_pattern = FretboardConfig {
        pattern: "9".to_string(),
        ..FretboardConfig::default()
    };
    assert_eq!(
        compute(&unknown_pattern).unwrap_err(),
        FretError::UnknownPattern("9".to_string())
    );

    let missing_degree = FretboardConfig {
        pattern: "22323".to_string(),
        chord: Some(ChordSelection {
            degree: 7,
            name: "maj".to_string(),
        }),
        ..FretboardConfig::default()
    };
    assert_eq!(
        compute(&missing_degree).unwrap_err(),
        FretError::DegreeOutOfRange {
            degree: 7,
            cardinality: 5
        }
    );
}

#[test]
fn test_compute_yaml_with_bass_tuning() {
    let source = r#"
strings: [B0, E1, A1, D2, G2]
frets: 20
tonic: E2
pattern: "32232"
mode: 0
"#;
    let result = compute_yaml(source).unwrap();
    assert_eq!(names(&result.scale.notes), vec!["E2", "G2", "A2", "B2", "D3"]);
    assert_eq!(result.fretboard.strings.len(), 5);
    assert_eq!(result.fretboard.frets, 20);
}

#[test]
fn test_computation_serializes_to_json() {
    let result = compute_yaml("tonic: A3\nchord:\n  degree: 1\n  name: maj\n").unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["scale"]["tonic"], "A3");
    assert_eq!(json["scale"]["pattern"], "2212221");
    assert_eq!(json["chord"]["notes"][1], "C#4");
    assert_eq!(json["chordMatrix"]["templates"][0], "maj");
    assert_eq!(json["fretboard"]["strings"][0]["cells"][0]["inScale"], true);
    assert_eq!(json["caged"][0]["cells"][0]["string"], 7);
}
