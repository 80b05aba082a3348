//! fretmap - fretboard scale and chord maps from the command line

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use fretmap::{
    compute, parse_pitch, transpose, ChordMatrix, Computation, FretboardConfig, Pitch, Registry,
    ScaleInstance,
};

#[derive(Parser)]
#[command(name = "fretmap")]
#[command(about = "Scale, chord and fretboard maps for stringed instruments")]
#[command(version)]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show canonical spelling, absolute index and frequency of a pitch
    Note { pitch: String },

    /// Transpose a pitch by a number of semitones
    Transpose {
        pitch: String,
        #[arg(allow_hyphen_values = true)]
        semitones: i32,
    },

    /// List the degrees of a scale
    Scale {
        tonic: String,
        /// Pattern key, e.g. 2212221
        #[arg(short, long, default_value = "2212221")]
        pattern: String,
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        mode: i32,
    },

    /// Show which chords fit on each degree of a scale
    Chords {
        tonic: String,
        #[arg(short, long, default_value = "2212221")]
        pattern: String,
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        mode: i32,
    },

    /// Compute a full fretboard from a YAML config (defaults when omitted)
    Render { config: Option<PathBuf> },

    /// List built-in scale patterns and chord templates
    Patterns,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NoteInfo {
    pitch: Pitch,
    midi: i64,
    frequency_hz: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let registry = Registry::builtin();

    match cli.command {
        Commands::Note { pitch } => {
            let pitch = parse_pitch(&pitch)?;
            let info = NoteInfo {
                pitch,
                midi: pitch.midi(),
                frequency_hz: pitch.frequency_hz(),
            };
            if cli.json {
                print_json(&info)?;
            } else {
                println!("{}  midi {}  {:.2} Hz", info.pitch, info.midi, info.frequency_hz);
            }
        }
        Commands::Transpose { pitch, semitones } => {
            let moved = transpose(parse_pitch(&pitch)?, semitones)?;
            if cli.json {
                print_json(&moved)?;
            } else {
                println!("{}", moved.label());
            }
        }
        Commands::Scale {
            tonic,
            pattern,
            mode,
        } => {
            let scale = ScaleInstance::build(parse_pitch(&tonic)?, registry.pattern(&pattern)?, mode);
            if cli.json {
                print_json(&scale)?;
            } else {
                print_scale(&scale);
            }
        }
        Commands::Chords {
            tonic,
            pattern,
            mode,
        } => {
            let scale = ScaleInstance::build(parse_pitch(&tonic)?, registry.pattern(&pattern)?, mode);
            let matrix = ChordMatrix::build(&scale, registry.chords());
            if cli.json {
                print_json(&matrix)?;
            } else {
                print_matrix(&matrix);
            }
        }
        Commands::Render { config } => {
            let config = match config {
                Some(path) => {
                    let source = fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    FretboardConfig::from_yaml(&source)
                        .with_context(|| format!("parsing {}", path.display()))?
                }
                None => FretboardConfig::default(),
            };
            let computation = compute(&config)?;
            if cli.json {
                print_json(&computation)?;
            } else {
                print_computation(&computation);
            }
        }
        Commands::Patterns => {
            if cli.json {
                print_json(registry)?;
            } else {
                println!("Patterns:");
                for entry in registry.patterns() {
                    println!("  {:<14} {}", entry.key.key(), entry.name);
                }
                println!("Chords:");
                for chord in registry.chords() {
                    println!("  {:<6} {}", chord.name(), chord.labels().join(" "));
                }
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_scale(scale: &ScaleInstance) {
    for (degree, pitch) in scale.degrees() {
        println!("{:>5}  {}", degree.numeral(), pitch.label());
    }
}

fn print_matrix(matrix: &ChordMatrix) {
    print!("{:>12}", "");
    for name in &matrix.templates {
        print!("{:>6}", name);
    }
    println!();
    for row in &matrix.degrees {
        print!("{:>5} {:<6}", row.numeral, row.root.to_string());
        for &fit in &row.fits {
            print!("{:>6}", if fit { "x" } else { "." });
        }
        println!("  ({})", row.count);
    }
}

fn print_computation(computation: &Computation) {
    print_scale(&computation.scale);
    println!();
    print_matrix(&computation.chord_matrix);
    if let Some(chord) = &computation.chord {
        let notes: Vec<String> = chord.notes.iter().map(|n| n.to_string()).collect();
        println!();
        println!("{} {} on {}: {}", chord.numeral, chord.name, chord.root, notes.join(" "));
    }
    println!();
    // R = root, * = chord tone, o = scale tone
    for row in &computation.fretboard.strings {
        print!("{:<16}", row.label);
        for cell in &row.cells {
            let mark = if cell.in_chord {
                "*"
            } else if cell.is_root {
                "R"
            } else if cell.in_scale {
                "o"
            } else {
                "-"
            };
            print!(" {}", mark);
        }
        println!();
    }
    if !computation.caged.is_empty() {
        println!();
        for shape in &computation.caged {
            let lowest = shape.cells.iter().map(|c| c.fret).min().unwrap_or(0);
            let highest = shape.cells.iter().map(|c| c.fret).max().unwrap_or(0);
            println!("{} shape: frets {}-{}", shape.name, lowest, highest);
        }
    }
}
