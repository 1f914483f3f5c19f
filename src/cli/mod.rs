//! Command-line parsing for the QR code generator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! generation pipeline. The interactive question/answer flow lives in `prompt`.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::{
    DEFAULT_BACKGROUND, DEFAULT_BORDER, DEFAULT_BOX_SIZE, DEFAULT_ERROR_CORRECTION, DEFAULT_FILL, DEFAULT_SIZE,
    GenerationParams, ValidationPolicy,
};

pub mod prompt;

/// Top-level CLI.
///
/// With `--batch` every line of the file is encoded; with `--data` a single code is
/// generated; with neither, the interactive prompt runs.
#[derive(Debug, Parser)]
#[command(name = "qrgen", version, about = "QR code generator (single, batch, interactive)")]
pub struct Cli {
    /// The URL or text to encode.
    #[arg(short = 'd', long)]
    pub data: Option<String>,

    /// Output filename (`.png` is appended unless it ends in .png/.jpg/.jpeg).
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// QR code version (1-40).
    #[arg(short = 's', long, default_value_t = DEFAULT_SIZE, allow_negative_numbers = true)]
    pub size: i64,

    /// Quiet-zone width in modules.
    #[arg(short = 'b', long, default_value_t = DEFAULT_BORDER, allow_negative_numbers = true)]
    pub border: i64,

    /// Module color (name or #RRGGBB).
    #[arg(short = 'f', long, default_value = DEFAULT_FILL)]
    pub fill: String,

    /// Background color (name or #RRGGBB). `-bg` is accepted as a short form.
    #[arg(long, visible_alias = "bg", default_value = DEFAULT_BACKGROUND)]
    pub background: String,

    /// Error correction level (L, M, Q, H).
    #[arg(short = 'e', long, default_value = DEFAULT_ERROR_CORRECTION)]
    pub error_correction: String,

    /// Text file with one URL/text per line to encode.
    #[arg(long, value_name = "PATH")]
    pub batch: Option<PathBuf>,

    /// Ask for the payload and options on the terminal.
    #[arg(short = 'i', long, conflicts_with_all = ["data", "batch"])]
    pub interactive: bool,

    /// Directory generated images are written to.
    #[arg(long, env = "QRGEN_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Pixels per module.
    #[arg(long, default_value_t = DEFAULT_BOX_SIZE, allow_negative_numbers = true)]
    pub box_size: i64,

    /// Use a larger version when the payload does not fit `--size`.
    #[arg(long)]
    pub fit: bool,

    /// How out-of-range sizes and unknown error correction levels are handled.
    #[arg(long, value_enum, env = "QRGEN_VALIDATION", default_value_t = ValidationPolicy::Standard)]
    pub validation: ValidationPolicy,

    /// Export the batch report (`.csv` for CSV, anything else for JSON).
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Append log events to this file instead of stderr.
    #[arg(long, env = "QRGEN_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Rendering parameters exactly as given on the command line.
    pub fn params(&self) -> GenerationParams {
        GenerationParams {
            size: self.size,
            border: self.border,
            fill_color: self.fill.clone(),
            back_color: self.background.clone(),
            error_correction: self.error_correction.clone(),
            box_size: self.box_size,
            fit: self.fit,
        }
    }
}

/// Rewrite argv so the historical `-bg` spelling works.
///
/// Clap short flags are single characters, and `-bg` would otherwise parse as
/// `-b g` (a border of "g").
pub fn rewrite_args(argv: Vec<String>) -> Vec<String> {
    argv.into_iter()
        .map(|arg| {
            if arg == "-bg" {
                "--background".to_string()
            } else if let Some(value) = arg.strip_prefix("-bg=") {
                format!("--background={value}")
            } else {
                arg
            }
        })
        .collect()
}
