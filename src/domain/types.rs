//! Shared domain types.
//!
//! Requests are built once per invocation (CLI flags, interactive answers, or one batch
//! line) and never mutated. Results and reports are serializable so they can be exported.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::EncodeError;

pub const DEFAULT_SIZE: i64 = 10;
pub const DEFAULT_BORDER: i64 = 4;
pub const DEFAULT_BOX_SIZE: i64 = 10;
pub const DEFAULT_FILL: &str = "black";
pub const DEFAULT_BACKGROUND: &str = "white";
pub const DEFAULT_ERROR_CORRECTION: &str = "H";

pub const MIN_VERSION: i64 = 1;
pub const MAX_VERSION: i64 = 40;

/// How out-of-range or unrecognized parameters are treated.
///
/// One policy is chosen per process and applied by every entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Reject out-of-range sizes; fall back to `H` for unknown error-correction keys.
    #[default]
    Standard,
    /// Reject out-of-range sizes and unknown error-correction keys.
    Strict,
    /// Clamp sizes to the default and fall back to `H`, logging a warning.
    Lenient,
}

/// Error-correction tier (recovery capacity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EcTier {
    L,
    M,
    Q,
    H,
}

impl EcTier {
    pub const ALL: [EcTier; 4] = [EcTier::L, EcTier::M, EcTier::Q, EcTier::H];

    /// Parse a case-insensitive `L`/`M`/`Q`/`H` key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_uppercase().as_str() {
            "L" => Some(EcTier::L),
            "M" => Some(EcTier::M),
            "Q" => Some(EcTier::Q),
            "H" => Some(EcTier::H),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            EcTier::L => 'L',
            EcTier::M => 'M',
            EcTier::Q => 'Q',
            EcTier::H => 'H',
        }
    }

    /// Nominal share of damaged codewords the symbol can recover from.
    pub fn recovery_percent(self) -> u8 {
        match self {
            EcTier::L => 7,
            EcTier::M => 15,
            EcTier::Q => 25,
            EcTier::H => 30,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            EcTier::L => "Low",
            EcTier::M => "Medium",
            EcTier::Q => "Quartile",
            EcTier::H => "High",
        }
    }
}

/// Rendering parameters exactly as supplied by a front-end.
///
/// Numbers are kept signed and the error-correction level is kept as text so the
/// normalizer, not the front-end, decides what is acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParams {
    pub size: i64,
    pub border: i64,
    pub fill_color: String,
    pub back_color: String,
    pub error_correction: String,
    /// Pixels per module.
    pub box_size: i64,
    /// Let the encoder pick a larger version when the payload does not fit `size`.
    pub fit: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            border: DEFAULT_BORDER,
            fill_color: DEFAULT_FILL.to_string(),
            back_color: DEFAULT_BACKGROUND.to_string(),
            error_correction: DEFAULT_ERROR_CORRECTION.to_string(),
            box_size: DEFAULT_BOX_SIZE,
            fit: false,
        }
    }
}

/// One generation as requested by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub payload: String,
    pub output_name: Option<String>,
    pub params: GenerationParams,
}

/// Fully validated generation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalConfig {
    /// Symbol version, 1..=40.
    pub version: u8,
    /// Quiet-zone width in modules.
    pub border: u32,
    pub fill_color: String,
    pub back_color: String,
    pub error_correction: EcTier,
    pub box_size: u32,
    pub fit: bool,
}

/// A request after normalization: trimmed payload plus canonical configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest {
    pub payload: String,
    pub output_name: Option<String>,
    pub config: CanonicalConfig,
}

/// Which stage a failed generation broke in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Encoding,
    Io,
}

/// Outcome of one generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    pub output_path: PathBuf,
    pub succeeded: bool,
    pub error_detail: Option<String>,
    pub failure: Option<FailureKind>,
}

impl GenerationResult {
    pub fn success(output_path: &Path) -> Self {
        Self {
            output_path: output_path.to_path_buf(),
            succeeded: true,
            error_detail: None,
            failure: None,
        }
    }

    pub fn failure(output_path: &Path, err: &EncodeError) -> Self {
        let kind = if err.is_io() {
            FailureKind::Io
        } else {
            FailureKind::Encoding
        };
        Self {
            output_path: output_path.to_path_buf(),
            succeeded: false,
            error_detail: Some(err.to_string()),
            failure: Some(kind),
        }
    }
}

/// One processed batch line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchItem {
    /// 1-based line number in the batch source.
    pub line_number: usize,
    pub source_line: String,
    pub result: GenerationResult,
}

/// Aggregate outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
    pub total_count: usize,
    pub success_count: usize,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line_number: usize, source_line: impl Into<String>, result: GenerationResult) {
        self.total_count += 1;
        if result.succeeded {
            self.success_count += 1;
        }
        self.items.push(BatchItem {
            line_number,
            source_line: source_line.into(),
            result,
        });
    }

    pub fn failed_count(&self) -> usize {
        self.total_count - self.success_count
    }

    pub fn failures(&self) -> impl Iterator<Item = &BatchItem> {
        self.items.iter().filter(|item| !item.result.succeeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ec_keys_are_case_insensitive() {
        assert_eq!(EcTier::from_key("q"), Some(EcTier::Q));
        assert_eq!(EcTier::from_key(" H "), Some(EcTier::H));
        assert_eq!(EcTier::from_key("X"), None);
        assert_eq!(EcTier::from_key(""), None);
    }

    #[test]
    fn report_counts_follow_pushes() {
        let err = EncodeError::UnsupportedColor("mauve-ish".to_string());
        let mut report = BatchReport::new();
        report.push(1, "a", GenerationResult::success(Path::new("batch_qr_1.png")));
        report.push(2, "b", GenerationResult::failure(Path::new("batch_qr_2.png"), &err));

        assert_eq!(report.total_count, 2);
        assert_eq!(report.success_count, 1);
        assert_eq!(report.failed_count(), 1);
        let failed: Vec<_> = report.failures().map(|i| i.line_number).collect();
        assert_eq!(failed, vec![2]);
        assert_eq!(report.items[1].result.failure, Some(FailureKind::Encoding));
    }
}
