//! Error types.
//!
//! - `ValidationError`: a request was rejected before any work started (exit code 2)
//! - `EncodeError`: one generation failed inside the encode/render/persist step
//! - `AppError`: the top-level error `main` prints, carrying the process exit code

use thiserror::Error;

/// Exit code for rejected parameters and usage problems.
pub const EXIT_VALIDATION: u8 = 2;
/// Exit code for a single generation the encoder could not satisfy.
pub const EXIT_ENCODING: u8 = 3;
/// Exit code for filesystem failures (batch source, output directory, report export).
pub const EXIT_IO: u8 = 4;

/// A generation parameter failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Payload is empty. Provide text or a URL to encode.")]
    EmptyPayload,
    #[error("Invalid size {0}. Size must be between 1 and 40.")]
    InvalidSize(i64),
    #[error("Invalid border {0}. Border must be zero or positive.")]
    InvalidBorder(i64),
    #[error("Invalid error correction level '{0}'. Expected one of L, M, Q, H.")]
    InvalidErrorCorrection(String),
    #[error("The {0} color must not be empty.")]
    EmptyColor(&'static str),
    #[error("Invalid box size {0}. Box size must be at least 1 pixel.")]
    InvalidBoxSize(i64),
}

/// A single generation failed after validation.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Payload does not fit in a version {version} symbol at error correction {tier}.")]
    DataTooLong { version: u8, tier: char },
    #[error("Encoder rejected the symbol: {0}")]
    Encoder(String),
    #[error("Unsupported color '{0}'. Use a CSS color name, #RRGGBB or rgb(r, g, b).")]
    UnsupportedColor(String),
    #[error("Rendered image would be {0} pixels wide, which exceeds the {1} pixel limit.")]
    ImageTooLarge(u64, u32),
    #[error("Failed to encode image '{path}': {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl EncodeError {
    /// Whether the failure came from the filesystem rather than the symbol itself.
    pub fn is_io(&self) -> bool {
        matches!(self, EncodeError::Io { .. })
    }
}

/// Top-level failure: the message `main` prints and the exit code it returns.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::new(EXIT_VALIDATION, format!("Error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_displays_its_message_and_keeps_the_exit_code() {
        let err = AppError::new(EXIT_IO, "Error: disk full");
        assert_eq!(err.to_string(), "Error: disk full");
        assert_eq!(err.exit_code(), EXIT_IO);
    }

    #[test]
    fn validation_errors_become_exit_code_two() {
        let err: AppError = ValidationError::InvalidSize(41).into();
        assert_eq!(err.exit_code(), EXIT_VALIDATION);
        assert_eq!(err.to_string(), "Error: Invalid size 41. Size must be between 1 and 40.");
    }
}
