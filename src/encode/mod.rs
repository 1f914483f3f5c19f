//! Encode invoker: payload + canonical config -> one image file on disk.
//!
//! The symbol encoder sits behind [`SymbolEncoder`] so the pipeline can be exercised
//! with encoders that fail on demand. Rasterizing and persisting are ours (`render`,
//! `crate::io::image`). Every failure is folded into the returned `GenerationResult`.

use std::path::Path;

use tracing::{error, info};

use crate::domain::{CanonicalConfig, EcTier, GenerationResult};
use crate::error::EncodeError;

pub mod color;
pub mod qr;
pub mod render;

pub use color::parse_color;
pub use qr::QrCodeEncoder;
pub use render::render;

/// A square module grid produced by a symbol encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolMatrix {
    /// Version actually used (may exceed the requested one when fitting).
    pub version: u8,
    width: usize,
    modules: Vec<bool>,
}

impl SymbolMatrix {
    /// Build a matrix from row-major module colors (`true` = dark).
    pub fn new(version: u8, width: usize, modules: Vec<bool>) -> Option<Self> {
        if width == 0 || modules.len() != width * width {
            return None;
        }
        Some(Self { version, width, modules })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.modules[y * self.width + x]
    }
}

/// External symbol encoder (QR Code, ISO/IEC 18004).
pub trait SymbolEncoder {
    /// Encode `payload` at `version`. With `fit`, larger versions (up to 40) may be
    /// used when the payload does not fit.
    fn encode_symbol(&self, payload: &str, tier: EcTier, version: u8, fit: bool) -> Result<SymbolMatrix, EncodeError>;
}

/// Encode, render and write a single symbol to `output_path`.
pub fn encode(
    encoder: &dyn SymbolEncoder,
    payload: &str,
    config: &CanonicalConfig,
    output_path: &Path,
) -> GenerationResult {
    match encode_to_file(encoder, payload, config, output_path) {
        Ok(version) => {
            info!(path = %output_path.display(), version, tier = %config.error_correction.letter(), "qr code generated");
            GenerationResult::success(output_path)
        }
        Err(err) => {
            error!(path = %output_path.display(), error = %err, "qr code generation failed");
            GenerationResult::failure(output_path, &err)
        }
    }
}

fn encode_to_file(
    encoder: &dyn SymbolEncoder,
    payload: &str,
    config: &CanonicalConfig,
    output_path: &Path,
) -> Result<u8, EncodeError> {
    let matrix = encoder.encode_symbol(payload, config.error_correction, config.version, config.fit)?;
    let image = render(&matrix, config)?;
    crate::io::image::write_image_atomic(&image, output_path)?;
    Ok(matrix.version)
}
