//! Image persistence.
//!
//! Images are encoded into a temporary file next to the destination and renamed into
//! place, so the destination path only ever holds a complete image. An existing file
//! at the destination is replaced.

use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::error::EncodeError;

/// Write `img` to `path`, choosing the format from the file extension.
pub fn write_image_atomic(img: &RgbImage, path: &Path) -> Result<(), EncodeError> {
    let display = path.display().to_string();
    let format = ImageFormat::from_path(path).map_err(|source| EncodeError::Image {
        path: display.clone(),
        source,
    })?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let io_err = |source: std::io::Error| EncodeError::Io {
        path: display.clone(),
        source,
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".qrgen-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(io_err)?;

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        img.write_to(&mut writer, format).map_err(|source| EncodeError::Image {
            path: display.clone(),
            source,
        })?;
        writer.flush().map_err(io_err)?;
    }

    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
