//! Rasterize a symbol matrix into an RGB image.
//!
//! Each module becomes a `box_size` x `box_size` block, surrounded by a quiet zone of
//! `border` modules painted in the background color.

use image::RgbImage;

use super::SymbolMatrix;
use super::color::parse_color;
use crate::domain::CanonicalConfig;
use crate::error::EncodeError;

/// Largest image edge we are willing to allocate.
pub const MAX_IMAGE_EDGE: u32 = 20_000;

/// Render `matrix` with the colors, border and module size from `config`.
pub fn render(matrix: &SymbolMatrix, config: &CanonicalConfig) -> Result<RgbImage, EncodeError> {
    let fill = parse_color(&config.fill_color).ok_or_else(|| EncodeError::UnsupportedColor(config.fill_color.clone()))?;
    let back = parse_color(&config.back_color).ok_or_else(|| EncodeError::UnsupportedColor(config.back_color.clone()))?;

    let box_size = u64::from(config.box_size);
    let border = u64::from(config.border);
    let modules = matrix.width() as u64 + 2 * border;
    let edge = modules * box_size;
    if edge > u64::from(MAX_IMAGE_EDGE) {
        return Err(EncodeError::ImageTooLarge(edge, MAX_IMAGE_EDGE));
    }
    // Bounded by MAX_IMAGE_EDGE above.
    let edge = edge as u32;
    let box_size = config.box_size;
    let border = config.border;

    let mut img = RgbImage::from_pixel(edge, edge, back);
    for y in 0..matrix.width() {
        for x in 0..matrix.width() {
            if !matrix.is_dark(x, y) {
                continue;
            }
            let px = (border + x as u32) * box_size;
            let py = (border + y as u32) * box_size;
            for dy in 0..box_size {
                for dx in 0..box_size {
                    img.put_pixel(px + dx, py + dy, fill);
                }
            }
        }
    }

    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use crate::domain::EcTier;

    fn config(fill: &str, back: &str, border: u32, box_size: u32) -> CanonicalConfig {
        CanonicalConfig {
            version: 1,
            border,
            fill_color: fill.to_string(),
            back_color: back.to_string(),
            error_correction: EcTier::L,
            box_size,
            fit: false,
        }
    }

    fn checker(width: usize) -> SymbolMatrix {
        let modules = (0..width * width).map(|i| (i / width + i % width) % 2 == 0).collect();
        SymbolMatrix::new(1, width, modules).unwrap()
    }

    #[test]
    fn paints_quiet_zone_and_modules() {
        let m = checker(3);
        let img = render(&m, &config("#ff0000", "white", 1, 2)).unwrap();

        assert_eq!(img.dimensions(), (10, 10));
        // Quiet zone.
        assert_eq!(*img.get_pixel(0, 0), Rgb([255, 255, 255]));
        // Module (0,0) is dark and starts after one border module.
        assert_eq!(*img.get_pixel(2, 2), Rgb([255, 0, 0]));
        assert_eq!(*img.get_pixel(3, 3), Rgb([255, 0, 0]));
        // Module (1,0) is light.
        assert_eq!(*img.get_pixel(4, 2), Rgb([255, 255, 255]));
    }

    #[test]
    fn zero_border_has_no_quiet_zone() {
        let img = render(&checker(3), &config("black", "white", 0, 1)).unwrap();
        assert_eq!(img.dimensions(), (3, 3));
        assert_eq!(*img.get_pixel(0, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn accepts_css_names_and_rgb_function() {
        let img = render(&checker(3), &config("rgb(0,0,0)", "skyblue", 0, 1)).unwrap();
        assert_eq!(*img.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(1, 0), Rgb([135, 206, 235]));
    }

    #[test]
    fn rejects_unknown_colors() {
        let err = render(&checker(3), &config("black", "sunset", 4, 10)).unwrap_err();
        assert!(matches!(err, EncodeError::UnsupportedColor(c) if c == "sunset"));
    }

    #[test]
    fn rejects_oversized_images() {
        let err = render(&checker(21), &config("black", "white", 4_000, 10)).unwrap_err();
        assert!(matches!(err, EncodeError::ImageTooLarge(_, MAX_IMAGE_EDGE)));
    }
}
