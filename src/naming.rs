//! Output file naming.
//!
//! Generated names are `qrimg_<YYYYMMDD_HHMMSS>_<NNNN>.png`. The timestamp only has
//! second resolution, so the 4-digit random suffix is what separates two generations
//! issued within the same second. That makes names unique with high probability, not
//! guaranteed: two calls in the same second collide with probability 1/9000. No
//! existence check is made, and an existing file with the same name is overwritten.

use chrono::{DateTime, Local, TimeZone};
use rand::Rng;

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Resolve the output file name for a single generation.
pub fn resolve_name(output_name: Option<&str>) -> String {
    resolve_name_with(output_name, Local::now(), &mut rand::thread_rng())
}

/// Same as [`resolve_name`], with the clock and random source supplied by the caller.
pub fn resolve_name_with<Tz, R>(output_name: Option<&str>, now: DateTime<Tz>, rng: &mut R) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
    R: Rng,
{
    match output_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) if has_image_extension(name) => name.to_string(),
        Some(name) => format!("{name}.png"),
        None => {
            let ts = now.format("%Y%m%d_%H%M%S");
            let suffix: u16 = rng.gen_range(1000..=9999);
            format!("qrimg_{ts}_{suffix}.png")
        }
    }
}

/// Name of the n-th (1-based) non-blank line of a batch run.
pub fn batch_name(index: usize) -> String {
    format!("batch_qr_{index}.png")
}

fn has_image_extension(name: &str) -> bool {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return false;
    };
    IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known))
}
