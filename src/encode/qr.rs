//! `qrcode`-backed symbol encoder.

use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode, Version};

use super::{SymbolEncoder, SymbolMatrix};
use crate::domain::EcTier;
use crate::error::EncodeError;

const MAX_VERSION: u8 = 40;

/// Encoder backed by the `qrcode` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrCodeEncoder;

impl SymbolEncoder for QrCodeEncoder {
    fn encode_symbol(&self, payload: &str, tier: EcTier, version: u8, fit: bool) -> Result<SymbolMatrix, EncodeError> {
        let last = if fit { MAX_VERSION } else { version };
        for v in version..=last {
            match QrCode::with_version(payload.as_bytes(), Version::Normal(i16::from(v)), ec_level(tier)) {
                Ok(code) => return to_matrix(&code, v),
                Err(QrError::DataTooLong) => continue,
                Err(e) => return Err(EncodeError::Encoder(e.to_string())),
            }
        }
        Err(EncodeError::DataTooLong {
            version: last,
            tier: tier.letter(),
        })
    }
}

fn ec_level(tier: EcTier) -> EcLevel {
    match tier {
        EcTier::L => EcLevel::L,
        EcTier::M => EcLevel::M,
        EcTier::Q => EcLevel::Q,
        EcTier::H => EcLevel::H,
    }
}

fn to_matrix(code: &QrCode, version: u8) -> Result<SymbolMatrix, EncodeError> {
    let width = code.width();
    let modules = code.to_colors().into_iter().map(|c| c == Color::Dark).collect();
    SymbolMatrix::new(version, width, modules)
        .ok_or_else(|| EncodeError::Encoder(format!("encoder returned a malformed {width}x{width} matrix")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_width_follows_version() {
        for version in [1u8, 2, 10, 40] {
            let m = QrCodeEncoder.encode_symbol("hi", EcTier::L, version, false).unwrap();
            assert_eq!(m.version, version);
            assert_eq!(m.width(), usize::from(version) * 4 + 17);
        }
    }

    #[test]
    fn finder_pattern_corner_is_dark() {
        let m = QrCodeEncoder.encode_symbol("https://a.example", EcTier::H, 3, false).unwrap();
        assert!(m.is_dark(0, 0));
        assert!(m.is_dark(m.width() - 1, 0));
        assert!(m.is_dark(0, m.width() - 1));
        assert!(!m.is_dark(7, 7));
    }

    #[test]
    fn payload_too_long_for_fixed_version() {
        let long = "x".repeat(200);
        let err = QrCodeEncoder.encode_symbol(&long, EcTier::H, 1, false).unwrap_err();
        assert!(matches!(err, EncodeError::DataTooLong { version: 1, tier: 'H' }));
    }

    #[test]
    fn fit_grows_the_version() {
        let long = "x".repeat(200);
        let m = QrCodeEncoder.encode_symbol(&long, EcTier::H, 1, true).unwrap();
        assert!(m.version > 1);
        assert_eq!(m.width(), usize::from(m.version) * 4 + 17);
    }

    #[test]
    fn higher_tier_needs_more_room() {
        // Version 2 holds 32 bytes at L but only 14 at H.
        let payload = "y".repeat(30);
        assert!(QrCodeEncoder.encode_symbol(&payload, EcTier::L, 2, false).is_ok());
        assert!(QrCodeEncoder.encode_symbol(&payload, EcTier::H, 2, false).is_err());
    }
}
