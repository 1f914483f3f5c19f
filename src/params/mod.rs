//! Parameter normalization.
//!
//! Turns loosely-typed front-end input into a `CanonicalConfig`. The same policy is
//! applied whether the request came from flags, a batch file, or interactive answers.

use tracing::warn;

use crate::domain::{
    CanonicalConfig, DEFAULT_SIZE, EcTier, GenerationParams, GenerationRequest, MAX_VERSION, MIN_VERSION,
    NormalizedRequest, ValidationPolicy,
};
use crate::error::ValidationError;

/// Validate a full request (payload + parameters).
pub fn normalize(request: &GenerationRequest, policy: ValidationPolicy) -> Result<NormalizedRequest, ValidationError> {
    let payload = request.payload.trim();
    if payload.is_empty() {
        return Err(ValidationError::EmptyPayload);
    }

    let config = normalize_params(&request.params, policy)?;

    Ok(NormalizedRequest {
        payload: payload.to_string(),
        output_name: request.output_name.clone(),
        config,
    })
}

/// Validate rendering parameters on their own (used once per batch run).
pub fn normalize_params(params: &GenerationParams, policy: ValidationPolicy) -> Result<CanonicalConfig, ValidationError> {
    let version = resolve_size(params.size, policy)?;

    if params.border < 0 {
        return Err(ValidationError::InvalidBorder(params.border));
    }
    let border = u32::try_from(params.border).map_err(|_| ValidationError::InvalidBorder(params.border))?;

    if params.box_size < 1 {
        return Err(ValidationError::InvalidBoxSize(params.box_size));
    }
    let box_size = u32::try_from(params.box_size).map_err(|_| ValidationError::InvalidBoxSize(params.box_size))?;

    let error_correction = resolve_error_correction(&params.error_correction, policy)?;
    let fill_color = require_color(&params.fill_color, "fill")?;
    let back_color = require_color(&params.back_color, "background")?;

    Ok(CanonicalConfig {
        version,
        border,
        fill_color,
        back_color,
        error_correction,
        box_size,
        fit: params.fit,
    })
}

fn resolve_size(size: i64, policy: ValidationPolicy) -> Result<u8, ValidationError> {
    let size = if (MIN_VERSION..=MAX_VERSION).contains(&size) {
        size
    } else {
        match policy {
            ValidationPolicy::Standard | ValidationPolicy::Strict => return Err(ValidationError::InvalidSize(size)),
            ValidationPolicy::Lenient => {
                warn!(size, default = DEFAULT_SIZE, "size out of range, using default");
                DEFAULT_SIZE
            }
        }
    };
    u8::try_from(size).map_err(|_| ValidationError::InvalidSize(size))
}

fn resolve_error_correction(key: &str, policy: ValidationPolicy) -> Result<EcTier, ValidationError> {
    // An empty answer always means "default".
    if key.trim().is_empty() {
        return Ok(EcTier::H);
    }
    match (EcTier::from_key(key), policy) {
        (Some(tier), _) => Ok(tier),
        (None, ValidationPolicy::Strict) => Err(ValidationError::InvalidErrorCorrection(key.trim().to_string())),
        (None, ValidationPolicy::Standard | ValidationPolicy::Lenient) => {
            warn!(key, "unrecognized error correction level, using H");
            Ok(EcTier::H)
        }
    }
}

fn require_color(value: &str, which: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::EmptyColor(which));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(size: i64, border: i64) -> GenerationParams {
        GenerationParams {
            size,
            border,
            ..GenerationParams::default()
        }
    }

    fn request(payload: &str) -> GenerationRequest {
        GenerationRequest {
            payload: payload.to_string(),
            output_name: None,
            params: GenerationParams::default(),
        }
    }

    #[test]
    fn valid_size_and_border_pass_through_unchanged() {
        for policy in [ValidationPolicy::Standard, ValidationPolicy::Strict, ValidationPolicy::Lenient] {
            for size in 1..=40 {
                for border in [0, 1, 4, 17] {
                    let cfg = normalize_params(&params(size, border), policy).unwrap();
                    assert_eq!(i64::from(cfg.version), size);
                    assert_eq!(i64::from(cfg.border), border);
                }
            }
        }
    }

    #[test]
    fn standard_and_strict_reject_out_of_range_size() {
        for policy in [ValidationPolicy::Standard, ValidationPolicy::Strict] {
            for size in [0, 41, -3] {
                let err = normalize_params(&params(size, 4), policy).unwrap_err();
                assert_eq!(err, ValidationError::InvalidSize(size));
            }
        }
    }

    #[test]
    fn lenient_clamps_out_of_range_size_to_default() {
        for size in [0, 41] {
            let cfg = normalize_params(&params(size, 4), ValidationPolicy::Lenient).unwrap();
            assert_eq!(cfg.version, 10);
        }
    }

    #[test]
    fn negative_border_is_rejected_under_every_policy() {
        for policy in [ValidationPolicy::Standard, ValidationPolicy::Strict, ValidationPolicy::Lenient] {
            let err = normalize_params(&params(10, -1), policy).unwrap_err();
            assert_eq!(err, ValidationError::InvalidBorder(-1));
        }
    }

    #[test]
    fn error_correction_key_handling() {
        let mut p = GenerationParams::default();

        p.error_correction = "m".to_string();
        assert_eq!(normalize_params(&p, ValidationPolicy::Strict).unwrap().error_correction, EcTier::M);

        p.error_correction = String::new();
        assert_eq!(normalize_params(&p, ValidationPolicy::Strict).unwrap().error_correction, EcTier::H);

        p.error_correction = "Z".to_string();
        assert_eq!(
            normalize_params(&p, ValidationPolicy::Strict).unwrap_err(),
            ValidationError::InvalidErrorCorrection("Z".to_string())
        );
        assert_eq!(normalize_params(&p, ValidationPolicy::Lenient).unwrap().error_correction, EcTier::H);
    }

    #[test]
    fn default_policy_falls_back_to_h_for_unknown_error_correction() {
        let p = GenerationParams {
            error_correction: "x".to_string(),
            ..GenerationParams::default()
        };
        assert_eq!(ValidationPolicy::default(), ValidationPolicy::Standard);
        let cfg = normalize_params(&p, ValidationPolicy::default()).unwrap();
        assert_eq!(cfg.error_correction, EcTier::H);
    }

    #[test]
    fn colors_are_opaque_but_required() {
        let mut p = GenerationParams::default();
        p.fill_color = " #1A2B3C ".to_string();
        p.back_color = "papayawhip".to_string();
        let cfg = normalize_params(&p, ValidationPolicy::Strict).unwrap();
        assert_eq!(cfg.fill_color, "#1A2B3C");
        assert_eq!(cfg.back_color, "papayawhip");

        p.back_color = "  ".to_string();
        assert_eq!(
            normalize_params(&p, ValidationPolicy::Strict).unwrap_err(),
            ValidationError::EmptyColor("background")
        );
    }

    #[test]
    fn box_size_must_be_positive() {
        let mut p = GenerationParams::default();
        p.box_size = 0;
        assert_eq!(
            normalize_params(&p, ValidationPolicy::Lenient).unwrap_err(),
            ValidationError::InvalidBoxSize(0)
        );
    }

    #[test]
    fn payload_is_trimmed_and_required() {
        assert_eq!(normalize(&request("   "), ValidationPolicy::Lenient).unwrap_err(), ValidationError::EmptyPayload);

        let n = normalize(&request("  https://a.example \n"), ValidationPolicy::Strict).unwrap();
        assert_eq!(n.payload, "https://a.example");
        assert_eq!(n.config.error_correction, EcTier::H);
    }
}
