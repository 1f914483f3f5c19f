//! Shared generation pipeline used by every front-end (flags, batch, interactive).
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! normalize -> name -> encode/render/write -> report
//!
//! Front-ends then only decide where requests come from and how results are printed.

use std::path::Path;

use tracing::{info, info_span, warn};

use crate::domain::{BatchReport, CanonicalConfig, GenerationRequest, GenerationResult, ValidationPolicy};
use crate::encode::{SymbolEncoder, encode};
use crate::error::ValidationError;
use crate::naming::{batch_name, resolve_name};
use crate::params::normalize;

/// Generate one code from a raw request.
///
/// Validation failures are returned as errors (nothing is written); failures after
/// validation are reported in the `GenerationResult`.
pub fn generate_one(
    encoder: &dyn SymbolEncoder,
    request: &GenerationRequest,
    policy: ValidationPolicy,
    out_dir: &Path,
) -> Result<GenerationResult, ValidationError> {
    let normalized = normalize(request, policy)?;
    let name = resolve_name(normalized.output_name.as_deref());
    let path = out_dir.join(name);
    Ok(encode(encoder, &normalized.payload, &normalized.config, &path))
}

/// Encode every non-blank line with a shared configuration.
///
/// Outputs are named `batch_qr_<n>.png`, where `n` counts non-blank lines from 1.
/// A failing line is recorded and the run moves on to the next one.
pub fn run_batch(
    encoder: &dyn SymbolEncoder,
    lines: &[String],
    config: &CanonicalConfig,
    out_dir: &Path,
) -> BatchReport {
    let span = info_span!("batch", lines = lines.len(), out_dir = %out_dir.display());
    let _enter = span.enter();

    let mut report = BatchReport::new();
    let payloads = lines
        .iter()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, payload)| !payload.is_empty());

    for (index, (line_number, payload)) in payloads.enumerate() {
        let path = out_dir.join(batch_name(index + 1));
        let result = encode(encoder, payload, config, &path);
        if !result.succeeded {
            warn!(line = line_number, "batch item failed");
        }
        report.push(line_number, payload, result);
    }

    info!(
        total = report.total_count,
        succeeded = report.success_count,
        "batch finished"
    );
    report
}

/// Number of lines a batch run will actually process.
pub fn count_payload_lines(lines: &[String]) -> usize {
    lines.iter().filter(|line| !line.trim().is_empty()).count()
}
