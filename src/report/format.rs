//! Terminal formatting for generation outcomes.
//!
//! Kept in one place so front-ends (flags, batch, interactive) print the same thing.

use crate::domain::{BatchReport, CanonicalConfig, GenerationResult};

const PREVIEW_CHARS: usize = 30;

/// One-line outcome of a single generation.
pub fn format_result(result: &GenerationResult) -> String {
    if result.succeeded {
        format!("QR Code generated successfully: {}", result.output_path.display())
    } else {
        format!(
            "Error: {}",
            result.error_detail.as_deref().unwrap_or("QR code generation failed")
        )
    }
}

/// Settings line printed before a batch run starts.
pub fn format_config(config: &CanonicalConfig) -> String {
    format!(
        "version={}{} | ec={} ({}%) | border={} | box={}px | fill={} | background={}",
        config.version,
        if config.fit { "+" } else { "" },
        config.error_correction.letter(),
        config.error_correction.recovery_percent(),
        config.border,
        config.box_size,
        config.fill_color,
        config.back_color,
    )
}

/// Per-line status followed by the final tally.
pub fn format_batch_summary(report: &BatchReport) -> String {
    let mut out = String::new();

    for item in &report.items {
        let data = truncate(&item.source_line, PREVIEW_CHARS);
        if item.result.succeeded {
            out.push_str(&format!(
                "Generated: {} - Data: {data}\n",
                item.result.output_path.display()
            ));
        } else {
            out.push_str(&format!(
                "Failed (line {}): {} - Data: {data}\n",
                item.line_number,
                item.result.error_detail.as_deref().unwrap_or("unknown error"),
            ));
        }
    }

    out.push_str(&format!(
        "Batch processing completed: {}/{} succeeded",
        report.success_count, report.total_count
    ));
    let failed: Vec<String> = report.failures().map(|item| item.line_number.to_string()).collect();
    if !failed.is_empty() {
        out.push_str(&format!(" ({} failed)", failed.len()));
        out.push_str(&format!("\nFailed lines: {}", failed.join(", ")));
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push_str("...");
    out
}
