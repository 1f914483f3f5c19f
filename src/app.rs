//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging for the lifetime of the process
//! - picks the mode (batch, single, interactive)
//! - prints results and writes the optional batch report

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use crate::cli::Cli;
use crate::domain::{FailureKind, GenerationParams, GenerationRequest, GenerationResult, ValidationPolicy};
use crate::encode::QrCodeEncoder;
use crate::error::{AppError, EXIT_ENCODING, EXIT_IO};
use crate::logging::LogGuard;
use crate::params::normalize_params;

pub mod pipeline;

/// Per-process state, created once in [`run`] and passed down by reference.
pub struct Session {
    pub encoder: QrCodeEncoder,
    pub policy: ValidationPolicy,
    pub out_dir: PathBuf,
    _log: LogGuard,
}

/// Entry point for the `qrgen` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let argv = crate::cli::rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    let log = crate::logging::init(cli.log_file.as_deref())?;
    if let Some(path) = log.log_file() {
        info!(log_file = %path.display(), version = env!("CARGO_PKG_VERSION"), "qrgen session started");
    }
    fs::create_dir_all(&cli.out_dir).map_err(|e| {
        AppError::new(
            EXIT_IO,
            format!("Failed to create output directory '{}': {e}", cli.out_dir.display()),
        )
    })?;

    let session = Session {
        encoder: QrCodeEncoder,
        policy: cli.validation,
        out_dir: cli.out_dir.clone(),
        _log: log,
    };

    if cli.report.is_some() && cli.batch.is_none() {
        warn!("--report only applies to --batch runs; ignoring it");
    }

    if let Some(path) = &cli.batch {
        return handle_batch(&session, &cli, path);
    }
    if let Some(data) = &cli.data {
        let request = GenerationRequest {
            payload: data.clone(),
            output_name: cli.output.clone(),
            params: cli.params(),
        };
        return handle_single(&session, &request);
    }
    handle_interactive(&session, &cli.params())
}

fn handle_single(session: &Session, request: &GenerationRequest) -> Result<(), AppError> {
    let result = pipeline::generate_one(&session.encoder, request, session.policy, &session.out_dir)?;
    finish_single(&result)
}

fn finish_single(result: &GenerationResult) -> Result<(), AppError> {
    let line = crate::report::format_result(result);
    if result.succeeded {
        println!("{line}");
        return Ok(());
    }
    let exit_code = match result.failure {
        Some(FailureKind::Io) => EXIT_IO,
        _ => EXIT_ENCODING,
    };
    Err(AppError::new(exit_code, line))
}

fn handle_batch(session: &Session, cli: &Cli, path: &std::path::Path) -> Result<(), AppError> {
    let config = normalize_params(&cli.params(), session.policy)?;
    let lines = crate::io::read_batch_source(path)?;

    println!(
        "Processing {} QR codes in batch mode...",
        pipeline::count_payload_lines(&lines)
    );
    println!("{}", crate::report::format_config(&config));

    let report = pipeline::run_batch(&session.encoder, &lines, &config, &session.out_dir);
    println!("{}", crate::report::format_batch_summary(&report));

    if let Some(report_path) = &cli.report {
        crate::io::write_report(report_path, &report)?;
        println!("Report written: {}", report_path.display());
    }

    // Item failures are already in the summary; only an unreadable source fails the run.
    Ok(())
}

fn handle_interactive(session: &Session, base: &GenerationParams) -> Result<(), AppError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let Some(request) = crate::cli::prompt::prompt_for_request(&mut input, &mut output, base)? else {
        return Ok(());
    };

    let result = pipeline::generate_one(&session.encoder, &request, session.policy, &session.out_dir)?;
    if result.succeeded {
        println!();
    }
    finish_single(&result)
}
