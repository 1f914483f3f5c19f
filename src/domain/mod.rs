//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - request/parameter types as they arrive from a front-end (`GenerationRequest`)
//! - the validated configuration consumed by the encoder (`CanonicalConfig`)
//! - per-item and batch outcomes (`GenerationResult`, `BatchReport`)

pub mod types;

pub use types::*;
