//! `qrgen` library crate.
//!
//! The binary (`qrgen`) is a thin wrapper around this library so that:
//!
//! - the generation pipeline is testable without spawning processes
//! - other front-ends can reuse it (normalize -> name -> encode -> report)

pub mod app;
pub mod cli;
pub mod domain;
pub mod encode;
pub mod error;
pub mod io;
pub mod logging;
pub mod naming;
pub mod params;
pub mod report;
