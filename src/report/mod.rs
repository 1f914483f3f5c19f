//! Generation reports: terminal formatting for single results and batch runs.
//!
//! The report types themselves live in `domain`; this module only presents them.

pub mod format;

pub use format::*;
