//! Input/output helpers.
//!
//! - batch source reading (`batch`)
//! - atomic image writes (`image`)
//! - report exports (JSON/CSV) (`export`)

pub mod batch;
pub mod export;
pub mod image;

pub use batch::*;
pub use export::*;
