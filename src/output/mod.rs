//! Output
//!
//! - [`trace`]: per-user trace files, the product of a run
//! - [`text`]: console summary
//! - [`json`]: machine-readable run summary

pub mod json;
pub mod text;
pub mod trace;

pub use trace::{TraceError, TraceWriter};
