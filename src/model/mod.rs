//! Traffic model
//!
//! The model layer turns the measured dataset into sampleable distributions:
//!
//! - [`class`]: the six behavioral user classes and the hour type
//! - [`catalog`]: constant distribution parameters and peak-hour lists
//! - [`selector`]: catalog lookup producing ready-to-sample distributions
//! - [`traffic`]: the three distributions that drive one (class, hour)

pub mod catalog;
pub mod class;
pub mod selector;
pub mod traffic;

pub use class::{Hour, QuantityKind, UserClass};
pub use traffic::TrafficModel;

use crate::distribution::ParameterError;
use thiserror::Error;

/// Errors raised while building a user's traffic model
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Label outside `HF, HO, MF, MO, LF, LO`
    #[error("The user class {0} does not exist")]
    UnknownClass(String),

    /// Hour outside 1..=23
    #[error("hour {0} is outside the modeled range 1-23")]
    InvalidHour(u32),

    #[error(transparent)]
    InvalidParameters(#[from] ParameterError),
}
