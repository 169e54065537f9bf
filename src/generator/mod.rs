//! Traffic generation
//!
//! - [`user`]: the per-user, per-hour synthesis algorithm
//! - [`population`]: class assignment and the lazy sequence of users

pub mod population;
pub mod user;

pub use population::{ClassChoice, Population, UserJob};
pub use user::{GenerationPolicy, HourTrace, Request, User};
