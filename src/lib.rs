//! synthtraffic - synthetic per-user web traffic traces
//!
//! Generates a population of users whose hourly traffic follows statistical
//! models fitted to a measured dataset, and writes one timestamped request
//! trace per user.
//!
//! # Architecture
//!
//! - **Distributions**: shifted Weibull, Gamma and log-normal samplers plus a
//!   mean/size negative binomial, all driven by an explicit seeded RNG
//! - **Model**: six user classes (heavy/medium/light, frequent/occasional) and
//!   a catalog mapping (class, hour, quantity) to a distribution
//! - **Generator**: per-hour resample-then-trim arrivals and class assignment
//!   for a whole population
//! - **Worker pool**: one independent unit of work per user on a rayon pool
//! - **Output**: `<users_dir>/<synthetic_dir>/<uid>.dat` traces and a run
//!   summary (text or JSON)

pub mod config;
pub mod distribution;
pub mod generator;
pub mod logging;
pub mod model;
pub mod output;
pub mod stats;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use generator::{Population, User};
pub use model::{TrafficModel, UserClass};

/// Result type used throughout synthtraffic
pub type Result<T> = anyhow::Result<T>;
