//! Sampling distributions for synthetic traffic
//!
//! This module provides the four distribution families the traffic catalog is
//! built from. Every family carries a location shift so that sampled values
//! never fall below the smallest value observed in the measured dataset.
//!
//! # Distributions
//!
//! - **Weibull**: per-hour byte volume, inter-arrival times for LF/LO
//! - **Gamma**: inter-arrival times (rate parameterization)
//! - **LogNormal**: inter-arrival times for heavy, frequent users
//! - **NegativeBinomial**: per-hour request counts (mean/size parameterization)
//!
//! # Randomness
//!
//! Distributions hold no RNG state. Every draw takes an explicit `&mut SimRng`
//! so the caller decides where a random stream begins. Per-user generation
//! creates its RNG with [`seeded_rng`] inside the unit of work, keyed by the
//! user id, which makes each user's stream reproducible regardless of which
//! thread runs it.
//!
//! # Example
//!
//! ```
//! use synthtraffic::distribution::{seeded_rng, Distribution, weibull::WeibullDistribution};
//!
//! let dist = WeibullDistribution::new(0.8, 1000.0, 40.0).unwrap();
//! let mut rng = seeded_rng(7);
//! let volume = dist.sample(&mut rng);
//! assert!(volume >= 40.0);
//! ```

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::fmt;
use thiserror::Error;

/// Random number generator used for every draw in the crate
pub type SimRng = Xoshiro256PlusPlus;

/// Create a generator positioned at the start of the stream for `seed`
pub fn seeded_rng(seed: u64) -> SimRng {
    SimRng::seed_from_u64(seed)
}

/// Rejected distribution parameters
#[derive(Debug, Clone, Error)]
#[error("invalid {family} parameters: {reason}")]
pub struct ParameterError {
    pub family: &'static str,
    pub reason: String,
}

impl ParameterError {
    pub(crate) fn new(family: &'static str, reason: impl fmt::Display) -> Self {
        Self {
            family,
            reason: reason.to_string(),
        }
    }
}

/// Sampleable distribution
///
/// Every quantity of the traffic model (hourly volume, inter-arrival time,
/// request count) is drawn through this trait, so a traffic model can hold
/// its three distributions as `Box<dyn Distribution>` whatever their family.
///
/// # Randomness
///
/// Implementations hold parameters only. The caller passes the RNG to every
/// draw, which keeps a user's whole stream determined by where its RNG
/// started and not by which distributions were built before it.
///
/// # Thread Safety
///
/// Distributions are `Send + Sync` and immutable once built. Each user owns
/// its models, but nothing prevents sharing one instance by reference across
/// worker threads.
pub trait Distribution: Send + Sync + fmt::Debug {
    /// Family name, used in log messages
    fn name(&self) -> &'static str;

    /// Draw one sample
    ///
    /// # Arguments
    ///
    /// * `rng` - Stream to draw from; advanced by the draw
    ///
    /// # Returns
    ///
    /// One value in the support of the distribution, never below its
    /// location. Count distributions return whole numbers as `f64`.
    fn sample(&self, rng: &mut SimRng) -> f64;

    /// Draw `n` independent samples
    ///
    /// Consumes the stream exactly as `n` calls to [`Distribution::sample`]
    /// would.
    fn sample_n(&self, rng: &mut SimRng, n: usize) -> Vec<f64> {
        let mut out = Vec::with_capacity(n);
        self.sample_into(rng, n, &mut out);
        out
    }

    /// Replace the contents of `out` with `n` independent samples
    ///
    /// Lets hot loops reuse one allocation across redraws.
    fn sample_into(&self, rng: &mut SimRng, n: usize, out: &mut Vec<f64>) {
        out.clear();
        out.extend((0..n).map(|_| self.sample(rng)));
    }
}

pub mod gamma;
pub mod lognormal;
pub mod negative_binomial;
pub mod weibull;
