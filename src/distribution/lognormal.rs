//! Shifted log-normal distribution
//!
//! `X = location + scale * exp(shape * Z)` with `Z` standard normal, i.e. the
//! underlying normal has `mu = ln(scale)` and `sigma = shape`.

use super::{Distribution, ParameterError, SimRng};
use rand_distr::{Distribution as _, LogNormal};

/// Log-normal distribution with a location shift
#[derive(Debug, Clone)]
pub struct LogNormalDistribution {
    shape: f64,
    scale: f64,
    location: f64,
    inner: LogNormal<f64>,
}

impl LogNormalDistribution {
    /// Create a shifted log-normal distribution
    ///
    /// `shape` is the standard deviation of the underlying normal, `scale` is
    /// `exp(mu)`.
    pub fn new(shape: f64, scale: f64, location: f64) -> Result<Self, ParameterError> {
        if !(scale > 0.0) || !scale.is_finite() {
            return Err(ParameterError::new("LogNormal", format!("scale must be positive, got {}", scale)));
        }
        if !(shape >= 0.0) || !shape.is_finite() {
            return Err(ParameterError::new("LogNormal", format!("shape must be non-negative, got {}", shape)));
        }
        if !location.is_finite() {
            return Err(ParameterError::new("LogNormal", format!("location {} is not finite", location)));
        }
        let inner = LogNormal::new(scale.ln(), shape).map_err(|e| ParameterError::new("LogNormal", e))?;

        Ok(Self {
            shape,
            scale,
            location,
            inner,
        })
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn location(&self) -> f64 {
        self.location
    }
}

impl Distribution for LogNormalDistribution {
    fn name(&self) -> &'static str {
        "LogNormal"
    }

    #[inline]
    fn sample(&self, rng: &mut SimRng) -> f64 {
        self.location + self.inner.sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::seeded_rng;

    #[test]
    fn test_lognormal_median() {
        // median of scale * exp(shape * Z) is scale
        let dist = LogNormalDistribution::new(3.9374, 0.9822, 3.0).unwrap();
        let mut rng = seeded_rng(21);
        let mut samples = dist.sample_n(&mut rng, 20_001);
        samples.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let median = samples[samples.len() / 2];

        assert!((median - 3.9822).abs() < 0.3, "median {} too far from 3.98", median);
    }

    #[test]
    fn test_lognormal_zero_shape_is_constant() {
        let dist = LogNormalDistribution::new(0.0, 2.0, 1.0).unwrap();
        let mut rng = seeded_rng(0);

        for _ in 0..10 {
            assert!((dist.sample(&mut rng) - 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_lognormal_invalid_parameters() {
        assert!(LogNormalDistribution::new(1.0, 0.0, 0.0).is_err());
        assert!(LogNormalDistribution::new(-0.5, 1.0, 0.0).is_err());
    }
}
