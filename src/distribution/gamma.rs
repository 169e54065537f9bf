//! Shifted Gamma distribution
//!
//! `X = location + G` where `G ~ Gamma(shape, 1 / rate)`. The catalog stores
//! Gamma parameters as (shape, rate) because that is how they were fitted;
//! the scale handed to the sampler is the reciprocal of the rate.

use super::{Distribution, ParameterError, SimRng};
use rand_distr::{Distribution as _, Gamma};

/// Gamma distribution with a location shift, parameterized by rate
#[derive(Debug, Clone)]
pub struct GammaDistribution {
    shape: f64,
    rate: f64,
    location: f64,
    inner: Gamma<f64>,
}

impl GammaDistribution {
    /// Create a shifted Gamma distribution from shape and rate
    pub fn new(shape: f64, rate: f64, location: f64) -> Result<Self, ParameterError> {
        if !(rate > 0.0) || !rate.is_finite() {
            return Err(ParameterError::new("Gamma", format!("rate must be positive, got {}", rate)));
        }
        if !location.is_finite() {
            return Err(ParameterError::new("Gamma", format!("location {} is not finite", location)));
        }
        let inner = Gamma::new(shape, 1.0 / rate).map_err(|e| ParameterError::new("Gamma", e))?;

        Ok(Self {
            shape,
            rate,
            location,
            inner,
        })
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn location(&self) -> f64 {
        self.location
    }
}

impl Distribution for GammaDistribution {
    fn name(&self) -> &'static str {
        "Gamma"
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
    fn test_gamma_mean() {
        // mean = location + shape / rate = 1 + 2 / 0.01 = 201
        let dist = GammaDistribution::new(2.0, 0.01, 1.0).unwrap();
        let mut rng = seeded_rng(11);
        let n = 50_000;
        let mean = dist.sample_n(&mut rng, n).iter().sum::<f64>() / n as f64;

        assert!((mean - 201.0).abs() < 4.0, "mean {} too far from 201", mean);
    }

    #[test]
    fn test_gamma_small_shape_stays_above_location() {
        let dist = GammaDistribution::new(0.7078, 0.001355, 1.0).unwrap();
        let mut rng = seeded_rng(3);

        for _ in 0..1000 {
            assert!(dist.sample(&mut rng) >= 1.0);
        }
    }

    #[test]
    fn test_gamma_invalid_parameters() {
        assert!(GammaDistribution::new(1.0, 0.0, 0.0).is_err());
        assert!(GammaDistribution::new(-1.0, 1.0, 0.0).is_err());
        assert!(GammaDistribution::new(1.0, f64::INFINITY, 0.0).is_err());
    }
}
