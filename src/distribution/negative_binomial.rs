//! Negative binomial distribution, mean/size parameterization
//!
//! The catalog stores request-count distributions as `(size, mean)`, the
//! dispersion form common in ecology, rather than the native
//! `(size, probability)`. The two are related by
//! `probability = size / (size + mean)`.
//!
//! Sampling uses the Gamma-Poisson mixture: draw
//! `lambda ~ Gamma(size, mean / size)` and return `Poisson(lambda)`. This works
//! for the non-integer sizes found in the catalog.
//!
//! # Example
//!
//! ```
//! use synthtraffic::distribution::negative_binomial::NegativeBinomialDistribution;
//!
//! let dist = NegativeBinomialDistribution::new(1.0, 1.0).unwrap();
//! assert_eq!(dist.probability(), 0.5);
//! ```

use super::{Distribution, ParameterError, SimRng};
use rand_distr::{Distribution as _, Gamma, Poisson};

/// Convert the mean/size parameterization to the success probability
#[inline]
pub fn probability_from_mean(size: f64, mean: f64) -> f64 {
    size / (size + mean)
}

/// Negative binomial over non-negative integer counts
#[derive(Debug, Clone)]
pub struct NegativeBinomialDistribution {
    size: f64,
    mean: f64,
    probability: f64,
    /// `None` when the mean is zero, in which case every draw is 0
    mixing: Option<Gamma<f64>>,
}

impl NegativeBinomialDistribution {
    /// Create from dispersion `size` and `mean`
    pub fn new(size: f64, mean: f64) -> Result<Self, ParameterError> {
        if !(size > 0.0) || !size.is_finite() {
            return Err(ParameterError::new("NegativeBinomial", format!("size must be positive, got {}", size)));
        }
        if !(mean >= 0.0) || !mean.is_finite() {
            return Err(ParameterError::new("NegativeBinomial", format!("mean must be non-negative, got {}", mean)));
        }

        let mixing = if mean > 0.0 {
            Some(Gamma::new(size, mean / size).map_err(|e| ParameterError::new("NegativeBinomial", e))?)
        } else {
            None
        };

        Ok(Self {
            size,
            mean,
            probability: probability_from_mean(size, mean),
            mixing,
        })
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Success probability of the native parameterization
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Draw one count
    pub fn sample_count(&self, rng: &mut SimRng) -> u64 {
        let Some(mixing) = &self.mixing else {
            return 0;
        };

        let lambda = mixing.sample(rng);
        // Tiny shapes can underflow the mixing draw to zero
        if !(lambda > 0.0) || !lambda.is_finite() {
            return 0;
        }

        match Poisson::new(lambda) {
            Ok(poisson) => {
                let k: f64 = poisson.sample(rng);
                k as u64
            }
            Err(_) => 0,
        }
    }
}

impl Distribution for NegativeBinomialDistribution {
    fn name(&self) -> &'static str {
        "NegativeBinomial"
    }

    fn sample(&self, rng: &mut SimRng) -> f64 {
        self.sample_count(rng) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::seeded_rng;

    #[test]
    fn test_probability_size_one_mean_one() {
        assert_eq!(probability_from_mean(1.0, 1.0), 0.5);
        let dist = NegativeBinomialDistribution::new(1.0, 1.0).unwrap();
        assert_eq!(dist.probability(), 0.5);
    }

    #[test]
    fn test_probability_recomputed_per_pair() {
        let dist = NegativeBinomialDistribution::new(0.470368548315641, 34.7861725808564).unwrap();
        let expected = 0.470368548315641 / (0.470368548315641 + 34.7861725808564);
        assert_eq!(dist.probability(), expected);
    }

    #[test]
    fn test_sample_mean_converges() {
        let dist = NegativeBinomialDistribution::new(0.75, 4.8).unwrap();
        let mut rng = seeded_rng(8);
        let n = 100_000;
        let total: u64 = (0..n).map(|_| dist.sample_count(&mut rng)).sum();
        let mean = total as f64 / n as f64;

        assert!((mean - 4.8).abs() < 0.15, "mean {} too far from 4.8", mean);
    }

    #[test]
    fn test_zero_mean_always_zero() {
        let dist = NegativeBinomialDistribution::new(0.5, 0.0).unwrap();
        let mut rng = seeded_rng(1);

        for _ in 0..100 {
            assert_eq!(dist.sample_count(&mut rng), 0);
        }
    }

    #[test]
    fn test_tiny_size_mostly_zero() {
        // LO off-peak count parameters: almost every hour is silent
        let dist = NegativeBinomialDistribution::new(0.0810585648991726, 0.0405013083716073).unwrap();
        let mut rng = seeded_rng(2);
        let zeros = (0..10_000).filter(|_| dist.sample_count(&mut rng) == 0).count();

        assert!(zeros > 9_000);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(NegativeBinomialDistribution::new(0.0, 1.0).is_err());
        assert!(NegativeBinomialDistribution::new(1.0, -1.0).is_err());
    }
}
