//! Shifted Weibull distribution
//!
//! `X = location + W` where `W ~ Weibull(shape, scale)`. Used for whole-hour
//! byte volumes of every class, and for inter-arrival times of light users.
//!
//! # Example
//!
//! ```
//! use synthtraffic::distribution::{seeded_rng, Distribution, weibull::WeibullDistribution};
//!
//! let dist = WeibullDistribution::new(1.2, 828.0, 1.0).unwrap();
//! let iat = dist.sample(&mut seeded_rng(3));
//! assert!(iat >= 1.0);
//! ```

use super::{Distribution, ParameterError, SimRng};
use rand_distr::{Distribution as _, Weibull};

/// Weibull distribution with a location shift
#[derive(Debug, Clone)]
pub struct WeibullDistribution {
    shape: f64,
    scale: f64,
    location: f64,
    inner: Weibull<f64>,
}

impl WeibullDistribution {
    /// Create a shifted Weibull distribution
    ///
    /// Fails if `shape` or `scale` is not strictly positive or the location
    /// is not finite.
    pub fn new(shape: f64, scale: f64, location: f64) -> Result<Self, ParameterError> {
        if !location.is_finite() {
            return Err(ParameterError::new("Weibull", format!("location {} is not finite", location)));
        }
        let inner = Weibull::new(scale, shape).map_err(|e| ParameterError::new("Weibull", e))?;

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

impl Distribution for WeibullDistribution {
    fn name(&self) -> &'static str {
        "Weibull"
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
    fn test_weibull_respects_location() {
        let dist = WeibullDistribution::new(0.82, 774_639.6, 40.0).unwrap();
        let mut rng = seeded_rng(42);

        for _ in 0..1000 {
            assert!(dist.sample(&mut rng) >= 40.0);
        }
    }

    #[test]
    fn test_weibull_seeded() {
        let dist = WeibullDistribution::new(1.0, 10.0, 0.0).unwrap();
        let mut a = seeded_rng(12345);
        let mut b = seeded_rng(12345);

        for _ in 0..10 {
            assert_eq!(dist.sample(&mut a), dist.sample(&mut b));
        }
    }

    #[test]
    fn test_weibull_shape_one_mean() {
        // shape 1 is exponential with mean == scale
        let dist = WeibullDistribution::new(1.0, 100.0, 5.0).unwrap();
        let mut rng = seeded_rng(7);
        let n = 50_000;
        let mean = dist.sample_n(&mut rng, n).iter().sum::<f64>() / n as f64;

        assert!((mean - 105.0).abs() < 3.0, "mean {} too far from 105", mean);
    }

    #[test]
    fn test_weibull_invalid_parameters() {
        assert!(WeibullDistribution::new(0.0, 10.0, 0.0).is_err());
        assert!(WeibullDistribution::new(1.0, -1.0, 0.0).is_err());
        assert!(WeibullDistribution::new(1.0, 1.0, f64::NAN).is_err());
    }
}
