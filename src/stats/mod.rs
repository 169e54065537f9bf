//! Generation statistics
//!
//! Counters describing what the synthesis algorithm did for one user, and how
//! they add up over a run. The most important one is `exhausted_hours`: the
//! number of hours whose inter-arrival resampling hit the attempt cap and had
//! to fall back to trimming requests off the end of the hour.
//!
//! # Example
//!
//! ```
//! use synthtraffic::stats::GenerationStats;
//!
//! let mut total = GenerationStats::default();
//! let mut user = GenerationStats::default();
//! user.record_hour(12, 1500.0, 3, 0, false);
//! total.merge(&user);
//! assert_eq!(total.requests, 12);
//! ```

pub mod aggregator;

use serde::{Deserialize, Serialize};

/// Counters for one user, or merged over many
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Hours that produced at least one request
    pub active_hours: u32,
    /// Requests emitted
    pub requests: u64,
    /// Bytes emitted
    pub bytes: f64,
    /// Inter-arrival vectors redrawn because they overflowed the hour
    pub resample_draws: u64,
    /// Hours where resampling gave up and trimming took over
    pub exhausted_hours: u32,
    /// Requests dropped off the end of an hour
    pub trimmed_requests: u64,
}

impl GenerationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one generated hour
    pub fn record_hour(&mut self, requests: usize, bytes: f64, resample_draws: u64, trimmed: usize, exhausted: bool) {
        if requests > 0 {
            self.active_hours += 1;
        }
        self.requests += requests as u64;
        self.bytes += bytes;
        self.resample_draws += resample_draws;
        self.trimmed_requests += trimmed as u64;
        if exhausted {
            self.exhausted_hours += 1;
        }
    }

    /// Add another set of counters into this one
    pub fn merge(&mut self, other: &GenerationStats) {
        self.active_hours += other.active_hours;
        self.requests += other.requests;
        self.bytes += other.bytes;
        self.resample_draws += other.resample_draws;
        self.exhausted_hours += other.exhausted_hours;
        self.trimmed_requests += other.trimmed_requests;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_hour() {
        let mut stats = GenerationStats::new();
        stats.record_hour(0, 0.0, 0, 0, false);
        stats.record_hour(4, 100.0, 7, 2, true);

        assert_eq!(stats.active_hours, 1);
        assert_eq!(stats.requests, 4);
        assert_eq!(stats.bytes, 100.0);
        assert_eq!(stats.resample_draws, 7);
        assert_eq!(stats.trimmed_requests, 2);
        assert_eq!(stats.exhausted_hours, 1);
    }

    #[test]
    fn test_trimmed_to_zero_is_not_active() {
        let mut stats = GenerationStats::new();
        stats.record_hour(0, 0.0, 0, 1, false);

        assert_eq!(stats.active_hours, 0);
        assert_eq!(stats.trimmed_requests, 1);
    }

    #[test]
    fn test_merge() {
        let mut a = GenerationStats::new();
        a.record_hour(2, 10.0, 0, 0, false);
        let mut b = GenerationStats::new();
        b.record_hour(3, 5.0, 100, 1, true);

        a.merge(&b);

        assert_eq!(a.active_hours, 2);
        assert_eq!(a.requests, 5);
        assert_eq!(a.bytes, 15.0);
        assert_eq!(a.resample_draws, 100);
        assert_eq!(a.exhausted_hours, 1);
        assert_eq!(a.trimmed_requests, 1);
    }
}
