//! Run aggregation
//!
//! Folds per-user outcomes into a single [`RunSummary`]: how many users
//! succeeded or failed, how many of each class were generated, and the merged
//! generation counters.
//!
//! # Example
//!
//! ```
//! use synthtraffic::model::UserClass;
//! use synthtraffic::stats::{aggregator::RunAggregator, GenerationStats};
//!
//! let mut aggregator = RunAggregator::new();
//! aggregator.add_success(UserClass::MO, &GenerationStats::default());
//! aggregator.add_failure(1, None, "The user class ZZ does not exist".into());
//!
//! let summary = aggregator.finish(std::time::Duration::from_millis(5));
//! assert_eq!(summary.succeeded, 1);
//! assert_eq!(summary.failed, 1);
//! assert!(!summary.is_success());
//! ```

use crate::model::UserClass;
use crate::stats::GenerationStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// One user that could not be generated or written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFailure {
    pub uid: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<UserClass>,
    pub error: String,
}

/// Result of a whole population run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub users: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Successful users per class label
    pub per_class: BTreeMap<String, usize>,
    pub totals: GenerationStats,
    pub failures: Vec<UserFailure>,
    pub elapsed_secs: f64,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Accumulates per-user outcomes
#[derive(Debug, Default)]
pub struct RunAggregator {
    succeeded: usize,
    per_class: BTreeMap<String, usize>,
    totals: GenerationStats,
    failures: Vec<UserFailure>,
}

impl RunAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_success(&mut self, class: UserClass, stats: &GenerationStats) {
        self.succeeded += 1;
        *self.per_class.entry(class.to_string()).or_insert(0) += 1;
        self.totals.merge(stats);
    }

    pub fn add_failure(&mut self, uid: u64, class: Option<UserClass>, error: String) {
        self.failures.push(UserFailure { uid, class, error });
    }

    pub fn finish(mut self, elapsed: Duration) -> RunSummary {
        self.failures.sort_by_key(|f| f.uid);
        let failed = self.failures.len();

        RunSummary {
            users: self.succeeded + failed,
            succeeded: self.succeeded,
            failed,
            per_class: self.per_class,
            totals: self.totals,
            failures: self.failures,
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }
}
