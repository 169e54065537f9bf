//! Per-user worker pool
//!
//! Every user is an independent unit of work: resolve its class, create an
//! RNG seeded with its uid, build its traffic models, generate 23 hours and
//! write its trace. Units run on a bounded rayon pool and the caller gets one
//! [`UserOutcome`] per user once all of them have finished, so a failed user
//! is reported instead of lost.
//!
//! # Example
//!
//! ```no_run
//! use synthtraffic::generator::{GenerationPolicy, Population};
//! use synthtraffic::output::TraceWriter;
//! use synthtraffic::worker::{run_population, RunContext};
//! use chrono::NaiveDate;
//!
//! let ctx = RunContext {
//!     initial_date: NaiveDate::from_ymd_opt(2013, 8, 25).unwrap(),
//!     policy: GenerationPolicy::default(),
//!     writer: TraceWriter::new("users", "synthetic"),
//! };
//! let population = Population::new(10, 1234);
//!
//! let summary = run_population(&population, &ctx, 4)?;
//! println!("{} users generated", summary.succeeded);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::distribution::seeded_rng;
use crate::generator::{GenerationPolicy, Population, User, UserJob};
use crate::model::{self, UserClass};
use crate::output::trace::{TraceError, TraceWriter};
use crate::stats::aggregator::{RunAggregator, RunSummary};
use crate::stats::GenerationStats;
use anyhow::Context;
use chrono::NaiveDate;
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;

/// Shared, read-only inputs of every unit of work
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Simulated day
    pub initial_date: NaiveDate,
    pub policy: GenerationPolicy,
    pub writer: TraceWriter,
}

/// Why a user's unit of work failed
#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Model(#[from] model::Error),

    #[error(transparent)]
    Trace(#[from] TraceError),
}

/// A user that was generated and written
#[derive(Debug, Clone)]
pub struct UserReport {
    pub class: UserClass,
    pub path: PathBuf,
    pub stats: GenerationStats,
}

/// Result of one user's unit of work
#[derive(Debug)]
pub struct UserOutcome {
    pub uid: u64,
    /// Resolved class; `None` when the class label itself was rejected
    pub class: Option<UserClass>,
    pub result: Result<UserReport, UserError>,
}

/// Run one user's unit of work
pub fn run_user(job: &UserJob, ctx: &RunContext) -> UserOutcome {
    let class = match job.class.resolve() {
        Ok(class) => class,
        Err(e) => {
            return UserOutcome {
                uid: job.uid,
                class: None,
                result: Err(e.into()),
            }
        }
    };

    UserOutcome {
        uid: job.uid,
        class: Some(class),
        result: generate_and_write(job.uid, class, ctx),
    }
}

fn generate_and_write(uid: u64, class: UserClass, ctx: &RunContext) -> Result<UserReport, UserError> {
    let mut user = User::new(uid, class, ctx.initial_date)?;

    // Seeded inside the unit of work so the stream depends only on the uid
    let mut rng = seeded_rng(uid);
    let stats = user.generate(&mut rng, &ctx.policy).clone();

    let path = ctx.writer.write_user(&user)?;

    Ok(UserReport {
        class: user.class(),
        path,
        stats,
    })
}

/// Run every user of the population on a pool of `threads` workers
///
/// `threads == 0` sizes the pool to the number of CPUs. Returns the outcomes
/// ordered by uid once every unit has finished.
pub fn run_outcomes(population: &Population, ctx: &RunContext, threads: usize) -> crate::Result<Vec<UserOutcome>> {
    let threads = if threads == 0 { num_cpus::get() } else { threads };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("synth-worker-{}", i))
        .build()
        .context("Failed to create worker pool")?;

    ctx.writer
        .ensure_dir()
        .with_context(|| format!("Failed to prepare output directory {}", ctx.writer.dir().display()))?;

    log::info!(
        "Generating {} users on {} threads (seed {}) into {}",
        population.size(),
        threads,
        population.global_seed(),
        ctx.writer.dir().display()
    );

    let mut outcomes: Vec<UserOutcome> = pool.install(|| {
        population
            .jobs()
            .par_bridge()
            .map(|job| {
                let outcome = run_user(&job, ctx);
                if let Err(e) = &outcome.result {
                    log::error!("User {} failed: {}", outcome.uid, e);
                }
                outcome
            })
            .collect()
    });
    outcomes.sort_by_key(|outcome| outcome.uid);

    Ok(outcomes)
}

/// Run the population and fold the outcomes into a summary
pub fn run_population(population: &Population, ctx: &RunContext, threads: usize) -> crate::Result<RunSummary> {
    let start = Instant::now();
    let outcomes = run_outcomes(population, ctx, threads)?;
    let summary = summarize(&outcomes, start.elapsed());

    log::info!(
        "Generation complete: {} succeeded, {} failed, {} requests",
        summary.succeeded,
        summary.failed,
        summary.totals.requests
    );

    Ok(summary)
}

/// Fold outcomes into a run summary
pub fn summarize(outcomes: &[UserOutcome], elapsed: std::time::Duration) -> RunSummary {
    let mut aggregator = RunAggregator::new();
    for outcome in outcomes {
        match &outcome.result {
            Ok(report) => aggregator.add_success(report.class, &report.stats),
            Err(e) => aggregator.add_failure(outcome.uid, outcome.class, e.to_string()),
        }
    }
    aggregator.finish(elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> RunContext {
        RunContext {
            initial_date: NaiveDate::from_ymd_opt(2013, 8, 25).unwrap(),
            policy: GenerationPolicy {
                max_resample_attempts: 1_000,
            },
            writer: TraceWriter::new(dir.path().join("users"), "synthetic"),
        }
    }

    #[test]
    fn test_run_user_writes_trace() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(&tmp);
        let job = UserJob {
            uid: 3,
            class: crate::generator::ClassChoice::Drawn(UserClass::MF),
        };

        let outcome = run_user(&job, &ctx);

        let report = outcome.result.unwrap();
        assert_eq!(report.class, UserClass::MF);
        assert_eq!(report.path, ctx.writer.path_for(3));
        assert!(report.path.exists());
    }

    #[test]
    fn test_run_outcomes_joins_every_user() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(&tmp);
        let population = Population::new(12, 1234);

        let outcomes = run_outcomes(&population, &ctx, 3).unwrap();

        let uids: Vec<u64> = outcomes.iter().map(|o| o.uid).collect();
        assert_eq!(uids, (0..12).collect::<Vec<_>>());
        for uid in 0..12 {
            assert!(ctx.writer.path_for(uid).exists(), "missing trace for {}", uid);
        }
    }

    #[test]
    fn test_unknown_class_fails_only_that_user() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(&tmp);
        let mut overrides = BTreeMap::new();
        overrides.insert(2, "ZZ".to_string());
        let population = Population::new(4, 1234).with_overrides(overrides);

        let summary = run_population(&population, &ctx, 2).unwrap();

        assert_eq!(summary.succeeded, 3);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures[0].uid, 2);
        assert_eq!(summary.failures[0].class, None);
        assert!(summary.failures[0].error.contains("ZZ"));
        assert!(!ctx.writer.path_for(2).exists());
        assert!(ctx.writer.path_for(3).exists());
    }

    #[test]
    fn test_trace_write_failure_fails_only_that_user() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(&tmp);
        // A directory where the trace should go makes the final rename fail
        std::fs::create_dir_all(ctx.writer.path_for(2)).unwrap();
        let population = Population::new(4, 1234);
        let drawn: Vec<UserClass> = population.assignments().map(|(_, class)| class).collect();

        let summary = run_population(&population, &ctx, 2).unwrap();

        assert_eq!(summary.succeeded, 3);
        assert_eq!(summary.failed, 1);
        let failure = &summary.failures[0];
        assert_eq!(failure.uid, 2);
        assert_eq!(failure.class, Some(drawn[2]));
        assert!(failure.error.contains("failed to write trace file"), "{}", failure.error);

        for uid in [0, 1, 3] {
            assert!(ctx.writer.path_for(uid).is_file(), "missing trace for {}", uid);
        }
        assert!(!ctx.writer.dir().join("2.dat.tmp").exists());
    }

    #[test]
    fn test_outcome_carries_resolved_class() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(&tmp);
        let job = UserJob {
            uid: 1,
            class: crate::generator::ClassChoice::Forced("LO".into()),
        };

        let outcome = run_user(&job, &ctx);

        assert_eq!(outcome.class, Some(UserClass::LO));
        assert!(outcome.result.is_ok());
    }

    #[test]
    fn test_results_independent_of_thread_count() {
        let tmp_a = TempDir::new().unwrap();
        let tmp_b = TempDir::new().unwrap();
        let population = Population::new(6, 1234);

        run_outcomes(&population, &context(&tmp_a), 1).unwrap();
        run_outcomes(&population, &context(&tmp_b), 4).unwrap();

        for uid in 0..6 {
            let a = std::fs::read(context(&tmp_a).writer.path_for(uid)).unwrap();
            let b = std::fs::read(context(&tmp_b).writer.path_for(uid)).unwrap();
            assert_eq!(a, b, "trace {} differs between pool sizes", uid);
        }
    }
}
