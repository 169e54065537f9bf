//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//!
//! A run is fully described by [`Config`]. It can come from the command line
//! alone, from a TOML file, or from both, in which case explicit command-line
//! values win.
//!
//! ```toml
//! [generation]
//! users = 100
//! seed = 1234
//! date = "2013-08-25"
//! max_resample_attempts = 100000
//!
//! [output]
//! users_dir = "users"
//! synthetic_dir = "synthetic"
//! log_file = "progress.log"
//!
//! [workers]
//! threads = 8
//!
//! [[overrides]]
//! uid = 0
//! class = "HF"
//! ```

pub mod cli;
pub mod toml;
pub mod validator;

use crate::generator::population::DEFAULT_GLOBAL_SEED;
use crate::generator::user::{GenerationPolicy, DEFAULT_MAX_RESAMPLE_ATTEMPTS};
use crate::output::TraceWriter;
use anyhow::Context;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Number of users generated when none is given
pub const DEFAULT_NUMBER_OF_USERS: u64 = 10;

/// Complete run configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub workers: WorkerConfig,
    /// Per-uid class overrides
    #[serde(default)]
    pub overrides: Vec<ClassOverride>,
}

/// What to generate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Number of synthetic users
    #[serde(default = "default_users")]
    pub users: u64,
    /// Seed of the class assignment draw
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Simulated day as YYYY-MM-DD (default: today, UTC)
    #[serde(default)]
    pub date: Option<String>,
    /// Full-vector inter-arrival redraws allowed per hour; 0 skips resampling
    /// and trims every overflowing hour
    #[serde(default = "default_max_resample_attempts")]
    pub max_resample_attempts: u32,
}

fn default_users() -> u64 {
    DEFAULT_NUMBER_OF_USERS
}

fn default_seed() -> u64 {
    DEFAULT_GLOBAL_SEED
}

fn default_max_resample_attempts() -> u32 {
    DEFAULT_MAX_RESAMPLE_ATTEMPTS
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            users: default_users(),
            seed: default_seed(),
            date: None,
            max_resample_attempts: default_max_resample_attempts(),
        }
    }
}

/// Where results go
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory of the synthetic traffic
    #[serde(default = "default_users_dir")]
    pub users_dir: PathBuf,
    /// Directory under `users_dir` holding one trace per user
    #[serde(default = "default_synthetic_dir")]
    pub synthetic_dir: PathBuf,
    /// Progress log
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// Optional JSON run summary
    #[serde(default)]
    pub summary_json: Option<PathBuf>,
}

fn default_users_dir() -> PathBuf {
    PathBuf::from("users")
}

fn default_synthetic_dir() -> PathBuf {
    PathBuf::from("synthetic")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("progress.log")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            users_dir: default_users_dir(),
            synthetic_dir: default_synthetic_dir(),
            log_file: default_log_file(),
            summary_json: None,
        }
    }
}

/// Worker pool configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Pool size; 0 uses one thread per CPU
    #[serde(default)]
    pub threads: usize,
}

/// Force the class of one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassOverride {
    pub uid: u64,
    /// Class label; checked when that user is generated
    pub class: String,
}

impl Config {
    /// Simulated day, today (UTC) when not configured
    pub fn initial_date(&self) -> crate::Result<NaiveDate> {
        match &self.generation.date {
            Some(date) => parse_date(date),
            None => Ok(Utc::now().date_naive()),
        }
    }

    pub fn policy(&self) -> GenerationPolicy {
        GenerationPolicy {
            max_resample_attempts: self.generation.max_resample_attempts,
        }
    }

    pub fn trace_writer(&self) -> TraceWriter {
        TraceWriter::new(&self.output.users_dir, &self.output.synthetic_dir)
    }

    /// Overrides keyed by uid; a later entry for the same uid wins
    pub fn override_map(&self) -> BTreeMap<u64, String> {
        self.overrides
            .iter()
            .map(|o| (o.uid, o.class.clone()))
            .collect()
    }
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(s: &str) -> crate::Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date (expected YYYY-MM-DD): {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.generation.users, 10);
        assert_eq!(config.generation.seed, 1234);
        assert_eq!(config.generation.max_resample_attempts, 100_000);
        assert_eq!(config.workers.threads, 0);
        assert_eq!(config.trace_writer().dir(), std::path::Path::new("users/synthetic"));
        assert!(config.overrides.is_empty());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2013-08-25").unwrap(), NaiveDate::from_ymd_opt(2013, 8, 25).unwrap());
        assert!(parse_date("25-08-2013").is_err());
        assert!(parse_date("2013-02-30").is_err());
    }

    #[test]
    fn test_initial_date_configured() {
        let mut config = Config::default();
        config.generation.date = Some("2014-01-02".into());
        assert_eq!(config.initial_date().unwrap(), NaiveDate::from_ymd_opt(2014, 1, 2).unwrap());
    }

    #[test]
    fn test_override_map_last_wins() {
        let mut config = Config::default();
        config.overrides = vec![
            ClassOverride { uid: 1, class: "HF".into() },
            ClassOverride { uid: 1, class: "LO".into() },
        ];

        assert_eq!(config.override_map().get(&1).map(String::as_str), Some("LO"));
    }
}
