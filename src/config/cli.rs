//! CLI argument parsing using clap

use clap::Parser;
use std::path::PathBuf;

/// synthtraffic - synthetic per-user web traffic traces
#[derive(Parser, Debug, Default)]
#[command(name = "synthtraffic")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Number of synthetic users (default 10)
    #[arg(value_name = "USERS")]
    pub users: Option<u64>,

    /// TOML configuration file; explicit flags override its values
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Seed of the class assignment draw (default 1234)
    #[arg(short = 's', long, env = "SYNTHTRAFFIC_SEED")]
    pub seed: Option<u64>,

    /// Simulated day, YYYY-MM-DD (default: today, UTC)
    #[arg(short = 'd', long)]
    pub date: Option<String>,

    /// Worker threads (0 = one per CPU)
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Root directory of the synthetic traffic
    #[arg(long)]
    pub users_dir: Option<PathBuf>,

    /// Directory under the users directory holding one trace per user
    #[arg(long)]
    pub synthetic_dir: Option<PathBuf>,

    /// Progress log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Inter-arrival redraws allowed per hour before trimming (0 = trim only)
    #[arg(long)]
    pub max_resample_attempts: Option<u32>,

    /// Write a JSON run summary to this file
    #[arg(long)]
    pub summary_json: Option<PathBuf>,

    /// Validate configuration and exit
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.users == Some(0) {
            anyhow::bail!("number of users must be a positive integer");
        }

        if let Some(ref date) = self.date {
            crate::config::parse_date(date)?;
        }

        Ok(())
    }
}
