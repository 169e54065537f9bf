//! synthtraffic CLI entry point

use anyhow::{Context, Result};
use log::LevelFilter;
use synthtraffic::config::{cli::Cli, toml, validator, Config};
use synthtraffic::generator::Population;
use synthtraffic::output::{json, text};
use synthtraffic::worker::{self, RunContext};
use std::path::Path;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();
    cli.validate()?;

    // CLI values on top of the config file, if any
    let config = toml::load_config(&cli)?;
    validator::validate_config(&config).context("Configuration validation failed")?;

    if cli.dry_run {
        print_configuration(&config);
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    synthtraffic::logging::init(&config.output.log_file, LevelFilter::Debug);

    let ctx = RunContext {
        initial_date: config.initial_date()?,
        policy: config.policy(),
        writer: config.trace_writer(),
    };

    println!(
        "[+] Generating {} synthetic users and their respective hourly traffic",
        config.generation.users
    );
    println!(
        "[+] Per-user synthetic traffic will be stored in '{}'",
        Path::new(".").join(ctx.writer.dir()).display()
    );

    let population = Population::new(config.generation.users, config.generation.seed)
        .with_overrides(config.override_map());

    let summary = worker::run_population(&population, &ctx, config.workers.threads)?;

    text::print_summary(&summary);

    if let Some(ref path) = config.output.summary_json {
        json::write_summary(path, &summary, true)?;
        println!("Summary written to {}", path.display());
    }

    if !summary.is_success() {
        anyhow::bail!("{} of {} users failed", summary.failed, summary.users);
    }

    Ok(())
}

fn print_configuration(config: &Config) {
    println!("Configuration:");
    println!("  Generation:");
    println!("    Users: {}", config.generation.users);
    println!("    Seed: {}", config.generation.seed);
    match config.generation.date {
        Some(ref date) => println!("    Date: {}", date),
        None => println!("    Date: today (UTC)"),
    }
    println!("    Max resample attempts: {}", config.generation.max_resample_attempts);

    println!("  Output:");
    println!("    Traces: {}", config.trace_writer().dir().display());
    println!("    Log file: {}", config.output.log_file.display());
    if let Some(ref path) = config.output.summary_json {
        println!("    Summary JSON: {}", path.display());
    }

    println!("  Workers:");
    if config.workers.threads == 0 {
        println!("    Threads: {} (one per CPU)", num_cpus::get());
    } else {
        println!("    Threads: {}", config.workers.threads);
    }

    if !config.overrides.is_empty() {
        println!("  Class overrides:");
        for o in &config.overrides {
            println!("    uid {}: {}", o.uid, o.class);
        }
    }
}
