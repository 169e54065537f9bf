//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Build the run configuration: the config file if one was given, then CLI
/// values on top
pub fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => parse_toml_file(path)?,
        None => Config::default(),
    };
    merge_cli_with_config(cli, config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    // Override generation settings
    if let Some(users) = cli.users {
        config.generation.users = users;
    }
    if let Some(seed) = cli.seed {
        config.generation.seed = seed;
    }
    if let Some(ref date) = cli.date {
        config.generation.date = Some(date.clone());
    }
    if let Some(attempts) = cli.max_resample_attempts {
        config.generation.max_resample_attempts = attempts;
    }

    // Override output settings
    if let Some(ref dir) = cli.users_dir {
        config.output.users_dir = dir.clone();
    }
    if let Some(ref dir) = cli.synthetic_dir {
        config.output.synthetic_dir = dir.clone();
    }
    if let Some(ref path) = cli.log_file {
        config.output.log_file = path.clone();
    }
    if let Some(ref path) = cli.summary_json {
        config.output.summary_json = Some(path.clone());
    }

    // Override worker settings
    if let Some(threads) = cli.threads {
        config.workers.threads = threads;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[generation]
users = 500
seed = 42
date = "2013-08-25"
max_resample_attempts = 5000

[output]
users_dir = "out"
synthetic_dir = "traces"
log_file = "gen.log"
summary_json = "summary.json"

[workers]
threads = 4

[[overrides]]
uid = 0
class = "HF"

[[overrides]]
uid = 7
class = "LO"
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_toml_string(SAMPLE).unwrap();

        assert_eq!(config.generation.users, 500);
        assert_eq!(config.generation.seed, 42);
        assert_eq!(config.generation.date.as_deref(), Some("2013-08-25"));
        assert_eq!(config.generation.max_resample_attempts, 5000);
        assert_eq!(config.output.users_dir, PathBuf::from("out"));
        assert_eq!(config.output.synthetic_dir, PathBuf::from("traces"));
        assert_eq!(config.output.log_file, PathBuf::from("gen.log"));
        assert_eq!(config.output.summary_json, Some(PathBuf::from("summary.json")));
        assert_eq!(config.workers.threads, 4);
        assert_eq!(config.overrides.len(), 2);
        assert_eq!(config.overrides[1], ClassOverride { uid: 7, class: "LO".into() });
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = parse_toml_string("").unwrap();

        assert_eq!(config.generation.users, DEFAULT_NUMBER_OF_USERS);
        assert_eq!(config.output.users_dir, PathBuf::from("users"));
        assert_eq!(config.output.log_file, PathBuf::from("progress.log"));
    }

    #[test]
    fn test_parse_partial_section() {
        let config = parse_toml_string("[generation]\nusers = 3\n").unwrap();

        assert_eq!(config.generation.users, 3);
        assert_eq!(config.generation.seed, 1234);
        assert_eq!(config.generation.max_resample_attempts, 100_000);
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(parse_toml_string("[generation\nusers = 3").is_err());
        assert!(parse_toml_string("[generation]\nusers = \"many\"").is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let config = parse_toml_string(SAMPLE).unwrap();
        let cli = Cli {
            users: Some(20),
            seed: Some(9),
            threads: Some(1),
            users_dir: Some(PathBuf::from("elsewhere")),
            ..Default::default()
        };

        let merged = merge_cli_with_config(&cli, config).unwrap();

        assert_eq!(merged.generation.users, 20);
        assert_eq!(merged.generation.seed, 9);
        assert_eq!(merged.workers.threads, 1);
        assert_eq!(merged.output.users_dir, PathBuf::from("elsewhere"));
        // untouched values come from the file
        assert_eq!(merged.output.synthetic_dir, PathBuf::from("traces"));
        assert_eq!(merged.generation.max_resample_attempts, 5000);
        assert_eq!(merged.overrides.len(), 2);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let config = load_config(&cli).unwrap();

        assert_eq!(config.generation.users, 500);
    }

    #[test]
    fn test_load_config_missing_file() {
        let cli = Cli {
            config: Some(PathBuf::from("/nonexistent/synthtraffic.toml")),
            ..Default::default()
        };

        assert!(load_config(&cli).is_err());
    }
}
