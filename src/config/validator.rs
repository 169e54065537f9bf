//! Configuration validation

use super::*;
use anyhow::Result;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_generation(&config.generation)?;
    validate_output(&config.output)?;
    validate_overrides(&config.overrides, config.generation.users)?;

    Ok(())
}

/// Validate generation settings
pub fn validate_generation(generation: &GenerationConfig) -> Result<()> {
    if generation.users == 0 {
        anyhow::bail!("users must be a positive integer, got 0");
    }

    if let Some(ref date) = generation.date {
        parse_date(date)?;
    }

    Ok(())
}

/// Validate output settings
pub fn validate_output(output: &OutputConfig) -> Result<()> {
    if output.users_dir.as_os_str().is_empty() {
        anyhow::bail!("users_dir must not be empty");
    }

    if output.synthetic_dir.as_os_str().is_empty() {
        anyhow::bail!("synthetic_dir must not be empty");
    }

    if output.log_file.as_os_str().is_empty() {
        anyhow::bail!("log_file must not be empty");
    }

    Ok(())
}

/// Validate class overrides
///
/// Labels are parsed when the user is generated, so an unknown label fails
/// only that user.
fn validate_overrides(overrides: &[ClassOverride], users: u64) -> Result<()> {
    for o in overrides {
        if o.uid >= users {
            anyhow::bail!(
                "class override for uid {} is outside the population (0..{})",
                o.uid,
                users
            );
        }
    }

    Ok(())
}
