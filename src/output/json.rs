//! JSON run summary
//!
//! Serializes a [`RunSummary`] so harnesses that consume the traces can check
//! which users were generated and how often resampling fell back to trimming.

use crate::stats::aggregator::RunSummary;
use crate::Result;
use anyhow::Context;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write the run summary as JSON
pub fn write_summary(output_path: &Path, summary: &RunSummary, pretty: bool) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create summary file: {}", output_path.display()))?;
    let writer = BufWriter::new(file);

    if pretty {
        serde_json::to_writer_pretty(writer, summary)?;
    } else {
        serde_json::to_writer(writer, summary)?;
    }

    Ok(())
}
