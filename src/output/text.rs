//! Human-readable run summary

use crate::stats::aggregator::RunSummary;

/// Print the run summary to the console
///
/// Shows per-class user counts, request and byte totals, how often the
/// inter-arrival resampling gave up, and every failed user.
pub fn print_summary(summary: &RunSummary) {
    println!("═══════════════════════════════════════════════════════════");
    println!("                    GENERATION RESULTS");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    println!("Elapsed Time: {:.3}s", summary.elapsed_secs);
    println!();

    println!("Users:");
    println!("  Generated: {}", format_number(summary.succeeded as u64));
    println!("  Failed:    {}", format_number(summary.failed as u64));
    for (class, count) in &summary.per_class {
        println!("  {}:        {}", class, format_number(*count as u64));
    }
    println!();

    let totals = &summary.totals;
    println!("Traffic:");
    println!("  Requests:     {}", format_number(totals.requests));
    println!("  Volume:       {}", format_bytes(totals.bytes));
    println!("  Active hours: {}", format_number(totals.active_hours as u64));
    println!();

    println!("Resampling:");
    println!("  Redraws:          {}", format_number(totals.resample_draws));
    println!("  Exhausted hours:  {}", format_number(totals.exhausted_hours as u64));
    println!("  Trimmed requests: {}", format_number(totals.trimmed_requests));

    if !summary.failures.is_empty() {
        println!();
        println!("Failures:");
        for failure in &summary.failures {
            match failure.class {
                Some(class) => println!("  user {} ({}): {}", failure.uid, class, failure.error),
                None => println!("  user {}: {}", failure.uid, failure.error),
            }
        }
    }

    println!();
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (count, c) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}

/// Format bytes with appropriate units
fn format_bytes(bytes: f64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    const TB: f64 = GB * 1024.0;

    if bytes >= TB {
        format!("{:.2} TB", bytes / TB)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes / GB)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes / KB)
    } else {
        format!("{:.0} B", bytes)
    }
}
