//! Progress log
//!
//! Events go through the `log` facade to an append-only file, one
//! `dd-mm-YYYY HH:MM:SS message` line each. `RUST_LOG` overrides the level.

use chrono::Local;
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Install the process-wide logger writing to `path`
///
/// Falls back to stderr when the file cannot be opened. Installing twice is a
/// no-op.
pub fn init(path: &Path, level: LevelFilter) {
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {}",
                Local::now().format("%d-%m-%Y %H:%M:%S"),
                record.args()
            )
        })
        .target(log_target(path));

    // A logger may already be installed (tests, embedding applications)
    let _ = builder.try_init();
}

/// Where log lines go: the file at `path`, or stderr if it cannot be opened
pub fn log_target(path: &Path) -> Target {
    match open_log_file(path) {
        Ok(file) => Target::Pipe(Box::new(file)),
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {}, logging to stderr", path.display(), e);
            Target::Stderr
        }
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
