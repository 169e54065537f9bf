//! Trace file output
//!
//! One file per user at `<users_dir>/<synthetic_dir>/<uid>.dat`, one line per
//! request:
//!
//! ```text
//! 2013-08-25 00:10:58 13 30.7411159743 HF
//! ```
//!
//! Timestamps are truncated to whole seconds. A trace is rendered fully in
//! memory, written to a temporary sibling and renamed into place, so a reader
//! never sees a partial file.

use crate::generator::user::{Request, User};
use crate::model::UserClass;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Failure to place a trace on disk
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to create trace directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write trace file {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Format one trace line, without the trailing newline
pub fn format_request(uid: u64, class: UserClass, request: &Request) -> String {
    format!(
        "{} {} {} {}",
        request.timestamp.format(TIMESTAMP_FORMAT),
        uid,
        request.size,
        class
    )
}

/// Render a user's whole trace
pub fn render_trace(user: &User) -> String {
    let mut content = String::with_capacity(user.request_count() * 48);
    for request in user.requests() {
        content.push_str(&format_request(user.uid(), user.class(), &request));
        content.push('\n');
    }
    content
}

/// Writes user traces into one directory
#[derive(Debug, Clone)]
pub struct TraceWriter {
    dir: PathBuf,
}

impl TraceWriter {
    pub fn new(users_dir: impl AsRef<Path>, synthetic_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: users_dir.as_ref().join(synthetic_dir),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, uid: u64) -> PathBuf {
        self.dir.join(format!("{}.dat", uid))
    }

    /// Create the trace directory if it does not exist yet
    pub fn ensure_dir(&self) -> Result<(), TraceError> {
        fs::create_dir_all(&self.dir).map_err(|source| TraceError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }

    /// Write a generated user's trace, replacing any existing file
    pub fn write_user(&self, user: &User) -> Result<PathBuf, TraceError> {
        self.ensure_dir()?;

        let path = self.path_for(user.uid());
        let tmp = self.dir.join(format!("{}.dat.tmp", user.uid()));
        let content = render_trace(user);

        let result = fs::write(&tmp, content).and_then(|_| fs::rename(&tmp, &path));
        if let Err(source) = result {
            let _ = fs::remove_file(&tmp);
            return Err(TraceError::Write { path, source });
        }

        log::debug!("Wrote {} requests for user {} to {}", user.request_count(), user.uid(), path.display());
        Ok(path)
    }
}
