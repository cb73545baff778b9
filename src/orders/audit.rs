//! Append-only audit log for order status transitions.
//!
//! One line per transition. The file and its parent directory are created
//! on first use so a fresh deployment needs no setup step.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

pub struct StatusAuditLog {
    path: PathBuf,
}

impl StatusAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a single status-transition line.
    pub fn append(&self, order_id: Uuid, status: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        writeln!(
            file,
            "{} Order {} status updated to {}",
            Utc::now().format("%Y/%m/%d %H:%M:%S"),
            order_id,
            status
        )
    }
}
