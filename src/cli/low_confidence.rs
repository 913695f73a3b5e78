//! Append-only review log for low-confidence predictions.
//!
//! Each entry is one tab-separated line:
//! `timestamp\ttext\tintent\tconfidence`, with the timestamp in UTC and the
//! confidence as a fixed two-decimal number. The file is never read back.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Timestamp layout used in log lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%SZ";

/// One low-confidence prediction queued for review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowConfidenceLogEntry {
    pub timestamp: DateTime<Utc>,
    pub text: String,
    pub intent: String,
    pub confidence: f32,
}

impl LowConfidenceLogEntry {
    /// Create an entry stamped with the current time.
    pub fn new(text: impl Into<String>, intent: impl Into<String>, confidence: f32) -> Self {
        Self::at(Utc::now(), text, intent, confidence)
    }

    /// Create an entry with an explicit timestamp.
    pub fn at(
        timestamp: DateTime<Utc>,
        text: impl Into<String>,
        intent: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            timestamp,
            text: text.into(),
            intent: intent.into(),
            confidence,
        }
    }

    /// Render the entry as a single log line, without the trailing newline.
    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{:.2}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            single_line(&self.text),
            single_line(&self.intent),
            self.confidence
        )
    }
}

/// Keep field separators and line breaks out of a field.
fn single_line(field: &str) -> String {
    field
        .chars()
        .map(|c| if matches!(c, '\t' | '\n' | '\r') { ' ' } else { c })
        .collect()
}

/// Handle to the review log file.
#[derive(Debug, Clone)]
pub struct LowConfidenceLog {
    path: PathBuf,
}

impl LowConfidenceLog {
    /// Create a handle; the file is created on the first append.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, opening the file in create+append mode.
    pub fn append(&self, entry: &LowConfidenceLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", entry.to_line())?;

        log::debug!("Logged low-confidence query to {}", self.path.display());
        Ok(())
    }
}
