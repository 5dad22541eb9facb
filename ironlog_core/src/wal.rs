//! Append-only workout log.
//!
//! Log entries are appended to a JSONL (JSON Lines) file with file locking
//! to ensure safe concurrent access. Entries are never rewritten in place.

use crate::{Result, WorkoutLogEntry};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Sink trait for persisting workout log entries
pub trait LogSink {
    fn append(&mut self, entry: &WorkoutLogEntry) -> Result<()>;

    fn append_all(&mut self, entries: &[WorkoutLogEntry]) -> Result<()> {
        for entry in entries {
            self.append(entry)?;
        }
        Ok(())
    }
}

/// JSONL-based log sink with file locking
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl LogSink for JsonlSink {
    fn append(&mut self, entry: &WorkoutLogEntry) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(entry)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        file.unlock()?;

        tracing::debug!(
            "Appended log entry {} ({}) to {:?}",
            entry.id,
            entry.exercise_name,
            self.path
        );
        Ok(())
    }
}

/// Read all entries from a log file, in write order
pub fn read_entries(path: &Path) -> Result<Vec<WorkoutLogEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut entries = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<WorkoutLogEntry>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!("Failed to parse log entry at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} entries from {:?}", entries.len(), path);
    Ok(entries)
}
