//! CSV archive of the workout log.
//!
//! This module implements atomic log-to-CSV conversion with proper error
//! handling to prevent data loss, and reads the archive back for history.

use crate::{Error, Result, SetDetail, WorkoutLogEntry};
use chrono::{DateTime, NaiveDate, Utc};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::Path;
use uuid::Uuid;

/// A row in the CSV archive. Per-set detail is kept as a JSON column.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    id: String,
    user_id: String,
    exercise_name: String,
    date: String,
    logged_at: String,
    sets_performed: u32,
    reps_summary: String,
    weight_performed: f64,
    completed: bool,
    set_detail: String,
}

impl TryFrom<&WorkoutLogEntry> for CsvRow {
    type Error = Error;

    fn try_from(entry: &WorkoutLogEntry) -> Result<Self> {
        let set_detail = if entry.set_detail.is_empty() {
            String::new()
        } else {
            serde_json::to_string(&entry.set_detail)?
        };

        Ok(CsvRow {
            id: entry.id.to_string(),
            user_id: entry.user_id.clone(),
            exercise_name: entry.exercise_name.clone(),
            date: entry.date.to_string(),
            logged_at: entry.logged_at.to_rfc3339(),
            sets_performed: entry.sets_performed,
            reps_summary: entry.reps_summary.clone(),
            weight_performed: entry.weight_performed,
            completed: entry.completed,
            set_detail,
        })
    }
}

impl TryFrom<CsvRow> for WorkoutLogEntry {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| Error::Parse(format!("Invalid UUID: {}", e)))?;

        let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
            .map_err(|e| Error::Parse(format!("Invalid date: {}", e)))?;

        let logged_at = DateTime::parse_from_rfc3339(&row.logged_at)
            .map_err(|e| Error::Parse(format!("Invalid timestamp: {}", e)))?
            .with_timezone(&Utc);

        let set_detail: Vec<SetDetail> = if row.set_detail.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&row.set_detail)?
        };

        Ok(WorkoutLogEntry {
            id,
            user_id: row.user_id,
            exercise_name: row.exercise_name,
            date,
            logged_at,
            sets_performed: row.sets_performed,
            reps_summary: row.reps_summary,
            weight_performed: row.weight_performed,
            completed: row.completed,
            set_detail,
        })
    }
}

/// Roll up the live log into CSV and archive the log atomically
///
/// This function:
/// 1. Reads all entries from the live log
/// 2. Appends them to the CSV file (creates with headers if needed)
/// 3. Syncs the CSV to disk
/// 4. Renames the log to `.processed`
/// 5. Returns the number of entries processed
pub fn log_to_csv_and_archive(log_path: &Path, csv_path: &Path) -> Result<usize> {
    let entries = crate::wal::read_entries(log_path)?;

    if entries.is_empty() {
        tracing::info!("No entries in log to roll up");
        return Ok(0);
    }

    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;

    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    for entry in &entries {
        writer.serialize(CsvRow::try_from(entry)?)?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Wrote {} log entries to CSV", entries.len());

    let processed_path = log_path.with_extension("jsonl.processed");
    std::fs::rename(log_path, &processed_path)?;

    tracing::info!("Archived log to {:?}", processed_path);

    Ok(entries.len())
}

/// Read every archived entry, skipping malformed rows
pub fn read_archive(path: &Path) -> Result<Vec<WorkoutLogEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut entries = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        match result {
            Ok(row) => match WorkoutLogEntry::try_from(row) {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::warn!("Failed to parse CSV row: {}", e),
            },
            Err(e) => tracing::warn!("Failed to deserialize CSV row: {}", e),
        }
    }

    tracing::debug!("Read {} archived entries from {:?}", entries.len(), path);
    Ok(entries)
}

/// Clean up old processed log files
///
/// This removes all `.processed` files in the given directory.
pub fn cleanup_processed_logs(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();

        if path.extension().is_some_and(|ext| ext == "processed") {
            std::fs::remove_file(&path)?;
            tracing::debug!("Removed processed log: {:?}", path);
            count += 1;
        }
    }

    if count > 0 {
        tracing::info!("Cleaned up {} processed log files", count);
    }

    Ok(count)
}
