//! Workout history lookup.
//!
//! Builds an immutable per-user snapshot of the most recent log entry for
//! each exercise, loaded from both the CSV archive and the live log. One
//! snapshot serves every lookup of a single request.

use crate::{Result, WorkoutLogEntry};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Source of "latest log entry for this exercise" answers
pub trait HistoryLookup {
    fn latest_for(&self, exercise_name: &str) -> Option<&WorkoutLogEntry>;
}

/// Latest log entry per exercise name for a single user
#[derive(Clone, Debug, Default)]
pub struct LogHistory {
    latest: HashMap<String, WorkoutLogEntry>,
}

impl LogHistory {
    /// Index entries for `user_id`, oldest written first
    ///
    /// Entries for other users are ignored and duplicate ids are counted
    /// once. The entry with the greatest `logged_at` wins; on a tie the
    /// later-written entry wins.
    pub fn from_entries(
        user_id: &str,
        entries: impl IntoIterator<Item = WorkoutLogEntry>,
    ) -> Self {
        let mut seen_ids = HashSet::new();
        let mut latest: HashMap<String, WorkoutLogEntry> = HashMap::new();

        for entry in entries {
            if entry.user_id != user_id || !seen_ids.insert(entry.id) {
                continue;
            }
            let newer = latest
                .get(&entry.exercise_name)
                .map_or(true, |current| entry.logged_at >= current.logged_at);
            if newer {
                latest.insert(entry.exercise_name.clone(), entry);
            }
        }

        Self { latest }
    }

    /// Number of distinct exercises with history
    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }
}

impl HistoryLookup for LogHistory {
    fn latest_for(&self, exercise_name: &str) -> Option<&WorkoutLogEntry> {
        self.latest.get(exercise_name)
    }
}

/// Load a user's history from the CSV archive and the live log
pub fn load_log_history(log_path: &Path, csv_path: &Path, user_id: &str) -> Result<LogHistory> {
    // Archive first: everything in it was written before the live log
    let mut entries = crate::csv_rollup::read_archive(csv_path)?;
    let archived = entries.len();
    entries.extend(crate::wal::read_entries(log_path)?);

    tracing::debug!(
        "Loaded {} archived and {} live log entries",
        archived,
        entries.len() - archived
    );

    let history = LogHistory::from_entries(user_id, entries);

    tracing::info!(
        "History for '{}' covers {} exercises",
        user_id,
        history.len()
    );

    Ok(history)
}
