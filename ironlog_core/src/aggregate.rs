//! Set-log aggregation for logging a finished workout.
//!
//! The heaviest set becomes the entry's recorded weight so the overload
//! resolver sees the best effort of the session.

use crate::{Error, Result, SetDetail, WorkoutLogEntry};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Summary values stored on a log entry
#[derive(Clone, Debug, PartialEq)]
pub struct SetSummary {
    pub weight: f64,
    pub reps: String,
    pub sets: u32,
}

/// Maximum weight across all sets, completed or not. `None` when empty.
pub fn max_set_weight(sets: &[SetDetail]) -> Option<f64> {
    sets.iter().map(|s| s.weight).reduce(f64::max)
}

/// Reject weights the log cannot store or the resolver cannot progress from.
///
/// JSON has no encoding for NaN or infinity, so such an entry would be
/// written as `null` and dropped on read.
pub fn validate_weight(weight: f64) -> Result<f64> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(weight)
    } else {
        Err(Error::InvalidLog(format!(
            "weight must be a finite, non-negative number, got {}",
            weight
        )))
    }
}

/// One exercise as submitted by the caller
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedExercise {
    pub name: String,
    pub sets: u32,
    pub reps: String,
    pub weight: f64,
    pub completed: bool,
    #[serde(default)]
    pub set_detail: Vec<SetDetail>,
}

impl LoggedExercise {
    /// Aggregate the submission.
    ///
    /// With per-set detail the weight is the heaviest set; without it the
    /// supplied summary weight is used as-is. Sets and reps always pass
    /// through from the caller.
    pub fn summarize(&self) -> SetSummary {
        let weight = match max_set_weight(&self.set_detail) {
            Some(max) => max,
            None => self.weight,
        };

        SetSummary {
            weight,
            reps: self.reps.clone(),
            sets: self.sets,
        }
    }

    /// Build the log entry to persist
    ///
    /// Fails if the name is blank or any weight is negative or non-finite.
    pub fn into_entry(
        self,
        user_id: &str,
        date: NaiveDate,
        logged_at: DateTime<Utc>,
    ) -> Result<WorkoutLogEntry> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidLog("exercise name must not be empty".into()));
        }
        validate_weight(self.weight)?;
        if let Some(bad) = self.set_detail.iter().find(|s| validate_weight(s.weight).is_err()) {
            return Err(Error::InvalidLog(format!(
                "set {} weight must be a finite, non-negative number, got {}",
                bad.set_number, bad.weight
            )));
        }

        let summary = self.summarize();

        tracing::debug!(
            "Logging {}: {} sets, reps {}, {} kg (completed: {})",
            self.name,
            summary.sets,
            summary.reps,
            summary.weight,
            self.completed
        );

        Ok(WorkoutLogEntry {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            exercise_name: self.name,
            date,
            logged_at,
            sets_performed: summary.sets,
            reps_summary: summary.reps,
            weight_performed: summary.weight,
            completed: self.completed,
            set_detail: self.set_detail,
        })
    }
}
