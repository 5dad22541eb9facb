//! Stored plan persistence with file locking.
//!
//! A user keeps one plan at a time; saving a new plan replaces the old one.

use crate::{Error, GeneratedPlan, PlanRequest, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// A generated plan together with the request that produced it
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StoredPlan {
    pub request: PlanRequest,
    pub plan: GeneratedPlan,
    pub created_at: DateTime<Utc>,
}

impl StoredPlan {
    pub fn new(request: PlanRequest, plan: GeneratedPlan) -> Self {
        Self {
            request,
            plan,
            created_at: Utc::now(),
        }
    }

    /// Load the stored plan with shared locking
    ///
    /// Returns `Ok(None)` if no plan has been saved. A corrupt plan file is
    /// an error rather than a silent reset.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            tracing::debug!("No stored plan at {:?}", path);
            return Ok(None);
        }

        let file = File::open(path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        let stored: StoredPlan = serde_json::from_str(&contents)?;
        tracing::debug!("Loaded {} plan from {:?}", stored.plan.split_type, path);
        Ok(Some(stored))
    }

    /// Load the stored plan, failing with [`Error::NoPlan`] when absent
    pub fn load_required(path: &Path) -> Result<Self> {
        Self::load(path)?.ok_or(Error::NoPlan)
    }

    /// Save the plan atomically
    ///
    /// Writes to a temp file in the same directory, syncs it, then renames
    /// it over the original.
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "plan path missing parent")
        })?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::info!("Saved {} plan to {:?}", self.plan.split_type, path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use crate::{Goal, Level, SplitType};

    fn stored(days: u8) -> StoredPlan {
        let request = PlanRequest::new(Goal::FatLoss, Level::Beginner, days, 45);
        let plan = generate(&request);
        StoredPlan::new(request, plan)
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("plan.json");

        let original = stored(4);
        original.save(&path).unwrap();

        let loaded = StoredPlan::load(&path).unwrap().unwrap();
        assert_eq!(loaded, original);
        assert_eq!(loaded.plan.split_type, SplitType::UpperLower);
    }

    #[test]
    fn test_save_replaces_previous_plan() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("plan.json");

        stored(2).save(&path).unwrap();
        stored(6).save(&path).unwrap();

        let loaded = StoredPlan::load_required(&path).unwrap();
        assert_eq!(loaded.plan.split_type, SplitType::PushPullLegs);
        assert_eq!(loaded.request.days_per_week, 6);
    }

    #[test]
    fn test_load_missing_plan() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("plan.json");

        assert!(StoredPlan::load(&path).unwrap().is_none());
        assert!(matches!(StoredPlan::load_required(&path), Err(Error::NoPlan)));
    }

    #[test]
    fn test_corrupted_plan_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("plan.json");
        std::fs::write(&path, "{ invalid json }").unwrap();

        assert!(matches!(StoredPlan::load(&path), Err(Error::Json(_))));
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("plan.json");

        stored(3).save(&path).unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "plan.json")
            .collect();
        assert!(extras.is_empty(), "Unexpected files: {:?}", extras);
    }
}
