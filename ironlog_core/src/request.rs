//! Plan requests and their validation.
//!
//! The generator trusts its input. Callers run [`PlanRequest::validate`]
//! first and reject anything it refuses.

use crate::types::normalize_token;
use crate::{Error, Result, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Training goal chosen by the user
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    FatLoss,
    MuscleGain,
    Strength,
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Goal::FatLoss => "Fat Loss",
            Goal::MuscleGain => "Muscle Gain",
            Goal::Strength => "Strength",
        };
        f.write_str(s)
    }
}

impl FromStr for Goal {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "fatloss" => Ok(Goal::FatLoss),
            "musclegain" => Ok(Goal::MuscleGain),
            "strength" => Ok(Goal::Strength),
            _ => Err(Error::Parse(format!("Unknown goal: {}", s))),
        }
    }
}

/// Training experience
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        };
        f.write_str(s)
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            _ => Err(Error::Parse(format!("Unknown level: {}", s))),
        }
    }
}

/// Parameters for one plan generation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlanRequest {
    pub goal: Goal,
    pub level: Level,
    pub days_per_week: u8,
    pub session_minutes: u32,
    /// Day key ("Day 1" or a weekday name) to focus text ("Chest", "Rest", ...).
    /// Focus text is resolved leniently at generation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_schedule: Option<BTreeMap<String, String>>,
}

impl PlanRequest {
    pub fn new(goal: Goal, level: Level, days_per_week: u8, session_minutes: u32) -> Self {
        Self {
            goal,
            level,
            days_per_week,
            session_minutes,
            custom_schedule: None,
        }
    }

    /// Attach a custom schedule and set `days_per_week` to its entry count
    pub fn with_custom_schedule<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let schedule: BTreeMap<String, String> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.days_per_week = u8::try_from(schedule.len()).unwrap_or(u8::MAX);
        self.custom_schedule = Some(schedule);
        self
    }

    /// Reject requests the generator must never see
    pub fn validate(&self) -> Result<()> {
        if !(1..=7).contains(&self.days_per_week) {
            return Err(Error::InvalidRequest(format!(
                "days_per_week must be between 1 and 7, got {}",
                self.days_per_week
            )));
        }

        if self.session_minutes == 0 {
            return Err(Error::InvalidRequest(
                "session_minutes must be greater than zero".into(),
            ));
        }

        if let Some(ref custom) = self.custom_schedule {
            if custom.len() != self.days_per_week as usize {
                return Err(Error::InvalidRequest(format!(
                    "custom schedule has {} entries but days_per_week is {}",
                    custom.len(),
                    self.days_per_week
                )));
            }

            let mut seen = HashSet::new();
            for key in custom.keys() {
                let day = Weekday::from_day_key(key).ok_or_else(|| {
                    Error::InvalidRequest(format!("unrecognised day key '{}'", key))
                })?;
                if !seen.insert(day) {
                    return Err(Error::InvalidRequest(format!(
                        "day key '{}' collides with another entry on {}",
                        key, day
                    )));
                }
            }
        }

        Ok(())
    }
}
