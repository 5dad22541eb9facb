//! Core domain types for the Ironlog system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Weekdays and focus tags
//! - Exercise templates and rep targets
//! - Weekly schedules and generated plans
//! - Workout log entries with per-set detail

use crate::Error;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lowercase and strip separators so "Upper Body", "upper_body" and
/// "upper-body" compare equal.
pub(crate) fn normalize_token(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_' | '/'))
        .flat_map(|c| c.to_lowercase())
        .collect()
}

// ============================================================================
// Weekday
// ============================================================================

/// Day of the training week, ordered Monday first
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// 1-based position in the week (Monday = 1)
    pub fn ordinal(self) -> u8 {
        self as u8 + 1
    }

    /// Inverse of [`Weekday::ordinal`]; `None` outside 1..=7
    pub fn from_ordinal(n: u8) -> Option<Self> {
        match n {
            1..=7 => Some(Self::ALL[(n - 1) as usize]),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Resolve a custom-schedule key.
    ///
    /// Accepts ordinal keys ("Day 1" .. "Day 7", "day_3", "5") which map
    /// Day1 → Monday through Day7 → Sunday, and weekday names, which pass
    /// through unchanged.
    pub fn from_day_key(key: &str) -> Option<Self> {
        if let Ok(day) = key.parse::<Weekday>() {
            return Some(day);
        }
        let token = normalize_token(key);
        let digits = token.strip_prefix("day").unwrap_or(&token);
        digits.parse::<u8>().ok().and_then(Self::from_ordinal)
    }

    /// Current weekday on the local clock
    pub fn today() -> Self {
        chrono::Local::now().weekday().into()
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "monday" | "mon" => Ok(Weekday::Monday),
            "tuesday" | "tue" | "tues" => Ok(Weekday::Tuesday),
            "wednesday" | "wed" => Ok(Weekday::Wednesday),
            "thursday" | "thu" | "thurs" => Ok(Weekday::Thursday),
            "friday" | "fri" => Ok(Weekday::Friday),
            "saturday" | "sat" => Ok(Weekday::Saturday),
            "sunday" | "sun" => Ok(Weekday::Sunday),
            _ => Err(Error::Parse(format!("Unknown weekday: {}", s))),
        }
    }
}

// ============================================================================
// Focus Tags
// ============================================================================

/// Muscle-group or workout-type category attached to a training day
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FocusTag {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Push,
    Pull,
    UpperBody,
    LowerBody,
    FullBody,
    Cardio,
    Core,
    Rest,
}

impl FocusTag {
    pub fn label(self) -> &'static str {
        match self {
            FocusTag::Chest => "Chest",
            FocusTag::Back => "Back",
            FocusTag::Legs => "Legs",
            FocusTag::Shoulders => "Shoulders",
            FocusTag::Arms => "Arms",
            FocusTag::Push => "Push",
            FocusTag::Pull => "Pull",
            FocusTag::UpperBody => "Upper Body",
            FocusTag::LowerBody => "Lower Body",
            FocusTag::FullBody => "Full Body",
            FocusTag::Cardio => "Cardio",
            FocusTag::Core => "Core",
            FocusTag::Rest => "Rest",
        }
    }
}

impl fmt::Display for FocusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FocusTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "chest" => Ok(FocusTag::Chest),
            "back" => Ok(FocusTag::Back),
            "legs" | "leg" => Ok(FocusTag::Legs),
            "shoulders" | "shoulder" => Ok(FocusTag::Shoulders),
            "arms" | "arm" => Ok(FocusTag::Arms),
            "push" => Ok(FocusTag::Push),
            "pull" => Ok(FocusTag::Pull),
            "upperbody" | "upper" => Ok(FocusTag::UpperBody),
            "lowerbody" | "lower" => Ok(FocusTag::LowerBody),
            "fullbody" | "full" => Ok(FocusTag::FullBody),
            "cardio" => Ok(FocusTag::Cardio),
            "core" | "abs" => Ok(FocusTag::Core),
            "rest" | "restday" => Ok(FocusTag::Rest),
            _ => Err(Error::Parse(format!("Unknown focus tag: {}", s))),
        }
    }
}

// ============================================================================
// Exercise Templates
// ============================================================================

/// Target repetitions for an exercise, written as "10", "8-12" or "AMRAP"
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RepTarget {
    Fixed(u32),
    Range { min: u32, max: u32 },
    Amrap,
}

impl fmt::Display for RepTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepTarget::Fixed(n) => write!(f, "{}", n),
            RepTarget::Range { min, max } => write!(f, "{}-{}", min, max),
            RepTarget::Amrap => f.write_str("AMRAP"),
        }
    }
}

impl FromStr for RepTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("amrap") {
            return Ok(RepTarget::Amrap);
        }

        let invalid = || Error::Parse(format!("Invalid rep target: {}", s));

        if let Some((lo, hi)) = s.split_once('-') {
            let min: u32 = lo.trim().parse().map_err(|_| invalid())?;
            let max: u32 = hi.trim().parse().map_err(|_| invalid())?;
            if min > max {
                return Err(invalid());
            }
            return Ok(RepTarget::Range { min, max });
        }

        s.parse().map(RepTarget::Fixed).map_err(|_| invalid())
    }
}

impl TryFrom<String> for RepTarget {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RepTarget> for String {
    fn from(value: RepTarget) -> Self {
        value.to_string()
    }
}

/// One exercise as prescribed by the static catalog
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseTemplate {
    pub name: String,
    pub target_sets: u32,
    pub target_reps: RepTarget,
    /// Starting weight in kg when the user has no history; `None` means
    /// the overload policy's default applies.
    pub baseline_weight: Option<f64>,
}

impl ExerciseTemplate {
    pub fn new(
        name: impl Into<String>,
        target_sets: u32,
        target_reps: RepTarget,
        baseline_weight: Option<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            target_sets,
            target_reps,
            baseline_weight,
        }
    }
}

// ============================================================================
// Schedules and Plans
// ============================================================================

/// A single day of the weekly schedule
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DaySchedule {
    pub focus_label: String,
    pub exercises: Vec<ExerciseTemplate>,
    pub is_rest_day: bool,
}

impl DaySchedule {
    pub fn training(focus_label: impl Into<String>, exercises: Vec<ExerciseTemplate>) -> Self {
        Self {
            focus_label: focus_label.into(),
            exercises,
            is_rest_day: false,
        }
    }

    pub fn rest() -> Self {
        Self {
            focus_label: "Rest Day".into(),
            exercises: Vec::new(),
            is_rest_day: true,
        }
    }

    /// True when there is nothing to train, whatever the day was tagged
    pub fn has_no_exercises(&self) -> bool {
        self.exercises.is_empty()
    }
}

/// Ordered mapping of weekday to day schedule
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct WeeklySchedule(BTreeMap<Weekday, DaySchedule>);

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, day: Weekday, schedule: DaySchedule) -> Option<DaySchedule> {
        self.0.insert(day, schedule)
    }

    pub fn get(&self, day: Weekday) -> Option<&DaySchedule> {
        self.0.get(&day)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Weekday, &DaySchedule)> {
        self.0.iter()
    }

    pub fn weekdays(&self) -> Vec<Weekday> {
        self.0.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries not marked as rest days
    pub fn training_days(&self) -> usize {
        self.0.values().filter(|d| !d.is_rest_day).count()
    }
}

/// Shape of the generated week
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SplitType {
    FullBody,
    UpperLower,
    PushPullLegs,
    Custom,
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SplitType::FullBody => "Full Body",
            SplitType::UpperLower => "Upper/Lower",
            SplitType::PushPullLegs => "Push/Pull/Legs",
            SplitType::Custom => "Custom Split",
        };
        f.write_str(s)
    }
}

impl FromStr for SplitType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "fullbody" => Ok(SplitType::FullBody),
            "upperlower" => Ok(SplitType::UpperLower),
            "pushpulllegs" | "ppl" => Ok(SplitType::PushPullLegs),
            "custom" | "customsplit" => Ok(SplitType::Custom),
            _ => Err(Error::Parse(format!("Unknown split type: {}", s))),
        }
    }
}

/// Output of the plan generator
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GeneratedPlan {
    pub split_type: SplitType,
    pub schedule: WeeklySchedule,
    pub description: String,
}

// ============================================================================
// Workout Logs
// ============================================================================

/// One performed set
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetDetail {
    pub set_number: u32,
    pub weight: f64,
    pub reps: u32,
    pub completed: bool,
}

/// A logged exercise, append-only once written
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutLogEntry {
    pub id: Uuid,
    pub user_id: String,
    pub exercise_name: String,
    pub date: NaiveDate,
    pub logged_at: DateTime<Utc>,
    pub sets_performed: u32,
    pub reps_summary: String,
    pub weight_performed: f64,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set_detail: Vec<SetDetail>,
}
