//! Today's workout view.

use crate::history::HistoryLookup;
use crate::overload::{resolve_with, OverloadPolicy, SuggestedExercise};
use crate::{GeneratedPlan, Weekday};
use serde::{Deserialize, Serialize};

pub const REST_DAY_MESSAGE: &str = "Rest Day! Enjoy your recovery.";

/// What the user should do on a given weekday
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TodayWorkout {
    pub day: Weekday,
    pub is_rest_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub exercises: Vec<SuggestedExercise>,
}

impl TodayWorkout {
    fn rest(day: Weekday) -> Self {
        Self {
            day,
            is_rest_day: true,
            focus_label: None,
            message: Some(REST_DAY_MESSAGE.into()),
            exercises: Vec::new(),
        }
    }
}

/// Assemble the view for `day`
///
/// A day that is missing from the schedule or has no exercises is a rest
/// day and the resolver is not consulted.
pub fn assemble_today<H>(
    plan: &GeneratedPlan,
    day: Weekday,
    history: &H,
    policy: &OverloadPolicy,
) -> TodayWorkout
where
    H: HistoryLookup + ?Sized,
{
    let Some(schedule) = plan.schedule.get(day) else {
        tracing::info!("{} is not in the schedule; rest day", day);
        return TodayWorkout::rest(day);
    };

    if schedule.has_no_exercises() {
        tracing::info!("{} ({}) has no exercises; rest day", day, schedule.focus_label);
        return TodayWorkout::rest(day);
    }

    TodayWorkout {
        day,
        is_rest_day: false,
        focus_label: Some(schedule.focus_label.clone()),
        message: None,
        exercises: resolve_with(&schedule.exercises, history, policy),
    }
}
