//! Progressive-overload resolver.
//!
//! Per exercise, independently:
//! - No history → the template's baseline (or the policy default)
//! - Last entry completed → last weight + one increment
//! - Last entry not completed → last weight unchanged
//!
//! There is no deload or plateau handling.

use crate::config::ProgressionConfig;
use crate::history::HistoryLookup;
use crate::{ExerciseTemplate, WorkoutLogEntry};
use serde::{Deserialize, Serialize};

/// Increment and fallback weight used by the resolver
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverloadPolicy {
    pub increment: f64,
    pub default_weight: f64,
}

impl Default for OverloadPolicy {
    fn default() -> Self {
        Self {
            increment: 2.5,
            default_weight: 20.0,
        }
    }
}

impl From<&ProgressionConfig> for OverloadPolicy {
    fn from(config: &ProgressionConfig) -> Self {
        Self {
            increment: config.increment_kg,
            default_weight: config.default_weight_kg,
        }
    }
}

/// Why a weight was suggested
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightBasis {
    /// No prior log for this exercise
    Baseline,
    /// Last session was completed
    Increased,
    /// Last session was not completed
    Maintained,
}

/// An exercise paired with its working weight for today
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuggestedExercise {
    #[serde(flatten)]
    pub template: ExerciseTemplate,
    pub suggested_weight: f64,
    pub basis: WeightBasis,
}

/// Suggest a weight from the latest matching log entry, if any
pub fn suggest_weight(
    template: &ExerciseTemplate,
    latest: Option<&WorkoutLogEntry>,
    policy: &OverloadPolicy,
) -> (f64, WeightBasis) {
    match latest {
        None => (
            template.baseline_weight.unwrap_or(policy.default_weight),
            WeightBasis::Baseline,
        ),
        Some(entry) if entry.completed => (
            entry.weight_performed + policy.increment,
            WeightBasis::Increased,
        ),
        Some(entry) => (entry.weight_performed, WeightBasis::Maintained),
    }
}

/// Resolve suggested weights with the default policy
pub fn resolve<H>(exercises: &[ExerciseTemplate], history: &H) -> Vec<SuggestedExercise>
where
    H: HistoryLookup + ?Sized,
{
    resolve_with(exercises, history, &OverloadPolicy::default())
}

/// Resolve suggested weights with an explicit policy
pub fn resolve_with<H>(
    exercises: &[ExerciseTemplate],
    history: &H,
    policy: &OverloadPolicy,
) -> Vec<SuggestedExercise>
where
    H: HistoryLookup + ?Sized,
{
    exercises
        .iter()
        .map(|template| {
            let (suggested_weight, basis) =
                suggest_weight(template, history.latest_for(&template.name), policy);
            tracing::debug!(
                "{}: {} kg ({:?})",
                template.name,
                suggested_weight,
                basis
            );
            SuggestedExercise {
                template: template.clone(),
                suggested_weight,
                basis,
            }
        })
        .collect()
}
