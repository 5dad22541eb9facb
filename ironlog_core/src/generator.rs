//! Weekly plan generator.
//!
//! Maps a [`PlanRequest`] to a [`GeneratedPlan`]:
//! - Custom schedule → one entry per supplied day, tags resolved via the catalog
//! - 1-3 days → full body on Monday/Wednesday/Friday
//! - 4 days → upper/lower (power + hypertrophy)
//! - 5+ days → push/pull/legs rotation
//!
//! Generation is pure: no clock, no randomness, no validation. Callers are
//! expected to have run [`PlanRequest::validate`] beforehand.

use crate::catalog::{get_default_catalog, ExerciseCatalog, SessionTemplate};
use crate::{
    DaySchedule, FocusTag, GeneratedPlan, PlanRequest, SplitType, Weekday, WeeklySchedule,
};
use std::collections::BTreeMap;

/// Training days used by the full-body split, in order
const FULL_BODY_DAYS: [Weekday; 3] = [Weekday::Monday, Weekday::Wednesday, Weekday::Friday];

/// Fixed four-day upper/lower layout
const UPPER_LOWER_DAYS: [(Weekday, SessionTemplate); 4] = [
    (Weekday::Monday, SessionTemplate::UpperPower),
    (Weekday::Tuesday, SessionTemplate::LowerPower),
    (Weekday::Thursday, SessionTemplate::UpperHypertrophy),
    (Weekday::Friday, SessionTemplate::LowerHypertrophy),
];

/// Push/pull/legs rotation. Sunday is never scheduled.
const PPL_ROTATION: [(Weekday, FocusTag); 6] = [
    (Weekday::Monday, FocusTag::Push),
    (Weekday::Tuesday, FocusTag::Pull),
    (Weekday::Wednesday, FocusTag::Legs),
    (Weekday::Thursday, FocusTag::Push),
    (Weekday::Friday, FocusTag::Pull),
    (Weekday::Saturday, FocusTag::Legs),
];

/// Generate a plan against the default catalog
pub fn generate(request: &PlanRequest) -> GeneratedPlan {
    generate_with(get_default_catalog(), request)
}

/// Generate a plan against an explicit catalog
pub fn generate_with(catalog: &ExerciseCatalog, request: &PlanRequest) -> GeneratedPlan {
    let days = request.days_per_week;

    let (split_type, schedule) = match request.custom_schedule {
        Some(ref custom) => (SplitType::Custom, custom_split(catalog, custom)),
        None if days <= 3 => (SplitType::FullBody, full_body_split(catalog, days)),
        None if days == 4 => (SplitType::UpperLower, upper_lower_split(catalog)),
        None => (SplitType::PushPullLegs, push_pull_legs_split(catalog, days)),
    };

    tracing::info!(
        "Generated {} plan with {} scheduled days ({} training)",
        split_type,
        schedule.len(),
        schedule.training_days()
    );

    GeneratedPlan {
        split_type,
        schedule,
        description: format!(
            "A {}-day {} routine focused on {}.",
            days, split_type, request.goal
        ),
    }
}

fn full_body_split(catalog: &ExerciseCatalog, days: u8) -> WeeklySchedule {
    let exercises = catalog.exercises_for(FocusTag::FullBody);
    let mut schedule = WeeklySchedule::new();

    // days <= 3 in this branch, so the fixed sequence always has room
    for day in FULL_BODY_DAYS.iter().take(days as usize) {
        schedule.insert(
            *day,
            DaySchedule::training(FocusTag::FullBody.label(), exercises.clone()),
        );
    }
    schedule
}

fn upper_lower_split(catalog: &ExerciseCatalog) -> WeeklySchedule {
    let mut schedule = WeeklySchedule::new();
    for (day, template) in UPPER_LOWER_DAYS {
        schedule.insert(
            day,
            DaySchedule::training(template.label(), catalog.session(template)),
        );
    }
    schedule
}

fn push_pull_legs_split(catalog: &ExerciseCatalog, days: u8) -> WeeklySchedule {
    let scheduled = if days == 6 { 6 } else { 5 };
    if days > 6 {
        tracing::warn!(
            "Push/pull/legs covers at most 6 days; {} requested, scheduling {}",
            days,
            scheduled
        );
    }

    let mut schedule = WeeklySchedule::new();
    for (day, tag) in PPL_ROTATION.iter().take(scheduled) {
        schedule.insert(
            *day,
            DaySchedule::training(tag.label(), catalog.exercises_for(*tag)),
        );
    }
    schedule
}

fn custom_split(catalog: &ExerciseCatalog, custom: &BTreeMap<String, String>) -> WeeklySchedule {
    let mut schedule = WeeklySchedule::new();

    for (key, focus) in custom {
        let Some(day) = Weekday::from_day_key(key) else {
            tracing::warn!("Skipping unrecognised day key '{}'", key);
            continue;
        };

        let entry = match focus.parse::<FocusTag>() {
            Ok(FocusTag::Rest) => DaySchedule::rest(),
            Ok(tag) => DaySchedule::training(tag.label(), catalog.exercises_for(tag)),
            Err(_) => {
                // Lenient: unknown focus keeps its label but trains nothing
                tracing::warn!(
                    "Unknown focus '{}' on {}; scheduling no exercises",
                    focus,
                    day
                );
                DaySchedule::training(focus.trim(), Vec::new())
            }
        };

        if schedule.insert(day, entry).is_some() {
            tracing::warn!("Day key '{}' overwrote an earlier entry for {}", key, day);
        }
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Goal, Level};

    fn request(days: u8) -> PlanRequest {
        PlanRequest::new(Goal::MuscleGain, Level::Intermediate, days, 60)
    }

    #[test]
    fn test_full_body_for_one_to_three_days() {
        let catalog = get_default_catalog();
        let template = catalog.exercises_for(FocusTag::FullBody);

        for days in 1..=3u8 {
            let plan = generate(&request(days));
            assert_eq!(plan.split_type, SplitType::FullBody);
            assert_eq!(plan.schedule.training_days(), days as usize);
            assert_eq!(plan.schedule.len(), days as usize);
            for (_, day) in plan.schedule.iter() {
                assert_eq!(day.exercises.len(), 6);
                assert_eq!(day.exercises, template);
            }
        }
    }

    #[test]
    fn test_full_body_weekdays() {
        let plan = generate(&request(3));
        assert_eq!(
            plan.schedule.weekdays(),
            vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday]
        );
    }

    #[test]
    fn test_upper_lower_for_four_days() {
        let plan = generate(&request(4));
        assert_eq!(plan.split_type, SplitType::UpperLower);
        assert_eq!(
            plan.schedule.weekdays(),
            vec![
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Thursday,
                Weekday::Friday
            ]
        );

        let mut labels: Vec<_> = plan
            .schedule
            .iter()
            .map(|(_, d)| {
                assert!(!d.is_rest_day);
                assert!(!d.exercises.is_empty());
                d.focus_label.clone()
            })
            .collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 4, "focus labels should be distinct");
    }

    #[test]
    fn test_ppl_six_days_repeats() {
        let catalog = get_default_catalog();
        let plan = generate(&request(6));
        assert_eq!(plan.split_type, SplitType::PushPullLegs);
        assert_eq!(plan.schedule.len(), 6);

        let monday = plan.schedule.get(Weekday::Monday).unwrap();
        let thursday = plan.schedule.get(Weekday::Thursday).unwrap();
        assert_eq!(monday.exercises, thursday.exercises);
        assert_eq!(monday.focus_label, "Push");

        let saturday = plan.schedule.get(Weekday::Saturday).unwrap();
        assert_eq!(saturday.focus_label, "Legs");
        assert_eq!(saturday.exercises, catalog.exercises_for(FocusTag::Legs));
        assert!(plan.schedule.get(Weekday::Sunday).is_none());
    }

    #[test]
    fn test_ppl_five_days_has_no_saturday() {
        let plan = generate(&request(5));
        assert_eq!(plan.schedule.training_days(), 5);
        assert!(plan.schedule.get(Weekday::Saturday).is_none());
        assert_eq!(
            plan.schedule.get(Weekday::Friday).unwrap().focus_label,
            "Pull"
        );
    }

    #[test]
    fn test_seven_days_drops_weekend() {
        // Only the six-day request schedules Saturday; Sunday never appears.
        let plan = generate(&request(7));
        assert_eq!(plan.split_type, SplitType::PushPullLegs);
        assert_eq!(plan.schedule.len(), 5);
        assert!(plan.schedule.get(Weekday::Saturday).is_none());
        assert!(plan.schedule.get(Weekday::Sunday).is_none());
    }

    #[test]
    fn test_custom_schedule_maps_day_keys() {
        let req = request(3).with_custom_schedule([
            ("Day 1", "Chest"),
            ("Day 2", "Legs"),
            ("Day 3", "Rest"),
        ]);
        let plan = generate(&req);
        assert_eq!(plan.split_type, SplitType::Custom);

        let monday = plan.schedule.get(Weekday::Monday).unwrap();
        assert_eq!(monday.focus_label, "Chest");
        assert!(!monday.exercises.is_empty());

        let tuesday = plan.schedule.get(Weekday::Tuesday).unwrap();
        assert_eq!(tuesday.focus_label, "Legs");
        assert!(!tuesday.exercises.is_empty());

        let wednesday = plan.schedule.get(Weekday::Wednesday).unwrap();
        assert!(wednesday.exercises.is_empty());
        assert!(wednesday.is_rest_day);
        assert_eq!(wednesday.focus_label, "Rest Day");
    }

    #[test]
    fn test_custom_weekday_keys_pass_through() {
        let req = request(2).with_custom_schedule([("Saturday", "Push"), ("Sunday", "Cardio")]);
        let plan = generate(&req);
        assert_eq!(
            plan.schedule.weekdays(),
            vec![Weekday::Saturday, Weekday::Sunday]
        );
        assert_eq!(
            plan.schedule.get(Weekday::Saturday).unwrap().exercises,
            get_default_catalog().exercises_for(FocusTag::Push)
        );
    }

    #[test]
    fn test_custom_unknown_focus_resolves_empty() {
        let req = request(2).with_custom_schedule([("Day 1", "Chest"), ("Day 2", "Yoga")]);
        let plan = generate(&req);

        let tuesday = plan.schedule.get(Weekday::Tuesday).unwrap();
        assert_eq!(tuesday.focus_label, "Yoga");
        assert!(tuesday.has_no_exercises());
        assert!(!tuesday.is_rest_day);
    }

    #[test]
    fn test_custom_rest_days_are_exactly_rest_tags() {
        let req = request(4).with_custom_schedule([
            ("Day 1", "Upper Body"),
            ("Day 2", "rest"),
            ("Day 4", "Lower Body"),
            ("Day 5", "Rest"),
        ]);
        let plan = generate(&req);
        let rest: Vec<_> = plan
            .schedule
            .iter()
            .filter(|(_, d)| d.is_rest_day)
            .map(|(day, _)| *day)
            .collect();
        assert_eq!(rest, vec![Weekday::Tuesday, Weekday::Friday]);
    }

    #[test]
    fn test_custom_rest_day_label_is_rest() {
        let req = request(2).with_custom_schedule([("Monday", "Chest"), ("Tuesday", "Rest Day")]);
        let plan = generate(&req);

        let tuesday = plan.schedule.get(Weekday::Tuesday).unwrap();
        assert!(tuesday.is_rest_day);
        assert_eq!(tuesday.focus_label, "Rest Day");
        assert!(tuesday.has_no_exercises());
    }

    #[test]
    fn test_description_mentions_days_split_and_goal() {
        let plan = generate(&request(4));
        assert_eq!(
            plan.description,
            "A 4-day Upper/Lower routine focused on Muscle Gain."
        );
    }

    #[test]
    fn test_generation_is_idempotent() {
        for days in 1..=7u8 {
            let a = generate(&request(days));
            let b = generate(&request(days));
            assert_eq!(a, b);
        }

        let custom = request(2).with_custom_schedule([("Day 1", "Pull"), ("Day 2", "Arms")]);
        assert_eq!(generate(&custom), generate(&custom));
    }

    #[test]
    fn test_explicit_catalog_is_used() {
        let mut catalog = crate::catalog::build_default_catalog();
        catalog.groups.insert(
            FocusTag::Chest,
            vec![crate::ExerciseTemplate::new(
                "Floor Press",
                3,
                crate::RepTarget::Fixed(10),
                Some(30.0),
            )],
        );

        let req = request(1).with_custom_schedule([("Day 1", "Chest")]);
        let plan = generate_with(&catalog, &req);
        let monday = plan.schedule.get(Weekday::Monday).unwrap();
        assert_eq!(monday.exercises.len(), 1);
        assert_eq!(monday.exercises[0].name, "Floor Press");
    }
}
