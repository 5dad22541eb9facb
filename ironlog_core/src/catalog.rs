//! Default exercise catalog.
//!
//! The catalog is an immutable lookup structure built once per process:
//! - Direct exercise lists for the base muscle-group tags
//! - Named composition rules for the derived tags (Push, Pull, ...)
//! - Fixed session templates used by the upper/lower split

use crate::types::{ExerciseTemplate, FocusTag, RepTarget};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cached default catalog - built once and shared by every generation
static DEFAULT_CATALOG: Lazy<ExerciseCatalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static ExerciseCatalog {
    &DEFAULT_CATALOG
}

/// Builds a fresh copy of the default catalog
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom catalogs.
pub fn build_default_catalog() -> ExerciseCatalog {
    build_default_catalog_internal()
}

/// Tags that own an exercise list directly
pub const DIRECT_TAGS: [FocusTag; 7] = [
    FocusTag::Chest,
    FocusTag::Back,
    FocusTag::Legs,
    FocusTag::Shoulders,
    FocusTag::Arms,
    FocusTag::Cardio,
    FocusTag::Core,
];

/// Tags whose exercises are composed from the direct lists
pub const DERIVED_TAGS: [FocusTag; 5] = [
    FocusTag::Push,
    FocusTag::Pull,
    FocusTag::UpperBody,
    FocusTag::LowerBody,
    FocusTag::FullBody,
];

/// How a composition rule selects exercises from a source list
#[derive(Clone, Debug, PartialEq)]
pub enum Pick {
    /// The first `n` exercises in table order
    First(usize),
    /// A single exercise by exact name
    Named(String),
}

/// One slice of a composition rule
#[derive(Clone, Debug, PartialEq)]
pub struct RulePart {
    pub source: FocusTag,
    pub pick: Pick,
}

/// A named derived variant, e.g. Push = Chest[..2] + Shoulders[..2] + Tricep Pushdown
///
/// Parts are concatenated in declaration order with no de-duplication, so the
/// resulting list is reproducible.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositionRule {
    pub derived: FocusTag,
    pub parts: Vec<RulePart>,
}

/// Fixed day templates used by the four-day upper/lower split
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionTemplate {
    UpperPower,
    LowerPower,
    UpperHypertrophy,
    LowerHypertrophy,
}

impl SessionTemplate {
    pub const ALL: [SessionTemplate; 4] = [
        SessionTemplate::UpperPower,
        SessionTemplate::LowerPower,
        SessionTemplate::UpperHypertrophy,
        SessionTemplate::LowerHypertrophy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SessionTemplate::UpperPower => "Upper Power",
            SessionTemplate::LowerPower => "Lower Power",
            SessionTemplate::UpperHypertrophy => "Upper Hypertrophy",
            SessionTemplate::LowerHypertrophy => "Lower Hypertrophy",
        }
    }
}

/// The complete exercise lookup structure
#[derive(Clone, Debug)]
pub struct ExerciseCatalog {
    pub groups: HashMap<FocusTag, Vec<ExerciseTemplate>>,
    pub rules: Vec<CompositionRule>,
    pub sessions: HashMap<SessionTemplate, Vec<ExerciseTemplate>>,
}

impl ExerciseCatalog {
    /// Direct exercise list for a tag (empty when the tag has none)
    pub fn group(&self, tag: FocusTag) -> &[ExerciseTemplate] {
        self.groups.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rule(&self, tag: FocusTag) -> Option<&CompositionRule> {
        self.rules.iter().find(|r| r.derived == tag)
    }

    /// Resolve a focus tag to its exercise list
    ///
    /// Rest resolves to nothing, derived tags go through their composition
    /// rule, everything else is a direct table lookup.
    pub fn exercises_for(&self, tag: FocusTag) -> Vec<ExerciseTemplate> {
        if tag == FocusTag::Rest {
            return Vec::new();
        }
        match self.rule(tag) {
            Some(rule) => self.compose(rule),
            None => self.group(tag).to_vec(),
        }
    }

    /// Exercises of a fixed session template
    pub fn session(&self, template: SessionTemplate) -> Vec<ExerciseTemplate> {
        self.sessions.get(&template).cloned().unwrap_or_default()
    }

    fn compose(&self, rule: &CompositionRule) -> Vec<ExerciseTemplate> {
        let mut out = Vec::new();
        for part in &rule.parts {
            let source = self.group(part.source);
            match &part.pick {
                Pick::First(n) => out.extend(source.iter().take(*n).cloned()),
                Pick::Named(name) => match source.iter().find(|e| &e.name == name) {
                    Some(ex) => out.push(ex.clone()),
                    None => tracing::warn!(
                        "Rule {:?} references missing exercise '{}' in {:?}",
                        rule.derived,
                        name,
                        part.source
                    ),
                },
            }
        }
        tracing::debug!("Composed {} exercises for {:?}", out.len(), rule.derived);
        out
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for tag in DIRECT_TAGS {
            match self.groups.get(&tag) {
                None => errors.push(format!("Catalog has no exercise list for {}", tag)),
                Some(list) if list.is_empty() => {
                    errors.push(format!("Exercise list for {} is empty", tag))
                }
                Some(list) => check_templates(&tag.to_string(), list, &mut errors),
            }
        }

        for tag in self.groups.keys() {
            if !DIRECT_TAGS.contains(tag) {
                errors.push(format!("{} must not have a direct exercise list", tag));
            }
        }

        for tag in DERIVED_TAGS {
            let matching = self.rules.iter().filter(|r| r.derived == tag).count();
            if matching != 1 {
                errors.push(format!(
                    "Expected exactly one composition rule for {}, found {}",
                    tag, matching
                ));
            }
        }

        for rule in &self.rules {
            if !DERIVED_TAGS.contains(&rule.derived) {
                errors.push(format!("{} cannot be a derived tag", rule.derived));
            }
            if rule.parts.is_empty() {
                errors.push(format!("Rule for {} has no parts", rule.derived));
            }
            for part in &rule.parts {
                if !DIRECT_TAGS.contains(&part.source) {
                    errors.push(format!(
                        "Rule for {} draws from non-direct tag {}",
                        rule.derived, part.source
                    ));
                    continue;
                }
                let source = self.group(part.source);
                match &part.pick {
                    Pick::First(0) => errors.push(format!(
                        "Rule for {} takes zero exercises from {}",
                        rule.derived, part.source
                    )),
                    Pick::First(n) if *n > source.len() => errors.push(format!(
                        "Rule for {} takes {} exercises from {} which has {}",
                        rule.derived,
                        n,
                        part.source,
                        source.len()
                    )),
                    Pick::Named(name) if !source.iter().any(|e| &e.name == name) => {
                        errors.push(format!(
                            "Rule for {} references non-existent exercise '{}' in {}",
                            rule.derived, name, part.source
                        ))
                    }
                    _ => {}
                }
            }
        }

        for template in SessionTemplate::ALL {
            match self.sessions.get(&template) {
                Some(list) if !list.is_empty() => {
                    check_templates(template.label(), list, &mut errors)
                }
                _ => errors.push(format!("Session template {} is missing", template.label())),
            }
        }

        errors
    }
}

fn check_templates(owner: &str, list: &[ExerciseTemplate], errors: &mut Vec<String>) {
    for ex in list {
        if ex.name.trim().is_empty() {
            errors.push(format!("{} has an exercise with an empty name", owner));
        }
        if ex.target_sets == 0 {
            errors.push(format!("{}: '{}' has zero target sets", owner, ex.name));
        }
        if let Some(w) = ex.baseline_weight {
            if !w.is_finite() || w < 0.0 {
                errors.push(format!(
                    "{}: '{}' has invalid baseline weight {}",
                    owner, ex.name, w
                ));
            }
        }
    }
}

fn ex(name: &str, sets: u32, reps: RepTarget, weight: Option<f64>) -> ExerciseTemplate {
    ExerciseTemplate::new(name, sets, reps, weight)
}

fn range(min: u32, max: u32) -> RepTarget {
    RepTarget::Range { min, max }
}

fn first(source: FocusTag, n: usize) -> RulePart {
    RulePart {
        source,
        pick: Pick::First(n),
    }
}

fn named(source: FocusTag, name: &str) -> RulePart {
    RulePart {
        source,
        pick: Pick::Named(name.into()),
    }
}

fn build_default_catalog_internal() -> ExerciseCatalog {
    let mut groups = HashMap::new();
    let mut sessions = HashMap::new();

    // ========================================================================
    // Direct exercise lists
    // ========================================================================

    groups.insert(
        FocusTag::Chest,
        vec![
            ex("Bench Press", 4, range(8, 12), Some(40.0)),
            ex("Incline Dumbbell Press", 3, range(10, 12), Some(16.0)),
            ex("Cable Fly", 3, range(12, 15), Some(10.0)),
            ex("Machine Chest Press", 3, range(10, 12), Some(30.0)),
        ],
    );

    groups.insert(
        FocusTag::Back,
        vec![
            ex("Bent Over Rows", 4, range(8, 12), Some(40.0)),
            ex("Lat Pulldown", 3, range(10, 12), Some(35.0)),
            ex("Seated Cable Row", 3, range(10, 12), Some(30.0)),
            ex("Face Pulls", 3, range(12, 15), Some(15.0)),
        ],
    );

    groups.insert(
        FocusTag::Legs,
        vec![
            ex("Squats", 4, range(8, 12), Some(60.0)),
            ex("Romanian Deadlifts", 3, range(8, 12), Some(50.0)),
            ex("Leg Press", 3, range(10, 15), Some(100.0)),
            ex("Leg Curls", 3, range(12, 15), Some(25.0)),
            ex("Calf Raises", 3, range(15, 20), Some(40.0)),
        ],
    );

    groups.insert(
        FocusTag::Shoulders,
        vec![
            ex("Overhead Press", 3, range(8, 12), Some(30.0)),
            ex("Lateral Raises", 3, range(12, 15), Some(6.0)),
            ex("Rear Delt Fly", 3, range(12, 15), Some(6.0)),
            ex("Arnold Press", 3, range(10, 12), Some(12.0)),
        ],
    );

    groups.insert(
        FocusTag::Arms,
        vec![
            ex("Barbell Curl", 3, range(10, 12), Some(20.0)),
            ex("Tricep Pushdown", 3, range(10, 12), Some(20.0)),
            ex("Hammer Curl", 3, range(10, 12), Some(10.0)),
            ex("Skull Crushers", 3, range(10, 12), Some(20.0)),
        ],
    );

    groups.insert(
        FocusTag::Cardio,
        vec![
            ex("Kettlebell Swings", 4, range(15, 20), Some(16.0)),
            ex("Rowing Intervals", 6, RepTarget::Fixed(1), None),
            ex("Jump Rope", 5, RepTarget::Amrap, None),
        ],
    );

    groups.insert(
        FocusTag::Core,
        vec![
            ex("Plank", 3, RepTarget::Amrap, None),
            ex("Hanging Leg Raises", 3, range(10, 15), None),
            ex("Cable Crunch", 3, range(12, 15), Some(25.0)),
            ex("Russian Twists", 3, RepTarget::Fixed(20), Some(5.0)),
        ],
    );

    // ========================================================================
    // Composition rules for derived tags
    // ========================================================================

    let rules = vec![
        CompositionRule {
            derived: FocusTag::Push,
            parts: vec![
                first(FocusTag::Chest, 2),
                first(FocusTag::Shoulders, 2),
                named(FocusTag::Arms, "Tricep Pushdown"),
            ],
        },
        CompositionRule {
            derived: FocusTag::Pull,
            parts: vec![
                first(FocusTag::Back, 3),
                named(FocusTag::Arms, "Barbell Curl"),
                named(FocusTag::Shoulders, "Rear Delt Fly"),
            ],
        },
        CompositionRule {
            derived: FocusTag::UpperBody,
            parts: vec![
                first(FocusTag::Chest, 2),
                first(FocusTag::Back, 2),
                first(FocusTag::Shoulders, 1),
            ],
        },
        CompositionRule {
            derived: FocusTag::LowerBody,
            parts: vec![first(FocusTag::Legs, 4), first(FocusTag::Core, 1)],
        },
        CompositionRule {
            derived: FocusTag::FullBody,
            parts: vec![
                named(FocusTag::Legs, "Squats"),
                named(FocusTag::Chest, "Bench Press"),
                named(FocusTag::Back, "Bent Over Rows"),
                named(FocusTag::Shoulders, "Overhead Press"),
                named(FocusTag::Legs, "Romanian Deadlifts"),
                named(FocusTag::Core, "Plank"),
            ],
        },
    ];

    // ========================================================================
    // Upper/lower session templates
    // ========================================================================

    sessions.insert(
        SessionTemplate::UpperPower,
        vec![
            ex("Bench Press", 4, range(5, 8), Some(45.0)),
            ex("Bent Over Rows", 4, range(5, 8), Some(45.0)),
            ex("Overhead Press", 3, range(6, 10), Some(30.0)),
        ],
    );

    sessions.insert(
        SessionTemplate::LowerPower,
        vec![
            ex("Squats", 4, range(5, 8), Some(70.0)),
            ex("Romanian Deadlifts", 3, range(6, 10), Some(55.0)),
            ex("Calf Raises", 3, range(15, 20), Some(40.0)),
        ],
    );

    sessions.insert(
        SessionTemplate::UpperHypertrophy,
        vec![
            ex("Incline Bench", 3, range(8, 12), Some(35.0)),
            ex("Pullups", 3, RepTarget::Amrap, None),
            ex("Seated Cable Row", 3, range(10, 12), Some(30.0)),
            ex("Lateral Raises", 3, range(12, 15), Some(6.0)),
        ],
    );

    sessions.insert(
        SessionTemplate::LowerHypertrophy,
        vec![
            ex("Deadlift", 3, range(5, 8), Some(80.0)),
            ex("Leg Press", 3, range(10, 15), Some(100.0)),
            ex("Leg Curls", 3, range(12, 15), Some(25.0)),
        ],
    );

    ExerciseCatalog {
        groups,
        rules,
        sessions,
    }
}
