#![forbid(unsafe_code)]

//! Core domain model and business logic for the Ironlog workout tracker.
//!
//! This crate provides:
//! - Domain types (weekdays, focus tags, exercise templates, schedules, logs)
//! - The exercise catalog with named composition rules
//! - Plan request validation and the weekly plan generator
//! - The progressive-overload resolver and today's-workout assembler
//! - Set-log aggregation
//! - Persistence (append-only log, CSV archive, stored plan)

pub mod types;
pub mod error;
pub mod request;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod generator;
pub mod history;
pub mod overload;
pub mod aggregate;
pub mod today;
pub mod wal;
pub mod csv_rollup;
pub mod plan_store;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use request::{Goal, Level, PlanRequest};
pub use catalog::{build_default_catalog, get_default_catalog, ExerciseCatalog};
pub use config::Config;
pub use generator::{generate, generate_with};
pub use history::{load_log_history, HistoryLookup, LogHistory};
pub use overload::{resolve, resolve_with, OverloadPolicy, SuggestedExercise, WeightBasis};
pub use aggregate::{validate_weight, LoggedExercise, SetSummary};
pub use today::{assemble_today, TodayWorkout};
pub use wal::{JsonlSink, LogSink};
pub use plan_store::StoredPlan;
