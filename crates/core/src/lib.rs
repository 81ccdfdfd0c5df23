pub mod catalog;
pub mod intent;
pub mod models;
pub mod planner;
pub mod rules;

pub use catalog::{find_exercise, select_routine, verify_catalog, CatalogError, CATALOG, ROUTINES};
pub use intent::{classify_intent, normalize_text, INTENT_RULES};
pub use models::*;
pub use planner::{build_routine_plan, format_routine, PlannedExercise, RoutinePlan};
pub use rules::{
    exercise_count, normalize_fitness_level, normalize_time_budget, should_include_warmup,
};
