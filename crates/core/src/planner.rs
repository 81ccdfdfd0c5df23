use serde::Serialize;

use crate::catalog::{find_exercise, select_routine};
use crate::models::FitnessLevel;
use crate::rules::{exercise_count, normalize_time_budget, should_include_warmup};

/// Renders the chat-facing exercise list. The repeat instruction keys off the
/// session's recorded raw minutes, not the selector's capped bucket.
pub fn format_routine(ids: &[&str], recorded_minutes: i64) -> String {
    let mut text = String::new();

    for (position, id) in ids.iter().enumerate() {
        if let Some(exercise) = find_exercise(id) {
            text.push_str(&format!(
                "{}. {} - {}\n",
                position + 1,
                exercise.name,
                exercise.prescription.detail()
            ));
        }
    }

    if recorded_minutes >= 20 {
        text.push_str("\nRepeat 2x for a complete workout!");
    }

    text
}

#[derive(Debug, Clone, Serialize)]
pub struct PlannedExercise {
    pub id: &'static str,
    pub name: &'static str,
    pub detail: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoutinePlan {
    pub level: FitnessLevel,
    pub requested_minutes: i64,
    pub normalized_minutes: u16,
    pub include_warmup: bool,
    pub repeat_twice: bool,
    pub target_exercise_count: u8,
    pub exercises: Vec<PlannedExercise>,
}

/// One-shot plan for non-chat surfaces. `target_exercise_count` is the
/// decision-rule target and may disagree with `exercises.len()`; the routine
/// table stays authoritative for what the user performs.
pub fn build_routine_plan(level: FitnessLevel, minutes: i64) -> RoutinePlan {
    let exercises = select_routine(level, minutes)
        .iter()
        .filter_map(|id| find_exercise(id))
        .map(|exercise| PlannedExercise {
            id: exercise.id,
            name: exercise.name,
            detail: exercise.prescription.detail(),
        })
        .collect();

    RoutinePlan {
        level,
        requested_minutes: minutes,
        normalized_minutes: normalize_time_budget(Some(minutes)),
        include_warmup: should_include_warmup(minutes),
        repeat_twice: minutes >= 20,
        target_exercise_count: exercise_count(level, Some(minutes)),
        exercises,
    }
}
