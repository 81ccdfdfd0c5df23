use thiserror::Error;

use crate::models::{Exercise, FitnessLevel, Prescription};

pub const CATALOG: &[Exercise] = &[
    Exercise {
        id: "jumping_jacks",
        name: "Jumping Jacks",
        prescription: Prescription::Timed("2 minutes"),
        level: FitnessLevel::Beginner,
    },
    Exercise {
        id: "bodyweight_squats",
        name: "Bodyweight Squats",
        prescription: Prescription::Reps("10 reps"),
        level: FitnessLevel::Beginner,
    },
    Exercise {
        id: "modified_pushups",
        name: "Push-ups (modified)",
        prescription: Prescription::Reps("5 reps"),
        level: FitnessLevel::Beginner,
    },
    Exercise {
        id: "plank",
        name: "Plank",
        prescription: Prescription::Timed("30 seconds"),
        level: FitnessLevel::Beginner,
    },
    Exercise {
        id: "lunges",
        name: "Lunges",
        prescription: Prescription::Reps("10 reps per leg"),
        level: FitnessLevel::Beginner,
    },
    Exercise {
        id: "mountain_climbers",
        name: "Mountain Climbers",
        prescription: Prescription::Timed("1 minute"),
        level: FitnessLevel::Beginner,
    },
    Exercise {
        id: "burpees",
        name: "Burpees",
        prescription: Prescription::Reps("8 reps"),
        level: FitnessLevel::Intermediate,
    },
    Exercise {
        id: "regular_pushups",
        name: "Push-ups (regular)",
        prescription: Prescription::Reps("15 reps"),
        level: FitnessLevel::Intermediate,
    },
    Exercise {
        id: "jump_squats",
        name: "Jump Squats",
        prescription: Prescription::Reps("12 reps"),
        level: FitnessLevel::Intermediate,
    },
    Exercise {
        id: "plank_60",
        name: "Plank",
        prescription: Prescription::Timed("60 seconds"),
        level: FitnessLevel::Intermediate,
    },
    Exercise {
        id: "high_knees",
        name: "High Knees",
        prescription: Prescription::Timed("2 minutes"),
        level: FitnessLevel::Intermediate,
    },
];

const BEGINNER_15: &[&str] = &[
    "jumping_jacks",
    "bodyweight_squats",
    "modified_pushups",
    "plank",
];

const BEGINNER_30: &[&str] = &[
    "jumping_jacks",
    "bodyweight_squats",
    "modified_pushups",
    "plank",
    "lunges",
    "mountain_climbers",
];

const INTERMEDIATE_30: &[&str] = &[
    "high_knees",
    "jump_squats",
    "regular_pushups",
    "burpees",
    "plank_60",
];

/// (intermediate, 15) and every 45-minute slot are deliberately absent;
/// unsupported pairs fall back to the (beginner, 15) routine.
pub const ROUTINES: &[((FitnessLevel, u16), &[&str])] = &[
    ((FitnessLevel::Beginner, 15), BEGINNER_15),
    ((FitnessLevel::Beginner, 30), BEGINNER_30),
    ((FitnessLevel::Intermediate, 30), INTERMEDIATE_30),
];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("routine ({level}, {minutes}min) references unknown exercise '{id}'")]
    UnknownExercise {
        level: &'static str,
        minutes: u16,
        id: &'static str,
    },
    #[error("catalog defines exercise '{id}' more than once")]
    DuplicateExercise { id: &'static str },
}

pub fn find_exercise(id: &str) -> Option<&'static Exercise> {
    CATALOG.iter().find(|exercise| exercise.id == id)
}

/// Cross-reference check run at engine construction; the static tables are
/// trusted afterwards.
pub fn verify_catalog() -> Result<(), CatalogError> {
    for (index, exercise) in CATALOG.iter().enumerate() {
        if CATALOG[..index].iter().any(|earlier| earlier.id == exercise.id) {
            return Err(CatalogError::DuplicateExercise { id: exercise.id });
        }
    }

    for ((level, minutes), ids) in ROUTINES {
        for &id in *ids {
            if find_exercise(id).is_none() {
                return Err(CatalogError::UnknownExercise {
                    level: level.as_str(),
                    minutes: *minutes,
                    id,
                });
            }
        }
    }

    Ok(())
}

/// Buckets the raw minutes into this table's own {15, 30} supported slots
/// (narrower than the decision-rule buckets) and falls back to the
/// (beginner, 15) routine for any pair without an entry.
pub fn select_routine(level: FitnessLevel, minutes: i64) -> &'static [&'static str] {
    let bucket: u16 = if minutes <= 15 { 15 } else { 30 };

    ROUTINES
        .iter()
        .find(|((entry_level, entry_minutes), _)| *entry_level == level && *entry_minutes == bucket)
        .map(|(_, ids)| *ids)
        .unwrap_or(BEGINNER_15)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_consistent() {
        verify_catalog().unwrap();
    }

    #[test]
    fn selects_exact_entries() {
        assert_eq!(select_routine(FitnessLevel::Beginner, 15).len(), 4);
        assert_eq!(select_routine(FitnessLevel::Beginner, 20).len(), 6);
        assert_eq!(select_routine(FitnessLevel::Intermediate, 30).len(), 5);
    }

    #[test]
    fn unsupported_pairs_fall_back_to_beginner_short() {
        let fallback = select_routine(FitnessLevel::Beginner, 15);
        assert_eq!(select_routine(FitnessLevel::Intermediate, 10), fallback);
        assert_eq!(select_routine(FitnessLevel::Intermediate, 15), fallback);
    }

    #[test]
    fn long_requests_cap_at_the_thirty_minute_routine() {
        assert_eq!(
            select_routine(FitnessLevel::Beginner, 45),
            select_routine(FitnessLevel::Beginner, 30)
        );
        assert_eq!(
            select_routine(FitnessLevel::Intermediate, 90),
            select_routine(FitnessLevel::Intermediate, 30)
        );
    }

    #[test]
    fn selection_is_never_empty() {
        for level in [FitnessLevel::Beginner, FitnessLevel::Intermediate] {
            for minutes in [-3_i64, 0, 15, 20, 30, 45, 1000] {
                assert!(!select_routine(level, minutes).is_empty());
            }
        }
    }
}
