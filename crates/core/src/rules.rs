use crate::models::FitnessLevel;

/// Buckets a raw minute value into {15, 30, 45}. Missing or negative input
/// falls back to the shortest workout rather than failing the turn.
pub fn normalize_time_budget(minutes: Option<i64>) -> u16 {
    let Some(minutes) = minutes else {
        return 15;
    };

    if minutes < 0 {
        15
    } else if minutes <= 15 {
        15
    } else if minutes <= 30 {
        30
    } else {
        45
    }
}

/// Case-insensitive substring normalization. "beginner" wins when both level
/// words appear; "advanced" maps down to intermediate, the hardest tier the
/// routine library supports.
pub fn normalize_fitness_level(raw: Option<&str>) -> FitnessLevel {
    let Some(raw) = raw else {
        return FitnessLevel::Beginner;
    };

    let lower = raw.trim().to_lowercase();
    if lower.contains("beginner") {
        FitnessLevel::Beginner
    } else if lower.contains("intermediate") || lower.contains("advanced") {
        FitnessLevel::Intermediate
    } else {
        FitnessLevel::Beginner
    }
}

/// Warmup threshold applies to the raw duration, not the normalized bucket.
pub fn should_include_warmup(minutes: i64) -> bool {
    minutes >= 20
}

pub fn exercise_count(level: FitnessLevel, minutes: Option<i64>) -> u8 {
    let bucket = normalize_time_budget(minutes);

    match (level, bucket) {
        (FitnessLevel::Beginner, 15) => 4,
        (FitnessLevel::Beginner, 30) => 6,
        (FitnessLevel::Beginner, _) => 8,
        (FitnessLevel::Intermediate, 15) => 4,
        (FitnessLevel::Intermediate, 30) => 5,
        (FitnessLevel::Intermediate, _) => 7,
    }
}
