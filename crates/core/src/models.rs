use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
}

impl FitnessLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    SetLevel,
    GetRoutine,
    ExplainExercise,
    LogCompletion,
    General,
}

/// A rep count or a timed hold, never both. The catalog stores the display
/// detail pre-rendered ("10 reps", "30 seconds").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Prescription {
    Reps(&'static str),
    Timed(&'static str),
}

impl Prescription {
    pub fn detail(self) -> &'static str {
        match self {
            Self::Reps(detail) => detail,
            Self::Timed(detail) => detail,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Exercise {
    pub id: &'static str,
    pub name: &'static str,
    pub prescription: Prescription,
    pub level: FitnessLevel,
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnRecord {
    pub at: DateTime<Utc>,
    pub user_text: String,
    pub reply_text: String,
    pub intent: Intent,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Session {
    pub fitness_level: Option<FitnessLevel>,
    pub time_budget_minutes: Option<i64>,
    pub current_routine: Option<Vec<&'static str>>,
    pub workout_count: u64,
    pub turns: Vec<TurnRecord>,
}
