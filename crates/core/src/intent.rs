use crate::models::Intent;

pub fn normalize_text(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

const COMPLETION_WORDS: &[&str] = &["done", "finished", "completed", "did it"];
const EXPLANATION_WORDS: &[&str] = &["how", "explain", "what is", "show me"];
const LEVEL_WORDS: &[&str] = &["beginner", "intermediate", "advanced"];
const TIME_WORDS: &[&str] = &["minute", "min", "time"];

type IntentPredicate = fn(&str) -> bool;

/// Priority-ordered dispatch table. The first predicate matching the
/// lowercased utterance decides the intent; order is the contract.
pub const INTENT_RULES: &[(IntentPredicate, Intent)] = &[
    (mentions_completion, Intent::LogCompletion),
    (asks_for_explanation, Intent::ExplainExercise),
    (mentions_level, Intent::SetLevel),
    (mentions_time, Intent::GetRoutine),
];

pub fn classify_intent(text: &str) -> Intent {
    let lower = text.trim().to_lowercase();

    for (matches, intent) in INTENT_RULES {
        if matches(&lower) {
            return *intent;
        }
    }

    Intent::General
}

fn mentions_completion(lower: &str) -> bool {
    contains_any(lower, COMPLETION_WORDS)
}

fn asks_for_explanation(lower: &str) -> bool {
    contains_any(lower, EXPLANATION_WORDS)
}

fn mentions_level(lower: &str) -> bool {
    contains_any(lower, LEVEL_WORDS)
}

fn mentions_time(lower: &str) -> bool {
    contains_any(lower, TIME_WORDS) || is_numeric_only(lower)
}

fn is_numeric_only(lower: &str) -> bool {
    !lower.is_empty() && lower.chars().all(|ch| ch.is_ascii_digit())
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}
