use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use coach_core::{
    classify_intent, exercise_count, format_routine, normalize_text, select_routine,
    should_include_warmup, verify_catalog, FitnessLevel, Intent, Session, TurnRecord,
};
use coach_llm::ExplainerClient;
use coach_observability::AppMetrics;
use coach_storage::CounterRepository;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, instrument};

const MAX_TURN_HISTORY: usize = 40;

static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("digit pattern"));

/// Per-session dialog engine. Owns the session state outright; one utterance
/// is processed to completion before the next.
pub struct CoachAgent<S>
where
    S: CounterRepository,
{
    session: Session,
    explainer: Arc<ExplainerClient>,
    store: Arc<S>,
    metrics: Arc<AppMetrics>,
}

impl<S> CoachAgent<S>
where
    S: CounterRepository,
{
    pub async fn new(
        explainer: Arc<ExplainerClient>,
        store: Arc<S>,
        metrics: Arc<AppMetrics>,
    ) -> Result<Self> {
        verify_catalog()?;
        let workout_count = store.load_count().await?;

        Ok(Self {
            session: Session {
                workout_count,
                ..Session::default()
            },
            explainer,
            store,
            metrics,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    #[instrument(skip(self, text))]
    pub async fn handle_turn(&mut self, text: &str) -> Result<String> {
        let started = Instant::now();
        self.metrics.inc_turn();

        let normalized = normalize_text(text);
        let intent = classify_intent(&normalized);

        let reply = match intent {
            Intent::SetLevel => self.handle_set_level(&normalized),
            Intent::GetRoutine => self.handle_get_routine(&normalized),
            Intent::ExplainExercise => self.handle_explain(&normalized).await?,
            Intent::LogCompletion => self.handle_log_completion().await?,
            Intent::General => self.handle_general(),
        };

        self.record_turn(&normalized, &reply, intent);
        self.metrics.observe_latency(started.elapsed());
        info!(
            intent = ?intent,
            level_known = self.session.fitness_level.is_some(),
            time_known = self.session.time_budget_minutes.is_some(),
            workout_count = self.session.workout_count,
            "turn handled"
        );

        Ok(reply)
    }

    fn handle_set_level(&mut self, text: &str) -> String {
        let lower = text.to_lowercase();

        // Narrower than the normalizer on purpose: only the two literal
        // levels count as an answer here.
        if lower.contains("beginner") {
            self.session.fitness_level = Some(FitnessLevel::Beginner);
            "Great! How much time do you have today? (15, 30, or 45 minutes)".to_string()
        } else if lower.contains("intermediate") {
            self.session.fitness_level = Some(FitnessLevel::Intermediate);
            "Awesome! How much time do you have today? (15, 30, or 45 minutes)".to_string()
        } else {
            self.metrics.inc_clarification();
            "I didn't catch that. Are you a beginner or intermediate exerciser?".to_string()
        }
    }

    fn handle_get_routine(&mut self, text: &str) -> String {
        let Some(minutes) = extract_minutes(text) else {
            self.metrics.inc_clarification();
            return "How many minutes do you have? (e.g., 15, 30, or 45)".to_string();
        };

        let Some(level) = self.session.fitness_level else {
            // The stated minutes are dropped, not queued; the user restates
            // them once the level is known.
            self.metrics.inc_clarification();
            return "First, let me know: are you a beginner or intermediate exerciser?".to_string();
        };

        self.session.time_budget_minutes = Some(minutes);
        let ids = select_routine(level, minutes);
        self.session.current_routine = Some(ids.to_vec());

        debug!(
            minutes,
            level = level.as_str(),
            selected = ids.len(),
            target_count = exercise_count(level, Some(minutes)),
            warmup = should_include_warmup(minutes),
            "routine generated"
        );

        let routine_text = format_routine(ids, minutes);
        format!(
            "Perfect! Here's your {minutes}-minute {} workout:\n\n{routine_text}\n\nWant me to explain any exercise? Just ask!",
            level.as_str()
        )
    }

    async fn handle_explain(&self, text: &str) -> Result<String> {
        self.metrics.inc_explanation();
        self.explainer.explain(text).await
    }

    async fn handle_log_completion(&mut self) -> Result<String> {
        let next = self.session.workout_count + 1;
        self.store.save_count(next).await?;
        self.session.workout_count = next;
        self.metrics.inc_completion();

        Ok(completion_message(next))
    }

    fn handle_general(&self) -> String {
        if self.session.fitness_level.is_none() {
            self.metrics.inc_clarification();
            "Welcome! Are you a beginner or intermediate exerciser?".to_string()
        } else if self.session.time_budget_minutes.is_none() {
            self.metrics.inc_clarification();
            "How much time do you have today? (15, 30, or 45 minutes)".to_string()
        } else {
            "I'm here to help! You can ask me to explain exercises or let me know when you're done!"
                .to_string()
        }
    }

    fn record_turn(&mut self, user_text: &str, reply_text: &str, intent: Intent) {
        self.session.turns.push(TurnRecord {
            at: Utc::now(),
            user_text: user_text.to_string(),
            reply_text: reply_text.to_string(),
            intent,
        });

        if self.session.turns.len() > MAX_TURN_HISTORY {
            let keep_from = self.session.turns.len() - MAX_TURN_HISTORY;
            self.session.turns = self.session.turns.split_off(keep_from);
        }
    }
}

fn extract_minutes(text: &str) -> Option<i64> {
    // First run of digits wins; an absurdly long run clamps high and the
    // bucketing caps it anyway.
    FIRST_NUMBER
        .find(text)
        .map(|found| found.as_str().parse::<i64>().unwrap_or(i64::MAX))
}

fn completion_message(count: u64) -> String {
    match (count.saturating_sub(1)) % 3 {
        0 => format!("Awesome! That's workout #{count} this week. Keep going! 💪"),
        1 => format!("Amazing work! You've completed {count} workouts. You're crushing it! 🔥"),
        _ => format!("Yes! Workout #{count} in the books! Consistency is key! 🎯"),
    }
}
