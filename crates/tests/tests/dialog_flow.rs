use std::sync::Arc;

use coach_agents::CoachAgent;
use coach_core::{FitnessLevel, Intent};
use coach_llm::ExplainerClient;
use coach_observability::AppMetrics;
use coach_storage::{CounterRepository, Store};

fn mock_explainer() -> Arc<ExplainerClient> {
    Arc::new(ExplainerClient::new_mock_fn(|prompt| {
        format!("canned explanation for: {}", prompt.len())
    }))
}

async fn fresh_agent(store: Arc<Store>) -> CoachAgent<Store> {
    CoachAgent::new(mock_explainer(), store, AppMetrics::shared())
        .await
        .expect("agent should build")
}

#[tokio::test]
async fn beginner_twenty_minute_conversation_end_to_end() {
    let store = Arc::new(Store::memory());
    let mut agent = fresh_agent(Arc::clone(&store)).await;

    let reply = agent.handle_turn("I'm a beginner").await.unwrap();
    assert_eq!(
        agent.session().fitness_level,
        Some(FitnessLevel::Beginner)
    );
    assert!(reply.contains("How much time do you have today?"));

    let reply = agent.handle_turn("I have 20 minutes").await.unwrap();
    assert_eq!(agent.session().time_budget_minutes, Some(20));
    // 20 minutes buckets up to the 30-minute beginner routine.
    let routine = agent.session().current_routine.as_deref().unwrap();
    assert_eq!(routine.len(), 6);
    assert!(reply.contains("Perfect! Here's your 20-minute beginner workout:"));
    assert!(reply.contains("Repeat 2x for a complete workout!"));

    let reply = agent.handle_turn("done").await.unwrap();
    assert_eq!(agent.session().workout_count, 1);
    assert!(reply.starts_with("Awesome! That's workout #1"));
    assert_eq!(store.load_count().await.unwrap(), 1);
}

#[tokio::test]
async fn minutes_stated_before_level_must_be_restated() {
    let mut agent = fresh_agent(Arc::new(Store::memory())).await;

    let reply = agent.handle_turn("I have 45 minutes").await.unwrap();
    assert!(reply.contains("First, let me know"));
    assert_eq!(agent.session().time_budget_minutes, None);

    let reply = agent.handle_turn("intermediate").await.unwrap();
    assert!(reply.contains("How much time do you have today?"));
    assert_eq!(agent.session().time_budget_minutes, None);
    assert_eq!(agent.session().current_routine, None);

    let reply = agent.handle_turn("45 minutes").await.unwrap();
    assert_eq!(agent.session().time_budget_minutes, Some(45));
    // The routine table caps at 30 minutes for intermediates.
    assert_eq!(
        agent.session().current_routine.as_deref().map(<[_]>::len),
        Some(5)
    );
    assert!(reply.contains("Perfect! Here's your 45-minute intermediate workout:"));
}

#[tokio::test]
async fn workout_count_survives_across_sessions_on_one_store() {
    let store = Arc::new(Store::sqlite("sqlite::memory:").await.unwrap());

    let mut first = fresh_agent(Arc::clone(&store)).await;
    first.handle_turn("done").await.unwrap();
    first.handle_turn("finished").await.unwrap();
    drop(first);

    let mut second = fresh_agent(Arc::clone(&store)).await;
    assert_eq!(second.session().workout_count, 2);

    let reply = second.handle_turn("did it!").await.unwrap();
    assert!(reply.starts_with("Yes! Workout #3 in the books!"));
    assert_eq!(store.load_count().await.unwrap(), 3);
}

#[tokio::test]
async fn explanations_use_the_collaborator_and_keep_state() {
    let mut agent = fresh_agent(Arc::new(Store::memory())).await;
    agent.handle_turn("beginner").await.unwrap();

    let reply = agent.handle_turn("how do I do a plank?").await.unwrap();
    assert!(reply.starts_with("canned explanation for:"));
    assert_eq!(agent.session().fitness_level, Some(FitnessLevel::Beginner));
    assert_eq!(agent.session().workout_count, 0);
}

#[tokio::test]
async fn completion_outranks_other_intents_mid_sentence() {
    let mut agent = fresh_agent(Arc::new(Store::memory())).await;

    let reply = agent
        .handle_turn("I'm done, explain the plank")
        .await
        .unwrap();
    assert_eq!(agent.session().workout_count, 1);
    assert!(reply.contains("workout #1"));

    let turns = &agent.session().turns;
    assert_eq!(turns.last().unwrap().intent, Intent::LogCompletion);
}

#[tokio::test]
async fn metrics_track_the_conversation_shape() {
    let metrics = AppMetrics::shared();
    let mut agent = CoachAgent::new(
        mock_explainer(),
        Arc::new(Store::memory()),
        Arc::clone(&metrics),
    )
    .await
    .unwrap();

    agent.handle_turn("hello").await.unwrap();
    agent.handle_turn("beginner").await.unwrap();
    agent.handle_turn("15").await.unwrap();
    agent.handle_turn("explain burpees").await.unwrap();
    agent.handle_turn("done").await.unwrap();

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.turns_total, 5);
    assert_eq!(snapshot.explanations_total, 1);
    assert_eq!(snapshot.completions_total, 1);
    // The opening "hello" lands before any state exists and counts as a
    // clarifying prompt.
    assert_eq!(snapshot.clarifications_total, 1);
}
