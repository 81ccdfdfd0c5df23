use std::env;
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coach_agents::CoachAgent;
use coach_core::{build_routine_plan, normalize_fitness_level};
use coach_llm::ExplainerClient;
use coach_observability::{init_tracing, AppMetrics};
use coach_storage::Store;

const EXIT_PHRASES: &[&str] = &["quit", "exit", "bye", "goodbye"];

#[derive(Debug, Parser)]
#[command(name = "coach")]
#[command(about = "Routine Coach - conversational workout builder")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive workout chat
    Chat,
    /// Print a routine plan without starting a chat
    Routine {
        #[arg(long, default_value = "beginner")]
        level: String,
        #[arg(long, default_value_t = 30)]
        minutes: i64,
    },
    /// Ask for a one-off exercise explanation
    Explain { question: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("coach_cli");
    let cli = Cli::parse();

    match cli.command {
        Command::Chat => run_chat().await?,
        Command::Routine { level, minutes } => {
            let plan = build_routine_plan(normalize_fitness_level(Some(&level)), minutes);
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Command::Explain { question } => {
            let explainer = build_explainer()?;
            println!("{}", explainer.explain(&question).await?);
        }
    }

    Ok(())
}

async fn run_chat() -> Result<()> {
    let mut agent = build_agent().await?;

    println!("{}", "=".repeat(50));
    println!("🏋️  WORKOUT ROUTINE BUILDER  🏋️");
    println!("{}", "=".repeat(50));
    println!("\nWelcome to your personal fitness assistant!");
    println!("I'll help you create a custom workout routine.\n");
    println!("Type 'quit' or 'exit' to end the session.\n");
    println!("{}", "-".repeat(50));

    let opening = agent.handle_turn("hello").await?;
    println!("\nBot: {opening}\n");

    loop {
        print!("You: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.is_empty() {
            continue;
        }

        if EXIT_PHRASES.contains(&message.to_lowercase().as_str()) {
            println!("\nBot: Great job today! Remember, consistency is key. See you next time! 💪\n");
            break;
        }

        match agent.handle_turn(message).await {
            Ok(reply) => println!("\nBot: {reply}\n"),
            Err(error) => {
                println!("\n⚠️  ERROR: {error:#}\n");
                println!("Let's try that again.\n");
            }
        }
    }

    Ok(())
}

async fn build_agent() -> Result<CoachAgent<Store>> {
    let explainer = Arc::new(build_explainer()?);

    let store = if let Ok(database_url) = env::var("COACH_DATABASE_URL") {
        Store::sqlite(&database_url).await?
    } else {
        Store::memory()
    };

    CoachAgent::new(explainer, Arc::new(store), AppMetrics::shared()).await
}

fn build_explainer() -> Result<ExplainerClient> {
    let api_key = env::var("ANTHROPIC_API_KEY")
        .context("ANTHROPIC_API_KEY is not set; exercise explanations need it")?;
    let model = env::var("COACH_MODEL").ok();

    Ok(ExplainerClient::new_anthropic(api_key, model))
}
