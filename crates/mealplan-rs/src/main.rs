//! Ask the model for three meal plans for a goal and print them.
//!
//! Reads the API key from `OPENAI_API_KEY` (or a `.env` file in the working
//! directory).
//!
//! # Examples
//!
//! ```sh
//! # Three plans for a diet goal
//! mealplan --goal 다이어트
//!
//! # Unsegmented model output, different model
//! mealplan --goal "근육량 증가" --model gpt-4o-mini --raw
//!
//! # Show the goals that have a dedicated guideline
//! mealplan --list-goals
//! ```

use std::process;

use clap::Parser;
use mealplan::config::{ClientArgs, env_filter};
use mealplan::guideline::{guideline_for, known_goals};
use mealplan::prompt::build_messages;
use mealplan::{Completion, CompletionError, recommend};

/// Ask the model for three meal plans for a goal and print them.
#[derive(Parser)]
#[command(name = "mealplan")]
struct Cli {
    /// Dietary goal, e.g. "다이어트" or "당 줄이기"
    #[arg(long, required_unless_present = "list_goals")]
    goal: Option<String>,

    /// Print the completion as returned, without splitting it
    #[arg(long)]
    raw: bool,

    /// List goals with a dedicated guideline and exit
    #[arg(long)]
    list_goals: bool,

    #[command(flatten)]
    client: ClientArgs,
}

fn list_goals() -> String {
    known_goals()
        .map(|goal| format!("{goal}\t{}", guideline_for(goal)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_options(options: &mealplan::MealOptions) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, plan)| format!("--- option {} ---\n{plan}\n", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

async fn run(cli: &Cli) -> Result<String, String> {
    if cli.list_goals {
        return Ok(format!("{}\n", list_goals()));
    }
    let goal = cli.goal.as_deref().ok_or("provide --goal")?;

    let client = cli.client.build_client()?;
    let config = cli.client.recommend_config();

    if cli.raw {
        let request = config.build_request(build_messages(goal, guideline_for(goal)));
        let completion = client
            .complete(&request)
            .await
            .map_err(|e| e.to_string())?;
        return completion
            .content
            .ok_or_else(|| CompletionError::EmptyResponse.to_string());
    }

    let rec = recommend(&client, &config, goal)
        .await
        .map_err(|e| e.to_string())?;
    Ok(render_options(&rec.meal_options))
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
