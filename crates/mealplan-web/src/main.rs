//! Meal plan recommendation server.
//!
//! # Usage
//!
//! ```bash
//! OPENAI_API_KEY=sk-... cargo run -p mealplan-web
//! OPENAI_API_KEY=sk-... cargo run -p mealplan-web -- --bind 0.0.0.0:8080
//! OPENAI_API_KEY=sk-... cargo run -p mealplan-web -- --model gpt-4o-mini
//! ```
//!
//! Settings can also come from a `.env` file in the working directory.
//!
//! ```bash
//! curl 'http://127.0.0.1:8000/recommend?goal=다이어트'
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use mealplan::config::{ClientArgs, env_filter};
use mealplan_web::{AppState, WebConfig, spawn_web};
use tracing::info;

/// Meal plan recommendation server.
#[derive(Parser)]
#[command(about = "HTTP API serving meal plan recommendations")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "MEALPLAN_BIND", default_value = "127.0.0.1:8000")]
    bind: SocketAddr,

    #[command(flatten)]
    client: ClientArgs,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // 1. Build the completion client once; every request shares it.
    let client = args.client.build_client()?;
    let config = args.client.recommend_config();
    info!(model = %config.model, endpoint = client.endpoint(), "completion client ready");

    // 2. Serve.
    let state = AppState::new(Arc::new(client), config);
    let web_config = WebConfig {
        bind_addr: args.bind,
    };
    let addr = spawn_web(state, web_config)
        .await
        .map_err(|e| format!("failed to bind {}: {e}", args.bind))?;
    println!("Listening on http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to listen for shutdown signal: {e}"))?;
    info!("shutting down");
    Ok(())
}
