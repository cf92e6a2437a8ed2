//! HTTP API serving meal plan recommendations.
//!
//! `mealplan-web` wraps the [`mealplan`] pipeline in a single axum endpoint:
//!
//! ```text
//! GET /recommend?goal=다이어트
//!   200 {"goal": "다이어트", "meal_options": ["### 식단 1: ...", "### 식단 2: ...", "### 식단 3: ..."]}
//!   500 {"error": "completion API HTTP 401 Unauthorized: ..."}
//!   422 {"error": "Failed to deserialize query string: missing field `goal`"}
//! ```
//!
//! CORS is fully open (any origin, method and header, credentials allowed).
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use mealplan::prelude::*;
//! use mealplan_web::{AppState, WebConfig, spawn_web};
//!
//! let client = ChatClient::new(std::env::var("OPENAI_API_KEY")?)?;
//! let state = AppState::new(Arc::new(client), RecommendConfig::default());
//!
//! let addr = spawn_web(state, WebConfig::default()).await?;
//! println!("Listening on http://{addr}");
//! ```
//!
//! Any [`Completion`](mealplan::Completion) implementation can back the
//! server, which is how the integration tests run without a network.

mod api;
mod server;

pub use api::{AppError, AppState, RecommendParams};
pub use server::build_router;

use std::net::SocketAddr;

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:8000`.
    pub bind_addr: SocketAddr,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
        }
    }
}

/// Spawn the web server on a Tokio task.
///
/// Returns the bound address (useful with port 0). The server runs until
/// the Tokio runtime shuts down.
pub async fn spawn_web(state: AppState, config: WebConfig) -> std::io::Result<SocketAddr> {
    let router = server::build_router(state);
    server::start_server(router, config.bind_addr).await
}
