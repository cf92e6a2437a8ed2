//! REST endpoint handlers and the JSON error envelope.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mealplan::config::RecommendConfig;
use mealplan::{Completion, Recommendation, recommend};
use serde::Deserialize;
use tracing::{error, info};

/// Shared application state passed to all handlers via axum's `State` extractor.
///
/// The completion client is built by the entry point and injected here; the
/// handlers never construct one themselves.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn Completion>,
    pub config: Arc<RecommendConfig>,
}

impl AppState {
    pub fn new(client: Arc<dyn Completion>, config: RecommendConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }
}

// ── Error envelope ──────────────────────────────────────────────────

/// Any failed request. Rendered as `{"error": message}`.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ── Handlers ────────────────────────────────────────────────────────

/// Query string for GET /recommend.
#[derive(Deserialize, Debug)]
pub struct RecommendParams {
    pub goal: String,
}

/// GET /recommend?goal=... — Three meal plans for a goal.
///
/// Returns 200 with `{"goal", "meal_options"}`, 422 if `goal` is missing,
/// and 500 with `{"error"}` if the completion call fails.
pub async fn get_recommend(
    State(app): State<AppState>,
    query: Result<Query<RecommendParams>, QueryRejection>,
) -> Result<Json<Recommendation>, AppError> {
    let Query(params) = query.map_err(|e| AppError::unprocessable(e.body_text()))?;
    info!(goal = %params.goal, "recommend request");

    match recommend(app.client.as_ref(), &app.config, &params.goal).await {
        Ok(rec) => Ok(Json(rec)),
        Err(e) => {
            error!(goal = %params.goal, error = %e, "recommendation failed");
            Err(AppError::internal(e.to_string()))
        }
    }
}
