//! Axum server setup and router construction.

use std::net::SocketAddr;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::api::{self, AppState};

/// Build the full axum router.
///
/// The router serves `GET /recommend` behind an open CORS policy.
pub fn build_router(app_state: AppState) -> Router {
    // Any origin, method and header, with credentials. `*` cannot be
    // combined with credentials, so all three are mirrored from the request.
    let cors = CorsLayer::very_permissive();

    Router::new()
        .route("/recommend", get(api::get_recommend))
        .with_state(app_state)
        .layer(cors)
}

/// Bind `bind_addr`, serve `router` on a Tokio task, and return the bound
/// address.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!("server stopped: {e}");
        }
    });

    Ok(addr)
}
