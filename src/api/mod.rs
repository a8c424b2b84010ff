//! JSON API over the sizing engine.
//!
//! Provides three endpoints:
//! - `GET /catalog`: inverter, battery, and appliance catalog
//! - `POST /size`: requirements in, recommendation and fit out
//! - `POST /load`: appliance lines in, aggregate load profile out

mod handlers;
pub mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::catalog::Catalog;

/// Immutable application state shared across all request handlers.
///
/// Constructed once at startup and wrapped in `Arc`; no locks needed since
/// the catalog is read-only.
pub struct AppState {
    /// Product and appliance catalog.
    pub catalog: Catalog,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/catalog", get(handlers::get_catalog))
        .route("/size", post(handlers::post_size))
        .route("/load", post(handlers::post_load))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
