//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::debug;

use super::AppState;
use super::types::{CatalogResponse, ErrorResponse, LoadRequest, LoadResponse, SizeResponse};
use crate::config::build_selection;
use crate::sizing::{FitSummary, Requirements, size_system};

/// Returns the product and appliance catalog.
///
/// `GET /catalog` → 200 + `CatalogResponse` JSON
pub async fn get_catalog(State(state): State<Arc<AppState>>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        products: state.catalog.products(),
        appliances: state.catalog.appliances().to_vec(),
    })
}

/// Sizes a system for the posted requirements.
///
/// `POST /size` → 200 + `SizeResponse` JSON. Never fails on numeric input;
/// out-of-range values are absorbed by the sizing rules.
pub async fn post_size(
    State(state): State<Arc<AppState>>,
    Json(requirements): Json<Requirements>,
) -> Json<SizeResponse> {
    let rec = size_system(&requirements, &state.catalog);
    let fit = FitSummary::new(&rec.best, &requirements);
    debug!(battery = %rec.best.battery.id, "sized request");

    Json(SizeResponse {
        requirements,
        best: rec.best,
        fit,
        alternatives: rec.alternatives,
    })
}

/// Aggregates posted appliance lines into a load profile.
///
/// `POST /load` → 200 + `LoadResponse` JSON
/// Unknown appliance id → 400 + `ErrorResponse`
pub async fn post_load(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoadRequest>,
) -> Result<Json<LoadResponse>, (StatusCode, Json<ErrorResponse>)> {
    let selection = build_selection(&req.items, &state.catalog, req.backup_hours).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    Ok(Json(LoadResponse {
        profile: selection.profile(),
        items: selection.items().to_vec(),
    }))
}
