use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Map, json};
use tracing::error;

use wishes_store::DocumentStore;
use wishes_types::api::{CreateWishRequest, Wish};

use crate::error::ApiError;
use crate::pipeline::{self, WISH_COLLECTION, WishConfig};

/// Shared application state for all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub config: Arc<WishConfig>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/test", get(test_store))
        .route("/api/wishes", get(list_wishes))
        .route("/api/wishes", post(create_wish))
        .with_state(state)
}

async fn root() -> impl IntoResponse {
    Json(json!({ "status": "ok", "message": "Birthday Wishes API" }))
}

/// Quick storage connectivity probe. Always 200; failures are reported
/// in-band so the endpoint stays usable as a diagnostic.
async fn test_store(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.clone();
    let outcome =
        tokio::task::spawn_blocking(move || store.find(WISH_COLLECTION, &Map::new(), 1)).await;

    match outcome {
        Ok(Ok(_)) => Json(json!({ "ok": true })),
        Ok(Err(e)) => Json(json!({ "ok": false, "error": e.to_string() })),
        Err(e) => Json(json!({ "ok": false, "error": e.to_string() })),
    }
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    limit: Option<u32>,
    public_only: Option<bool>,
}

async fn list_wishes(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Wish>>, ApiError> {
    // Run the blocking store query off the async runtime
    let store = state.store.clone();
    let config = state.config.clone();
    let wishes =
        tokio::task::spawn_blocking(move || {
            pipeline::list(&store, &config, query.limit, query.public_only)
        })
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::internal(e)
        })??;

    Ok(Json(wishes))
}

async fn create_wish(
    State(state): State<AppState>,
    Json(req): Json<CreateWishRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.clone();
    let wish = tokio::task::spawn_blocking(move || pipeline::create(&store, req))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::internal(e)
        })??;

    Ok((StatusCode::CREATED, Json(wish)))
}
