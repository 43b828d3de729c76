use axum::{
    extract::{OriginalUri, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Music Catalog API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "songs": "/songs[/:id]",
            "albums": "/albums[/:id]",
            "artists": "/artists[/:id]",
            "labels": "/labels[/:id]",
            "users": "/users[/:id[/albums|/artists|/songs|/labels]], /users/login",
            "health": "/health",
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "ok" })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "timestamp": now, "database": "unavailable" })),
            )
        }
    }
}

/// Shared answer for unknown paths and for ids with no row.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::not_found(uri.path())
}

/// A known path hit with an unrouted method answers like an unknown path.
pub async fn method_not_allowed_as_not_found(uri: Uri, response: Response) -> Response {
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        return ApiError::not_found(uri.path()).into_response();
    }
    response
}
