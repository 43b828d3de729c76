use axum::{extract::DefaultBodyLimit, middleware::map_response, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod state;

#[cfg(test)]
pub mod testing;

use database::models::{ALBUMS, ARTISTS, SONGS};
use handlers::{catalog, labels, service, users};
use state::AppState;

/// The full HTTP surface over `state`.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.api.max_request_size_bytes;

    Router::new()
        // Operational
        .route("/", get(service::root))
        .route("/health", get(service::health))
        // Catalog
        .nest("/songs", catalog::router(&SONGS, &state))
        .nest("/albums", catalog::router(&ALBUMS, &state))
        .nest("/artists", catalog::router(&ARTISTS, &state))
        .nest("/labels", labels::router(&state))
        // Accounts
        .nest("/users", users::router(&state))
        .fallback(service::not_found)
        .layer(map_response(service::method_not_allowed_as_not_found))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
