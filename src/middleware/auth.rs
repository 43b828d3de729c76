use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
    Extension,
};

use crate::auth::Identity;
use crate::error::ApiError;
use crate::state::AppState;

/// Verified identity placed in request extensions by [`require_authentication`].
pub type AuthenticatedUser = Extension<Identity>;

/// Bearer token gate: verifies signature and expiry, then attaches the
/// subject as an [`Identity`] for downstream handlers.
pub async fn require_authentication(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let invalid = || ApiError::unauthorized("Invalid authentication token.");

    let token = extract_bearer(&headers).ok_or_else(invalid)?;
    let identity = state.tokens.verify(token).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        invalid()
    })?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Token from an `Authorization: Bearer <token>` header.
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split(' ');
    match (parts.next(), parts.next()) {
        (Some("Bearer"), Some(token)) if !token.is_empty() => Some(token),
        _ => None,
    }
}
