// handlers/labels.rs - record labels
//
// Labels are listed whole rather than paged, and writes are guarded by the
// `ownerID` carried in the request body.

use axum::{
    extract::{OriginalUri, Path, State},
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};

use super::{body_or_empty, guarded, JsonBody};
use crate::auth::Action;
use crate::database::models::LABELS;
use crate::database::pagination::parse_leading_int;
use crate::error::{ApiError, InternalContext};
use crate::middleware::{ApiResponse, ApiResult, AuthenticatedUser};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", guarded(get(list_labels), &LABELS, Action::List, state))
        .route("/", guarded(post(create_label), &LABELS, Action::Create, state))
        .route("/:id", guarded(get(get_label), &LABELS, Action::Read, state))
        .route("/:id", guarded(put(replace_label), &LABELS, Action::Replace, state))
        .route("/:id", guarded(delete(delete_label), &LABELS, Action::Delete, state))
}

/// GET /labels - every label as a bare array
async fn list_labels(State(state): State<AppState>) -> ApiResult<Value> {
    let labels = state
        .accessor(&LABELS)
        .all()
        .await
        .internal("Error fetching labels list.  Please try again later.")?;

    Ok(ApiResponse::success(Value::Array(labels.into_iter().map(Value::Object).collect())))
}

/// POST /labels - the store assigns the id; the body is not validated
async fn create_label(
    State(state): State<AppState>,
    identity: Option<AuthenticatedUser>,
    body: JsonBody,
) -> ApiResult<Value> {
    let mut body = body_or_empty(body);
    state.authorize(&LABELS, Action::Create, identity.as_deref(), None, Some(&body))?;

    body.remove("id");
    let id = state
        .accessor(&LABELS)
        .insert(&body)
        .await
        .internal("Unable to add label.  Please try again later.")?;

    tracing::info!("Created label {}", id);
    Ok(ApiResponse::created(json!({ "success": "Added new label into database!" })))
}

/// GET /labels/:id
async fn get_label(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let Some(id) = parse_leading_int(&id) else {
        return Err(ApiError::not_found(uri.path()));
    };

    match state
        .accessor(&LABELS)
        .get_by_id(id)
        .await
        .internal("Unable to fetch label.  Please try again later.")?
    {
        Some(label) => Ok(ApiResponse::success(Value::Object(label))),
        None => Err(ApiError::not_found(uri.path())),
    }
}

/// PUT /labels/:id - caller must be the body's `ownerID`
async fn replace_label(
    State(state): State<AppState>,
    identity: Option<AuthenticatedUser>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
    body: JsonBody,
) -> ApiResult<Value> {
    let body = body_or_empty(body);
    state.authorize(&LABELS, Action::Replace, identity.as_deref(), Some(&id), Some(&body))?;

    let Some(id) = parse_leading_int(&id) else {
        return Err(ApiError::not_found(uri.path()));
    };

    let replaced = state
        .accessor(&LABELS)
        .replace_by_id(id, &body)
        .await
        .internal("Unable to change label.  Please try again later.")?;

    if !replaced {
        return Err(ApiError::not_found(uri.path()));
    }
    Ok(ApiResponse::created(json!({ "success": "Changed label in database!" })))
}

/// DELETE /labels/:id - caller must be the body's `ownerID`
async fn delete_label(
    State(state): State<AppState>,
    identity: Option<AuthenticatedUser>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
    body: JsonBody,
) -> ApiResult<()> {
    let body = body_or_empty(body);
    state.authorize(&LABELS, Action::Delete, identity.as_deref(), Some(&id), Some(&body))?;

    let Some(id) = parse_leading_int(&id) else {
        return Err(ApiError::not_found(uri.path()));
    };

    let deleted = state
        .accessor(&LABELS)
        .delete_by_id(id)
        .await
        .internal("Unable to delete label.  Please try again later.")?;

    if deleted {
        Ok(ApiResponse::no_content())
    } else {
        Err(ApiError::not_found(uri.path()))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::testing::{bearer, record, send, test_app};

    fn label(id: i64, owner: i64) -> serde_json::Value {
        json!({ "id": id, "name": format!("label {id}"), "ownerID": owner, "artistsSigned": [1, 2] })
    }

    #[tokio::test]
    async fn list_is_a_bare_array() {
        let (app, store, _) = test_app();
        store.seed("labels", record(label(1, 3)));
        store.seed("labels", record(label(2, 4)));

        let (status, body) = send(&app, Method::GET, "/labels", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([label(1, 3), label(2, 4)]));
    }

    #[tokio::test]
    async fn create_ignores_client_id() {
        let (app, store, _) = test_app();
        store.seed("labels", record(label(4, 3)));

        let (status, body) = send(&app, Method::POST, "/labels", None, Some(label(99, 3))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({ "success": "Added new label into database!" }));
        assert!(store.row("labels", 99).is_none());
        assert_eq!(store.row("labels", 5).unwrap()["name"], "label 99");
    }

    #[tokio::test]
    async fn get_one_label() {
        let (app, store, _) = test_app();
        store.seed("labels", record(label(2, 3)));
        let (status, body) = send(&app, Method::GET, "/labels/2", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, label(2, 3));

        let (status, _) = send(&app, Method::GET, "/labels/3", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn replace_checks_body_owner() {
        let (app, store, state) = test_app();
        store.seed("labels", record(label(2, 3)));

        let mut change = label(2, 3);
        change["name"] = json!("renamed");

        let (status, _) = send(&app, Method::PUT, "/labels/2", None, Some(change.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let other = bearer(&state, "4");
        let (status, body) = send(&app, Method::PUT, "/labels/2", Some(&other), Some(change.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized action.");

        let owner = bearer(&state, "3");
        let (status, body) = send(&app, Method::PUT, "/labels/2", Some(&owner), Some(change)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({ "success": "Changed label in database!" }));
        assert_eq!(store.row("labels", 2).unwrap()["name"], "renamed");
    }

    #[tokio::test]
    async fn replace_missing_label_is_404() {
        let (app, store, state) = test_app();
        let owner = bearer(&state, "3");

        let (status, body) = send(&app, Method::PUT, "/labels/7", Some(&owner), Some(label(7, 3))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Requested resource /labels/7 does not exist");
        assert!(store.row("labels", 7).is_none());
    }

    #[tokio::test]
    async fn delete_checks_body_owner() {
        let (app, store, state) = test_app();
        store.seed("labels", record(label(2, 3)));
        let owner = bearer(&state, "3");

        let (status, _) = send(&app, Method::DELETE, "/labels/2", Some(&owner), Some(json!({ "ownerID": 4 }))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(store.row("labels", 2).is_some());

        let (status, _) = send(&app, Method::DELETE, "/labels/2", Some(&owner), Some(json!({ "ownerID": "3" }))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(store.row("labels", 2).is_none());

        let (status, _) = send(&app, Method::DELETE, "/labels/2", Some(&owner), Some(json!({ "ownerID": 3 }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn store_failure_is_500() {
        let (app, store, _) = test_app();
        store.fail();
        let (status, body) = send(&app, Method::POST, "/labels", None, Some(label(1, 1))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Unable to add label.  Please try again later.");
    }
}
