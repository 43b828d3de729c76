// handlers/catalog.rs - songs, albums and artists
//
// The three catalog resources share one set of routes; only the resource
// descriptor differs.

use axum::{
    extract::{OriginalUri, Path, RawQuery, State},
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};

use super::{body_or_empty, guarded, page_param, single, JsonBody};
use crate::api::{page_envelope, record_link};
use crate::auth::Action;
use crate::database::models::Resource;
use crate::database::pagination::{parse_leading_int, requested_page};
use crate::error::{ApiError, InternalContext};
use crate::middleware::{ApiResponse, ApiResult, AuthenticatedUser};
use crate::state::AppState;

pub fn router(resource: &'static Resource, state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            guarded(
                get(
                    move |State(state): State<AppState>,
                          identity: Option<AuthenticatedUser>,
                          RawQuery(query): RawQuery| list(resource, state, identity, query),
                ),
                resource,
                Action::List,
                state,
            ),
        )
        .route(
            "/",
            guarded(
                post(
                    move |State(state): State<AppState>, identity: Option<AuthenticatedUser>, body: JsonBody| {
                        create(resource, state, identity, body)
                    },
                ),
                resource,
                Action::Create,
                state,
            ),
        )
        .route(
            "/:id",
            guarded(
                get(
                    move |State(state): State<AppState>,
                          identity: Option<AuthenticatedUser>,
                          OriginalUri(uri): OriginalUri,
                          Path(id): Path<String>| read(resource, state, identity, uri.path().to_string(), id),
                ),
                resource,
                Action::Read,
                state,
            ),
        )
        .route(
            "/:id",
            guarded(
                put(
                    move |State(state): State<AppState>,
                          identity: Option<AuthenticatedUser>,
                          OriginalUri(uri): OriginalUri,
                          Path(id): Path<String>,
                          body: JsonBody| {
                        replace(resource, state, identity, uri.path().to_string(), id, body)
                    },
                ),
                resource,
                Action::Replace,
                state,
            ),
        )
        .route(
            "/:id",
            guarded(
                delete(
                    move |State(state): State<AppState>,
                          identity: Option<AuthenticatedUser>,
                          OriginalUri(uri): OriginalUri,
                          Path(id): Path<String>,
                          body: JsonBody| {
                        remove(resource, state, identity, uri.path().to_string(), id, body)
                    },
                ),
                resource,
                Action::Delete,
                state,
            ),
        )
}

/// GET /<resource>?page=N - one page plus navigation links
async fn list(
    resource: &'static Resource,
    state: AppState,
    identity: Option<AuthenticatedUser>,
    query: Option<String>,
) -> ApiResult<Value> {
    state.authorize(resource, Action::List, identity.as_deref(), None, None)?;

    let page = state
        .accessor(resource)
        .page(requested_page(page_param(query.as_deref()).as_deref()))
        .await
        .internal(&format!("Error fetching {} list.  Please try again later.", resource.name))?;

    Ok(ApiResponse::success(page_envelope(resource, page)))
}

/// POST /<resource> - responds with the id the client sent, not the stored one
async fn create(
    resource: &'static Resource,
    state: AppState,
    identity: Option<AuthenticatedUser>,
    body: JsonBody,
) -> ApiResult<Value> {
    let body = body_or_empty(body);
    state.authorize(resource, Action::Create, identity.as_deref(), None, Some(&body))?;

    if !resource.schema.validate(&body) {
        return Err(ApiError::bad_request(format!(
            "Request body is not a valid {} object.",
            resource.singular
        )));
    }

    state
        .accessor(resource)
        .insert(&body)
        .await
        .internal(&format!("Error inserting {} into DB.  Please try again later.", resource.singular))?;

    let id = body.get("id").cloned().unwrap_or(Value::Null);
    let link = record_link(resource, &id);
    Ok(ApiResponse::created(json!({
        "id": id,
        "links": single(resource.singular, Value::String(link)),
    })))
}

/// GET /<resource>/:id
async fn read(
    resource: &'static Resource,
    state: AppState,
    identity: Option<AuthenticatedUser>,
    path: String,
    id: String,
) -> ApiResult<Value> {
    state.authorize(resource, Action::Read, identity.as_deref(), Some(&id), None)?;

    let Some(id) = parse_leading_int(&id) else {
        return Err(ApiError::not_found(&path));
    };

    let record = state
        .accessor(resource)
        .get_by_id(id)
        .await
        .internal(&format!("Unable to fetch {}.  Please try again later.", resource.singular))?;

    match record {
        Some(record) => Ok(ApiResponse::success(Value::Object(record))),
        None => Err(ApiError::not_found(&path)),
    }
}

/// PUT /<resource>/:id - wholesale replacement of the schema fields
async fn replace(
    resource: &'static Resource,
    state: AppState,
    identity: Option<AuthenticatedUser>,
    path: String,
    id: String,
    body: JsonBody,
) -> ApiResult<Value> {
    let body = body_or_empty(body);
    state.authorize(resource, Action::Replace, identity.as_deref(), Some(&id), Some(&body))?;

    if !resource.schema.validate(&body) {
        return Err(ApiError::bad_request(format!(
            "Request body is not a valid {} object",
            resource.singular
        )));
    }

    let Some(id) = parse_leading_int(&id) else {
        return Err(ApiError::not_found(&path));
    };

    let updated = state
        .accessor(resource)
        .replace_by_id(id, &body)
        .await
        .internal(&format!("Unable to update specified {}.  Please try again later.", resource.singular))?;

    if !updated {
        return Err(ApiError::not_found(&path));
    }

    let link = record_link(resource, &Value::from(id));
    Ok(ApiResponse::success(json!({
        "links": single(resource.singular, Value::String(link)),
    })))
}

/// DELETE /<resource>/:id
async fn remove(
    resource: &'static Resource,
    state: AppState,
    identity: Option<AuthenticatedUser>,
    path: String,
    id: String,
    body: JsonBody,
) -> ApiResult<()> {
    let body = body_or_empty(body);
    state.authorize(resource, Action::Delete, identity.as_deref(), Some(&id), Some(&body))?;

    let Some(id) = parse_leading_int(&id) else {
        return Err(ApiError::not_found(&path));
    };

    let deleted = state
        .accessor(resource)
        .delete_by_id(id)
        .await
        .internal(&format!("Unable to delete {}.  Please try again later.", resource.singular))?;

    if deleted {
        Ok(ApiResponse::no_content())
    } else {
        Err(ApiError::not_found(&path))
    }
}
