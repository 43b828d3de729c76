// handlers/users.rs - accounts, login and per-user lists
//
// Everything under `/users/:id` is limited to the user named in the path;
// listing and deleting accounts is limited to the admin.

use axum::{
    extract::{OriginalUri, Path, RawQuery, State},
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};

use super::{body_or_empty, guarded, is_truthy, page_param, single, JsonBody};
use crate::api::page_envelope;
use crate::auth::{login_id, Action, Identity};
use crate::database::models::user::password_matches;
use crate::database::models::{Resource, ALBUMS, ARTISTS, LABELS, SONGS, USERS};
use crate::database::pagination::{parse_leading_int, requested_page};
use crate::error::{ApiError, InternalContext};
use crate::middleware::{ApiResponse, ApiResult, AuthenticatedUser};
use crate::state::AppState;

/// A list column a user replaces through `PUT /users/:id/<field>`.
struct ListColumn {
    field: &'static str,
    updated: &'static str,
    failed: &'static str,
}

static LIST_COLUMNS: [ListColumn; 3] = [
    ListColumn {
        field: "albums",
        updated: "Updated user album!",
        failed: "Unable to update user albums.  Please try again later.",
    },
    ListColumn {
        field: "artists",
        updated: "Updated user artist!",
        failed: "Unable to update user artist.  Please try again later.",
    },
    ListColumn {
        field: "songs",
        updated: "Updated user songs!",
        failed: "Unable to update user songs.  Please try again later.",
    },
];

pub fn router(state: &AppState) -> Router<AppState> {
    let mut router = Router::new()
        .route("/", guarded(get(list_users), &USERS, Action::List, state))
        .route("/", guarded(post(create_user), &USERS, Action::Create, state))
        .route("/login", guarded(post(login), &USERS, Action::Login, state))
        .route("/:id", guarded(get(get_user), &USERS, Action::Read, state))
        .route("/:id", guarded(put(replace_user), &USERS, Action::Replace, state))
        .route("/:id", guarded(delete(delete_user), &USERS, Action::Delete, state));

    for column in LIST_COLUMNS.iter() {
        router = router.route(
            &format!("/:id/{}", column.field),
            guarded(
                put(
                    move |State(state): State<AppState>,
                          identity: Option<AuthenticatedUser>,
                          OriginalUri(uri): OriginalUri,
                          Path(id): Path<String>,
                          body: JsonBody| {
                        replace_list(column, state, identity, uri.path().to_string(), id, body)
                    },
                ),
                &USERS,
                Action::ReplaceList,
                state,
            ),
        );
    }

    for owned in [&SONGS, &ALBUMS, &ARTISTS, &LABELS] {
        router = router.route(
            &format!("/:id/{}", owned.name),
            guarded(
                get(
                    move |State(state): State<AppState>,
                          identity: Option<AuthenticatedUser>,
                          Path(id): Path<String>| list_owned(owned, state, identity, id),
                ),
                &USERS,
                Action::ListOwned,
                state,
            ),
        );
    }

    router
}

/// GET /users?page=N
async fn list_users(
    State(state): State<AppState>,
    identity: Option<AuthenticatedUser>,
    RawQuery(query): RawQuery,
) -> ApiResult<Value> {
    state.authorize(&USERS, Action::List, identity.as_deref(), None, None)?;

    let page = state
        .accessor(&USERS)
        .page(requested_page(page_param(query.as_deref()).as_deref()))
        .await
        .internal("Error fetching users list.  Please try again later.")?;

    Ok(ApiResponse::success(page_envelope(&USERS, page)))
}

/// POST /users
async fn create_user(
    State(state): State<AppState>,
    identity: Option<AuthenticatedUser>,
    body: JsonBody,
) -> ApiResult<Value> {
    let body = body_or_empty(body);
    state.authorize(&USERS, Action::Create, identity.as_deref(), None, Some(&body))?;

    if !USERS.schema.validate(&body) {
        return Err(ApiError::bad_request("Request body is not a valid user object."));
    }

    let id = state
        .accessor(&USERS)
        .insert(&body)
        .await
        .internal("Unable to add user.  Please try again later.")?;

    tracing::info!("Created user {}", id);
    Ok(ApiResponse::created(json!({ "success": "Added new user into database!" })))
}

/// POST /users/login - `{id, password}` in, `{token}` out
async fn login(State(state): State<AppState>, body: JsonBody) -> ApiResult<Value> {
    let body = body_or_empty(body);

    let (Some(id), Some(password)) = (
        body.get("id").filter(|v| is_truthy(v)),
        body.get("password").filter(|v| is_truthy(v)),
    ) else {
        return Err(ApiError::bad_request("Request body needs `id` and `password`."));
    };

    let invalid = || ApiError::unauthorized("Invalid authentication credentials.");

    let user_id = login_id(id).ok_or_else(invalid)?;
    let password = password.as_str().ok_or_else(invalid)?;

    let user = state
        .accessor(&USERS)
        .get_by_id(user_id)
        .await
        .internal("Error logging in.  Try again later.")?
        .ok_or_else(invalid)?;

    if !password_matches(&user, password) {
        tracing::warn!("Failed login for user {}", user_id);
        return Err(invalid());
    }

    let token = state
        .tokens
        .generate(&Identity::new(user_id.to_string()))
        .map_err(|e| {
            tracing::error!("Token generation failed: {}", e);
            ApiError::internal_server_error("Error logging in.  Try again later.")
        })?;

    Ok(ApiResponse::success(json!({ "token": token })))
}

/// GET /users/:id - the full row, password included
async fn get_user(
    State(state): State<AppState>,
    identity: Option<AuthenticatedUser>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    state.authorize(&USERS, Action::Read, identity.as_deref(), Some(&id), None)?;

    let Some(id) = parse_leading_int(&id) else {
        return Err(ApiError::not_found(uri.path()));
    };

    match state
        .accessor(&USERS)
        .get_by_id(id)
        .await
        .internal("Error fetching user.  Please try again later.")?
    {
        Some(user) => Ok(ApiResponse::success(Value::Object(user))),
        None => Err(ApiError::not_found(uri.path())),
    }
}

/// PUT /users/:id
async fn replace_user(
    State(state): State<AppState>,
    identity: Option<AuthenticatedUser>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
    body: JsonBody,
) -> ApiResult<Value> {
    let body = body_or_empty(body);
    state.authorize(&USERS, Action::Replace, identity.as_deref(), Some(&id), Some(&body))?;

    if !USERS.schema.validate(&body) {
        return Err(ApiError::bad_request("Request body is not a valid user object."));
    }

    let Some(id) = parse_leading_int(&id) else {
        return Err(ApiError::not_found(uri.path()));
    };

    let replaced = state
        .accessor(&USERS)
        .replace_by_id(id, &body)
        .await
        .internal("Unable to change user.  Please try again later.")?;

    if !replaced {
        return Err(ApiError::not_found(uri.path()));
    }
    Ok(ApiResponse::created(json!({ "success": "Changed user in the database!" })))
}

/// DELETE /users/:id
async fn delete_user(
    State(state): State<AppState>,
    identity: Option<AuthenticatedUser>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.authorize(&USERS, Action::Delete, identity.as_deref(), Some(&id), None)?;

    let Some(id) = parse_leading_int(&id) else {
        return Err(ApiError::not_found(uri.path()));
    };

    let deleted = state
        .accessor(&USERS)
        .delete_by_id(id)
        .await
        .internal("Unable to delete user.  Please try again later.")?;

    if deleted {
        Ok(ApiResponse::no_content())
    } else {
        Err(ApiError::not_found(uri.path()))
    }
}

/// PUT /users/:id/{albums,artists,songs} - writes only the named column
async fn replace_list(
    column: &'static ListColumn,
    state: AppState,
    identity: Option<AuthenticatedUser>,
    path: String,
    id: String,
    body: JsonBody,
) -> ApiResult<Value> {
    let body = body_or_empty(body);
    state.authorize(&USERS, Action::ReplaceList, identity.as_deref(), Some(&id), Some(&body))?;

    let Some(value) = body.get(column.field).filter(|v| is_truthy(v)).cloned() else {
        return Err(ApiError::unauthorized(format!(
            "You're trying to change something other than {}! You sneaky devil you.",
            column.field
        )));
    };

    let Some(id) = parse_leading_int(&id) else {
        return Err(ApiError::not_found(&path));
    };

    let updated = state
        .accessor(&USERS)
        .replace_field(id, column.field, value)
        .await
        .internal(column.failed)?;

    if !updated {
        return Err(ApiError::not_found(&path));
    }
    Ok(ApiResponse::created(json!({ "success": column.updated })))
}

/// GET /users/:id/{songs,albums,artists,labels} - rows owned by the user
async fn list_owned(
    owned: &'static Resource,
    state: AppState,
    identity: Option<AuthenticatedUser>,
    id: String,
) -> ApiResult<Value> {
    state.authorize(&USERS, Action::ListOwned, identity.as_deref(), Some(&id), None)?;

    let owner = parse_leading_int(&id).unwrap_or_default();
    let rows = state
        .accessor(owned)
        .list_by_owner(owner)
        .await
        .internal(&format!("Error fetching user {}.  Please try again later.", owned.name))?;

    Ok(ApiResponse::success(single(
        owned.name,
        Value::Array(rows.into_iter().map(Value::Object).collect()),
    )))
}
