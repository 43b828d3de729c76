// handlers/mod.rs - Route handlers per resource
//
// Every route asks the policy table in `auth::policy` whether it needs a
// verified identity; `guarded` attaches the bearer-token gate only to those.

use axum::{middleware, routing::MethodRouter, Json};
use serde_json::{Map, Value};

use crate::auth::{rule_for, Action};
use crate::database::models::Resource;
use crate::database::Record;
use crate::middleware::require_authentication;
use crate::state::AppState;

pub mod catalog;
pub mod labels;
pub mod service;
pub mod users;

/// First `page` value of a raw query string. Repeated or malformed pairs
/// are tolerated; the caller falls back to page 1.
pub fn page_param(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == "page")
        .map(|(_, value)| value.into_owned())
}

/// A JSON object body. Missing, malformed, or non-object bodies read as empty.
pub type JsonBody = Option<Json<Record>>;

pub fn body_or_empty(body: JsonBody) -> Record {
    body.map(|Json(record)| record).unwrap_or_default()
}

/// Wrap `route` in the authentication gate when the rule for
/// `(resource, action)` needs an identity.
pub fn guarded(
    route: MethodRouter<AppState>,
    resource: &Resource,
    action: Action,
    state: &AppState,
) -> MethodRouter<AppState> {
    if rule_for(resource.kind, action).requires_identity() {
        route.route_layer(middleware::from_fn_with_state(state.clone(), require_authentication))
    } else {
        route
    }
}

/// `{ key: value }`
pub fn single(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

/// Loose truthiness of a submitted value: null, false, 0 and "" are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
