//! Who may do what, per resource and action.
//!
//! The table in [`rule_for`] is the whole access model. It is
//! uneven: catalog writes other than delete are open to anyone, labels are
//! guarded by the `ownerID` the caller sends, and user routes are guarded by
//! the `:id` in the path.

use serde_json::Value;

use super::Identity;
use crate::database::models::ResourceKind;
use crate::database::Record;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Create,
    Read,
    Replace,
    Delete,
    Login,
    /// Replace one of a user's list columns
    ReplaceList,
    /// List the rows a user owns
    ListOwned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRule {
    Public,
    /// Caller is the configured admin id
    Admin,
    /// Caller matches the `:id` path segment
    PathOwner,
    /// Caller matches `ownerID` in the request body
    BodyOwner,
}

impl AccessRule {
    pub fn requires_identity(self) -> bool {
        !matches!(self, AccessRule::Public)
    }
}

pub fn rule_for(kind: ResourceKind, action: Action) -> AccessRule {
    use AccessRule::*;
    use Action::*;
    use ResourceKind::*;

    match (kind, action) {
        (Songs | Albums | Artists, Delete) => Admin,
        (Songs | Albums | Artists, _) => Public,
        (Labels, Replace | Delete) => BodyOwner,
        (Labels, _) => Public,
        (Users, List | Delete) => Admin,
        (Users, Create | Login) => Public,
        (Users, Read | Replace | ReplaceList | ListOwned) => PathOwner,
    }
}

/// Request facts a rule may look at.
#[derive(Debug, Default)]
pub struct AccessContext<'a> {
    pub path_id: Option<&'a str>,
    pub body: Option<&'a Record>,
    pub admin_id: i64,
}

pub fn authorize(rule: AccessRule, identity: Option<&Identity>, ctx: &AccessContext<'_>) -> Result<(), ApiError> {
    if rule == AccessRule::Public {
        return Ok(());
    }

    let identity = identity.ok_or_else(|| ApiError::unauthorized("Invalid authentication token."))?;

    let allowed = match rule {
        AccessRule::Public => true,
        AccessRule::Admin => identity.matches_id(ctx.admin_id),
        AccessRule::PathOwner => ctx.path_id.map_or(false, |id| identity.matches_text(id)),
        AccessRule::BodyOwner => ctx
            .body
            .and_then(|body| body.get("ownerID"))
            .map_or(false, |owner: &Value| identity.matches(owner)),
    };

    if allowed {
        return Ok(());
    }

    tracing::warn!("Refused {:?} access for identity {}", rule, identity);
    match rule {
        AccessRule::Admin => Err(ApiError::unauthorized("You are not an admin.")),
        _ => Err(ApiError::unauthorized("Unauthorized action.")),
    }
}
