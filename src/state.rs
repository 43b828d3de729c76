use std::sync::Arc;

use crate::auth::{authorize, rule_for, AccessContext, Action, Identity, TokenError, TokenIssuer};
use crate::config::AppConfig;
use crate::database::models::Resource;
use crate::database::{Accessor, Record, Store};
use crate::error::ApiError;

/// Process-wide state shared by every request: the store (and its pool),
/// the token issuer holding the signing secret, and configuration.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: Arc<TokenIssuer>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn try_new(config: AppConfig, store: Arc<dyn Store>) -> Result<Self, TokenError> {
        let tokens = TokenIssuer::from_config(&config.security)?;
        Ok(Self {
            store,
            tokens: Arc::new(tokens),
            config: Arc::new(config),
        })
    }

    /// Like [`AppState::try_new`] for configs whose secret is known to be set.
    #[cfg(test)]
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Self {
        Self::try_new(config, store).expect("config carries a JWT secret")
    }

    pub fn accessor(&self, resource: &'static Resource) -> Accessor<'_> {
        Accessor::new(resource, self.store.as_ref(), self.config.api.page_size)
    }

    /// Apply the access rule for `action` on `resource`.
    pub fn authorize(
        &self,
        resource: &Resource,
        action: Action,
        identity: Option<&Identity>,
        path_id: Option<&str>,
        body: Option<&Record>,
    ) -> Result<(), ApiError> {
        let ctx = AccessContext {
            path_id,
            body,
            admin_id: self.config.security.admin_id,
        };
        authorize(rule_for(resource.kind, action), identity, &ctx)
    }
}
