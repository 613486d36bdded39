//! Authentication state and role guards
//!
//! [`SessionManager`] owns the cached identity of the logged-in user and the
//! bearer token lifecycle (through [`ApiClient`]). A session is only "logged
//! in" when the cached user AND the persisted token are both present; a
//! half-present session is treated as logged out and left as is.
//!
//! Guards (`require_*`) never fail: they report through their return value
//! and the injected [`Navigator`].

use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    api::ApiClient,
    config::RoutesConfig,
    error::ClientResult,
    models::{Role, UserSummary},
    navigation::Navigator,
    storage::{KeyValueStore, CURRENT_USER_KEY, TOKEN_KEY},
};

/// Message shown before redirecting a user who lacks the required role
pub const ACCESS_DENIED: &str = "Access denied: Insufficient permissions";

/// Result of a login attempt. Failures carry a displayable message.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Success { user: UserSummary },
    Failure { error: String },
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Success { .. })
    }
}

pub struct SessionManager {
    api: Arc<ApiClient>,
    store: Arc<dyn KeyValueStore>,
    navigator: Arc<dyn Navigator>,
    routes: RoutesConfig,
    current_user: RwLock<Option<UserSummary>>,
}

impl SessionManager {
    /// Create the manager, loading any persisted user into memory
    pub fn new(
        api: Arc<ApiClient>,
        store: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
        routes: RoutesConfig,
    ) -> Self {
        let current_user = load_user(store.as_ref());
        Self {
            api,
            store,
            navigator,
            routes,
            current_user: RwLock::new(current_user),
        }
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    pub fn current_user(&self) -> Option<UserSummary> {
        self.current_user.read().clone()
    }

    /// Persist `user` and make it the cached current user
    pub fn save_user(&self, user: UserSummary) -> ClientResult<()> {
        let serialized = serde_json::to_string(&user)?;
        self.store.set(CURRENT_USER_KEY, &serialized)?;
        *self.current_user.write() = Some(user);
        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user.read().is_some() && self.store.get(TOKEN_KEY).is_some()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.current_user
            .read()
            .as_ref()
            .map_or(false, |user| user.role == role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.current_user
            .read()
            .as_ref()
            .map_or(false, |user| roles.contains(&user.role))
    }

    /// Log in and persist the session. Never returns an error: every failure
    /// becomes [`LoginOutcome::Failure`] and leaves the previous session untouched.
    pub async fn login(&self, email: &str, password: &str) -> LoginOutcome {
        match self.try_login(email, password).await {
            Ok(user) => {
                tracing::info!("Logged in as {} ({})", user.full_name, user.role);
                LoginOutcome::Success { user }
            }
            Err(e) => {
                tracing::warn!("Login failed for {}: {}", email, e);
                LoginOutcome::Failure {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn try_login(&self, email: &str, password: &str) -> ClientResult<UserSummary> {
        let response = self.api.login(email, password).await?;

        let previous_token = self.api.token();
        self.api.set_token(&response.token)?;

        if let Err(e) = self.save_user(response.user.clone()) {
            // Put the old token back so token and user stay paired
            let restored = match previous_token {
                Some(token) => self.api.set_token(&token),
                None => self.api.remove_token(),
            };
            if let Err(restore_err) = restored {
                tracing::error!("Failed to restore previous token: {}", restore_err);
            }
            return Err(e);
        }

        Ok(response.user)
    }

    /// Drop the session and leave for the login page
    pub fn logout(&self) {
        if let Err(e) = self.api.remove_token() {
            tracing::warn!("Failed to remove token: {}", e);
        }
        if let Err(e) = self.store.remove(CURRENT_USER_KEY) {
            tracing::warn!("Failed to remove current user: {}", e);
        }
        *self.current_user.write() = None;

        tracing::info!("Logged out");
        self.navigator.redirect(&self.routes.login_page);
    }

    /// Redirect to the login page unless logged in
    pub fn require_auth(&self) -> bool {
        if !self.is_logged_in() {
            self.navigator.redirect(&self.routes.login_page);
            return false;
        }
        true
    }

    pub fn require_role(&self, role: Role) -> bool {
        if !self.require_auth() {
            return false;
        }
        if !self.has_role(role) {
            self.deny();
            return false;
        }
        true
    }

    pub fn require_any_role(&self, roles: &[Role]) -> bool {
        if !self.require_auth() {
            return false;
        }
        if !self.has_any_role(roles) {
            self.deny();
            return false;
        }
        true
    }

    fn deny(&self) {
        tracing::debug!("Access denied, redirecting to {}", self.routes.landing_page);
        self.navigator.alert(ACCESS_DENIED);
        self.navigator.redirect(&self.routes.landing_page);
    }
}

fn load_user(store: &dyn KeyValueStore) -> Option<UserSummary> {
    let raw = store.get(CURRENT_USER_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::warn!("Ignoring unreadable persisted user: {}", e);
            None
        }
    }
}
