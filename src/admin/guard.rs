//! Admin-area auth guard.
//!
//! `Checking → {Authenticated, Redirecting(AdminLogin)}`, with the login
//! route itself bypassing the check. This only checks that a stored token
//! still resolves to a user; the server enforces permissions on every call.

use crate::client::{ApiClient, SharedStorage};
use crate::models::User;
use crate::site::Route;
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Consultant,
}

impl Role {
    pub fn of(user: &User) -> Role {
        if user.is_admin {
            Role::Admin
        } else {
            Role::Consultant
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GuardState {
    Checking,
    Authenticated(User),
    Redirecting(Route),
    Bypassed,
}

pub struct AuthGuard {
    storage: SharedStorage,
    client: ApiClient,
    state: GuardState,
}

impl AuthGuard {
    pub fn new(storage: SharedStorage, client: ApiClient) -> Self {
        Self {
            storage,
            client,
            state: GuardState::Checking,
        }
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// Client carrying the current token, for admin surfaces.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// The user stored at login, without a round trip.
    pub fn stored_user(&self) -> Option<User> {
        let raw = self.storage.get(USER_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    pub async fn check(&mut self, route: &Route) -> &GuardState {
        if *route == Route::AdminLogin {
            self.state = GuardState::Bypassed;
            return &self.state;
        }
        self.state = GuardState::Checking;

        let Some(token) = self.storage.get(TOKEN_KEY) else {
            debug!("No stored token, redirecting {} to login", route);
            self.state = GuardState::Redirecting(Route::AdminLogin);
            return &self.state;
        };

        self.client.set_token(Some(token));
        self.state = match self.client.current_user().await {
            Ok(user) => GuardState::Authenticated(user),
            Err(err) => {
                warn!("Stored session rejected ({}), redirecting to login", err);
                self.clear_credentials();
                GuardState::Redirecting(Route::AdminLogin)
            }
        };
        &self.state
    }

    /// Sign in and persist the token plus the serialized user.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<User> {
        let response = self.client.login(username, password).await?;

        let user_json = serde_json::to_string(&response.user)?;
        self.storage
            .set(TOKEN_KEY, &response.token)
            .context("Failed to persist token")?;
        self.storage
            .set(USER_KEY, &user_json)
            .context("Failed to persist user")?;

        self.client.set_token(Some(response.token));
        info!("Signed in as '{}'", response.user.username);
        self.state = GuardState::Authenticated(response.user.clone());
        Ok(response.user)
    }

    /// Clear stored credentials. The server session is revoked best-effort.
    pub async fn logout(&mut self) {
        if self.client.token().is_some() {
            if let Err(err) = self.client.logout().await {
                warn!("Server-side logout failed: {}", err);
            }
        }
        self.clear_credentials();
        self.state = GuardState::Redirecting(Route::AdminLogin);
    }

    fn clear_credentials(&mut self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(err) = self.storage.remove(key) {
                warn!("Failed to clear '{}' from client storage: {}", key, err);
            }
        }
        self.client.set_token(None);
    }
}
