//! Session state machine.
//!
//! `SessionManager` owns the process-wide session value and is the only
//! component that mutates it or writes the token store. Consumers hold the
//! manager and read `session()` / `is_admin()`; the gateway only ever
//! reads the store.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::models::{AuthResponse, LoginCredentials, RegisterData, Role, UserProfile};

use super::TokenStore;

/// The client's current belief about who is authenticated.
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    /// Process start, before the stored token has been validated
    Unresolved,
    Authenticated(UserProfile),
    /// No token stored, or the stored token was rejected
    Anonymous,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Session::Authenticated(p) if p.role.is_admin())
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            Session::Authenticated(profile) => Some(profile),
            _ => None,
        }
    }
}

/// Where the UI should navigate after a session transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    AdminConsole,
    ClientConsole,
    Landing,
}

impl Destination {
    pub fn for_role(role: Role) -> Self {
        if role.is_admin() {
            Destination::AdminConsole
        } else {
            Destination::ClientConsole
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Destination::AdminConsole => "/admin",
            Destination::ClientConsole => "/client",
            Destination::Landing => "/login",
        }
    }
}

/// Owns the session lifecycle: startup resolution, login, registration,
/// logout, profile reload.
///
/// In-flight gateway calls are not canceled by `logout`; each carries its
/// own token snapshot. Since only this type writes the token store, a stale
/// in-flight success cannot re-persist a cleared token.
pub struct SessionManager {
    api: ApiClient,
    store: Arc<dyn TokenStore>,
    session: Session,
}

impl SessionManager {
    pub fn new(api: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        Self {
            api,
            store,
            session: Session::Unresolved,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    /// Startup resolution. With no stored token this goes straight to
    /// `Anonymous` without touching the network. A stored token that the
    /// profile endpoint rejects is cleared, so the client never stays
    /// stuck holding a token the server already refused.
    pub async fn resolve(&mut self) -> &Session {
        if self.store.read().is_none() {
            self.session = Session::Anonymous;
            return &self.session;
        }

        match self.api.fetch_profile(None).await {
            Ok(profile) => {
                debug!(user = %profile.username, "Session restored from stored token");
                self.session = Session::Authenticated(profile);
            }
            Err(err) => {
                warn!(error = %err, "Stored token rejected, clearing it");
                if let Err(err) = self.store.clear() {
                    warn!(error = %err, "Failed to clear rejected token");
                }
                self.session = Session::Anonymous;
            }
        }
        &self.session
    }

    /// Log in. On failure the session is left unchanged and the gateway
    /// error propagates; nothing partial is stored.
    pub async fn login(&mut self, credentials: &LoginCredentials) -> Result<Destination> {
        let auth = self.api.login(credentials).await?;
        self.establish(auth)
    }

    /// Register a new account. Registration implies login: the same token
    /// storage and role-based destination as `login`.
    pub async fn register(&mut self, data: &RegisterData) -> Result<Destination> {
        let auth = self.api.register(data).await?;
        self.establish(auth)
    }

    fn establish(&mut self, auth: AuthResponse) -> Result<Destination> {
        self.store
            .store(&auth.access_token)
            .context("Failed to persist access token")?;
        if auth.user.role == Role::Unknown {
            warn!(user = %auth.user.username, "Server returned an unrecognized role; treating as non-admin");
        }
        let destination = Destination::for_role(auth.user.role);
        self.session = Session::Authenticated(auth.user);
        Ok(destination)
    }

    /// Log out. Purely local: clears the stored token and drops the
    /// in-memory identity. The session becomes `Anonymous` even if the
    /// store refuses to clear; the visible state never lags a logout.
    pub fn logout(&mut self) -> Destination {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "Failed to clear stored token during logout");
        }
        self.session = Session::Anonymous;
        Destination::Landing
    }

    /// Re-fetch the profile for the current token, replacing the held one.
    pub async fn reload_profile(&mut self) -> Result<()> {
        let profile = self.api.fetch_profile(None).await?;
        self.session = Session::Authenticated(profile);
        Ok(())
    }
}
