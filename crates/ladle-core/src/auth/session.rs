//! The session store.
//!
//! Owns the authenticated identity for the current app instance: token,
//! user id, and the `is_loading`/`is_authenticated` flags everything else
//! keys off. Other components read session state through snapshots; only
//! the operations here may change it.

use std::sync::Mutex;

use ladle_types::{AuthResponse, Credentials};

use super::credentials::{self, StoredCredentials};
use crate::api::ApiClient;

/// Snapshot of the current session state.
///
/// `is_loading` is true until the startup credential check completes;
/// consumers (notably the navigation controller) must not trust
/// `is_authenticated` before it flips false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl Session {
    fn initial() -> Self {
        Self {
            token: None,
            user_id: None,
            is_authenticated: false,
            is_loading: true,
        }
    }
}

/// The session service. Construct once at startup and share via `Arc`.
pub struct SessionStore {
    state: Mutex<Session>,
    client: ApiClient,
}

impl SessionStore {
    /// Creates the store and runs the startup credential check.
    ///
    /// `check_auth` is local-only (no network), so construction never
    /// blocks on the backend.
    pub fn new(client: ApiClient) -> Self {
        let store = Self {
            state: Mutex::new(Session::initial()),
            client,
        };
        store.check_auth();
        store
    }

    /// Returns a snapshot of the current session state.
    pub fn snapshot(&self) -> Session {
        self.lock().clone()
    }

    /// Returns the current token, if any.
    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    /// Returns whether the session is authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.lock().is_authenticated
    }

    /// Restores the session from persisted credentials.
    ///
    /// Returns whether a session was restored. Always clears `is_loading`,
    /// regardless of outcome; a failed check is still a completed check.
    pub fn check_auth(&self) -> bool {
        let restored = match credentials::load() {
            Ok(Some(creds)) => Some(creds),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to read stored credentials: {:#}", e);
                None
            }
        };

        let mut state = self.lock();
        state.is_loading = false;
        match restored {
            Some(creds) => {
                state.token = Some(creds.token);
                state.user_id = Some(creds.user_id);
                state.is_authenticated = true;
                true
            }
            None => false,
        }
    }

    /// Registers a new account and starts a session.
    ///
    /// Same contract as [`login`](Self::login), against the registration
    /// endpoint.
    pub async fn sign_up(&self, email: &str, password: &str) -> bool {
        self.authenticate("/api/auth/register", email, password)
            .await
    }

    /// Logs in with existing credentials.
    ///
    /// On success, persists the returned token/user id and marks the
    /// session authenticated. Any failure (transport, rejection,
    /// malformed response) is logged and reported as `false`; nothing
    /// propagates to the caller.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        self.authenticate("/api/auth/login", email, password).await
    }

    async fn authenticate(&self, path: &str, email: &str, password: &str) -> bool {
        let body = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: AuthResponse = match self.client.post_json(path, None, &body).await {
            Ok(res) => res,
            Err(e) => {
                tracing::warn!(kind = %e.kind, "Auth request to {} failed: {}", path, e);
                return false;
            }
        };

        if !response.success {
            tracing::debug!(
                "Backend rejected credentials: {}",
                response.message.as_deref().unwrap_or("no message")
            );
            return false;
        }

        let (Some(token), Some(user_id)) = (response.token, response.user_id) else {
            tracing::warn!("Auth response from {} is missing token or userId", path);
            return false;
        };

        let creds = StoredCredentials {
            token: token.clone(),
            user_id: user_id.clone(),
        };
        if let Err(e) = credentials::save(&creds) {
            // The in-memory session is still valid for this run.
            tracing::warn!("Failed to persist credentials: {:#}", e);
        }

        let mut state = self.lock();
        state.token = Some(token);
        state.user_id = Some(user_id);
        state.is_authenticated = true;
        true
    }

    /// Ends the session: clears in-memory and persisted credentials.
    ///
    /// Always succeeds; no network call.
    pub fn logout(&self) {
        if let Err(e) = credentials::clear() {
            tracing::warn!("Failed to remove stored credentials: {:#}", e);
        }

        let mut state = self.lock();
        state.token = None;
        state.user_id = None;
        state.is_authenticated = false;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Session> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
