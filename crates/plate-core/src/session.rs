//! Shared authentication state.
//!
//! `SessionContext` is the single owner of `AuthState`. It is created by the
//! entry point and handed explicitly to whoever needs it: the login flow and
//! the profile controller write it, screens read it or subscribe to changes.
//!
//! Backed by a `watch` channel so readers get change notifications and
//! writers never block.

use std::sync::Arc;

use tokio::sync::watch;

use crate::profile::UserProfile;

/// Process-wide record of who is signed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub current_user: Option<UserProfile>,
    pub is_authenticated: bool,
}

impl AuthState {
    /// Signed-out values (no user, not authenticated).
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Authenticated state, optionally with the user record already known.
    pub fn authenticated(user: Option<UserProfile>) -> Self {
        Self {
            current_user: user,
            is_authenticated: true,
        }
    }
}

/// Cloneable handle to the shared `AuthState`.
#[derive(Debug, Clone)]
pub struct SessionContext {
    tx: Arc<watch::Sender<AuthState>>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(AuthState::signed_out())
    }
}

impl SessionContext {
    pub fn new(initial: AuthState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> AuthState {
        self.tx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_authenticated
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }

    pub fn set_current_user(&self, user: Option<UserProfile>) {
        self.tx.send_modify(|state| state.current_user = user);
    }

    pub fn set_is_authenticated(&self, value: bool) {
        self.tx.send_modify(|state| state.is_authenticated = value);
    }

    /// Login flow writer: records the signed-in user.
    ///
    /// Both fields change in one update, so readers never see a half-written
    /// state.
    pub fn sign_in(&self, user: UserProfile) {
        self.tx.send_replace(AuthState::authenticated(Some(user)));
    }

    /// Logout flow writer: resets both fields to their signed-out values in
    /// one update.
    pub fn sign_out(&self) {
        self.tx.send_replace(AuthState::signed_out());
    }
}
