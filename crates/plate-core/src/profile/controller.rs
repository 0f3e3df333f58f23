//! Profile screen controller.
//!
//! Two operations, both driven by the screen:
//! - `load_profile`: runs once on activation, `Loading -> Loaded` on success.
//!   Failures are logged and leave the state in `Loading`.
//! - `logout`: asks the account service to end the session, then signs out
//!   locally and navigates to sign-in no matter how that call went.
//!
//! State is published through a `watch` channel so a screen can re-render on
//! change without polling.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use super::ProfileState;
use crate::account::AccountService;
use crate::navigation::{Navigator, Route};
use crate::session::SessionContext;

pub struct ProfileController {
    account: Arc<dyn AccountService>,
    session: SessionContext,
    navigator: Arc<dyn Navigator>,
    state: watch::Sender<ProfileState>,
    /// Set by the first `load_profile` call of this activation.
    activated: AtomicBool,
}

impl ProfileController {
    pub fn new(
        account: Arc<dyn AccountService>,
        session: SessionContext,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (state, _rx) = watch::channel(ProfileState::Loading);
        Self {
            account,
            session,
            navigator,
            state,
            activated: AtomicBool::new(false),
        }
    }

    /// Returns a copy of the current state.
    pub fn state(&self) -> ProfileState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ProfileState> {
        self.state.subscribe()
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Fetches the current user once per activation.
    ///
    /// Later calls are no-ops. There is no retry: a failed fetch keeps the
    /// screen in `Loading`.
    pub async fn load_profile(&self) {
        if self.activated.swap(true, Ordering::SeqCst) {
            tracing::debug!("profile already requested for this activation");
            return;
        }

        match self.account.get_current_user().await {
            Ok(profile) => {
                let changed = self.state.send_if_modified(|state| state.resolve(profile));
                tracing::info!(changed, "profile loaded");
            }
            Err(err) => {
                tracing::error!(kind = %err.kind, "failed to load user profile: {err}");
            }
        }
    }

    /// Ends the session, fail-open.
    ///
    /// Local sign-out and the redirect to sign-in run from a drop guard, so
    /// they also happen if the termination call fails, panics, or this
    /// future is dropped before it completes.
    pub async fn logout(&self) {
        let _sign_out = SignOutGuard {
            session: &self.session,
            navigator: self.navigator.as_ref(),
        };

        if let Err(err) = self.account.terminate_current_session().await {
            tracing::warn!(kind = %err.kind, "logout issue: {err}");
        }
    }
}

/// Clears the shared auth state, then redirects to sign-in.
struct SignOutGuard<'a> {
    session: &'a SessionContext,
    navigator: &'a dyn Navigator,
}

impl Drop for SignOutGuard<'_> {
    fn drop(&mut self) {
        self.session.sign_out();
        self.navigator.replace(Route::SignIn);
        tracing::debug!("signed out locally, redirected to {}", Route::SignIn);
    }
}
