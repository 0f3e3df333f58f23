//! Login/logout command handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use plate_core::account::{AccountService, AppwriteAccount};
use plate_core::navigation::{Navigator, RouteLog};
use plate_core::profile::ProfileController;
use plate_core::session::SessionContext;

/// Creates a session, stores it, and records the signed-in user.
///
/// # Errors
/// Returns an error if the credentials are rejected or the account cannot
/// be fetched with the new session.
pub async fn login(
    account: &AppwriteAccount,
    session: &SessionContext,
    email: &str,
    password: &str,
) -> Result<()> {
    let stored = account
        .create_email_session(email, password)
        .await
        .context("sign in")?;
    tracing::debug!(user_id = %stored.user_id, "fetching signed-in account");

    let user = account
        .get_current_user()
        .await
        .context("fetch signed-in account")?;
    println!("Signed in as {} <{}>", user.name, user.email);
    // Login-flow writer of the shared auth state. Headless commands exit
    // right after, so only in-process readers would observe it.
    session.sign_in(user);
    Ok(())
}

/// Ends the session. Never fails: local sign-out always happens.
pub async fn logout(account: Arc<dyn AccountService>, session: SessionContext) -> Result<()> {
    let navigator = Arc::new(RouteLog::new());
    let controller = ProfileController::new(
        account,
        session,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
    );
    controller.logout().await;

    println!("Signed out.");
    if let Some(route) = navigator.last_replaced() {
        println!("Next: {route}");
    }
    Ok(())
}
