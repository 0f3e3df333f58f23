//! Full-screen profile screen for plate.

pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};
use std::sync::Arc;

use anyhow::Result;
use plate_core::account::AccountService;
use plate_core::session::SessionContext;
pub use runtime::TuiRuntime;

/// Runs the interactive profile screen until the user quits.
///
/// # Errors
/// Returns an error if stdout is not a terminal or the terminal cannot be
/// set up.
pub async fn run_profile_screen(
    account: Arc<dyn AccountService>,
    session: SessionContext,
) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The profile screen requires a terminal.\n\
             Use `plate profile` for non-interactive output."
        );
    }

    let mut runtime = TuiRuntime::new(account, session)?;
    runtime.run()?;

    tracing::debug!("profile screen closed");
    Ok(())
}
