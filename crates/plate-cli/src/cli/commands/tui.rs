//! Interactive profile screen (default command).

use std::sync::Arc;

use anyhow::Result;
use plate_core::account::AccountService;
use plate_core::session::SessionContext;

#[cfg(feature = "tui")]
pub async fn run(account: Arc<dyn AccountService>, session: SessionContext) -> Result<()> {
    plate_tui::run_profile_screen(account, session).await
}

#[cfg(not(feature = "tui"))]
pub async fn run(_account: Arc<dyn AccountService>, _session: SessionContext) -> Result<()> {
    anyhow::bail!("This build has no profile screen. Use `plate profile` instead.")
}
