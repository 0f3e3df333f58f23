//! Headless profile command.

use std::sync::Arc;

use anyhow::{Context, Result};
use plate_core::account::AccountService;
use plate_core::logging;
use plate_core::navigation::{Navigator, RouteLog};
use plate_core::profile::{ProfileController, ProfileView};
use plate_core::session::SessionContext;

/// Loads the profile once and prints it.
///
/// # Errors
/// Returns an error if not signed in, or if the profile never left
/// `Loading` (the cause is in the log file).
pub async fn run(account: Arc<dyn AccountService>, session: SessionContext, json: bool) -> Result<()> {
    if !session.is_authenticated() {
        anyhow::bail!("Not signed in. Run `plate login --email <email>` first.");
    }

    let navigator: Arc<dyn Navigator> = Arc::new(RouteLog::new());
    let controller = ProfileController::new(account, session, navigator);
    controller.load_profile().await;

    let state = controller.state();
    let Some(profile) = state.profile() else {
        anyhow::bail!(
            "Profile is still loading; the request failed. See {} for details.",
            logging::log_path().display()
        );
    };

    if json {
        let out = serde_json::to_string_pretty(profile).context("serialize profile")?;
        println!("{out}");
    } else {
        print!("{}", format_profile(&profile.view()));
    }
    Ok(())
}

/// Aligned `label  value` lines, avatar last.
fn format_profile(view: &ProfileView<'_>) -> String {
    let rows = view.rows();
    let width = rows
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or_default();

    rows.iter()
        .chain([("Avatar", view.avatar)].iter())
        .map(|(label, value)| format!("{label:<width$}  {value}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use plate_core::profile::{PHONE_PLACEHOLDER, UserProfile};

    use super::*;

    #[test]
    fn test_format_profile_aligns_labels() {
        let user = UserProfile::new("Ana", "ana@x.com");
        let text = format_profile(&user.view());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Full Name           Ana");
        assert!(lines[2].starts_with("Phone number"));
        assert!(lines[2].ends_with(PHONE_PLACEHOLDER));
        assert!(lines[5].starts_with("Avatar"));
    }
}
