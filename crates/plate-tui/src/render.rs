//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use plate_core::navigation::Route;
use ratatui::Frame;

use crate::features::{profile, sign_in};
use crate::state::AppState;

/// Renders the visible route.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    match app.current_route() {
        Some(Route::Profile) => profile::render_profile(frame, &app.profile, area),
        Some(Route::SignIn) => sign_in::render_sign_in(frame, area),
        None => {}
    }
}
