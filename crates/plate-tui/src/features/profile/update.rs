//! Profile screen key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use plate_core::profile::ProfileState;

use crate::effects::UiEffect;

/// Maps a key press on the profile screen to effects.
///
/// The logout button only exists once the profile is loaded, so the logout
/// keys do nothing while loading.
pub fn handle_key(profile: &ProfileState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        KeyCode::Char('q') => vec![UiEffect::Quit],
        KeyCode::Char('l') | KeyCode::Enter if profile.is_loaded() => vec![UiEffect::Logout],
        KeyCode::Esc | KeyCode::Left | KeyCode::Char('b') => vec![UiEffect::NavigateBack],
        _ => vec![],
    }
}
