//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyEventKind};
use plate_core::navigation::{NavRequest, Route};
use plate_core::profile::ProfileState;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::{profile, sign_in};
use crate::state::AppState;

/// Effects to run once, before the first event is processed.
pub fn on_start(app: &AppState) -> Vec<UiEffect> {
    match app.current_route() {
        Some(Route::Profile) => vec![UiEffect::LoadProfile],
        _ => vec![],
    }
}

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => vec![],
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::ProfileChanged(state) => {
            // Late results for a screen that is gone are dropped.
            if app.router.contains(Route::Profile) {
                app.profile = state;
            }
            vec![]
        }
        UiEvent::AuthChanged(auth) => {
            app.auth = auth;
            vec![]
        }
        UiEvent::Navigate(request) => handle_navigation(app, request),
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    let Event::Key(key) = event else {
        return vec![];
    };
    if key.kind != KeyEventKind::Press {
        return vec![];
    }

    match app.current_route() {
        Some(Route::Profile) => profile::handle_key(&app.profile, key),
        Some(Route::SignIn) => sign_in::handle_key(key),
        None => vec![],
    }
}

fn handle_navigation(app: &mut AppState, request: NavRequest) -> Vec<UiEffect> {
    let mut effects = vec![];
    match request {
        NavRequest::Replace(route) => {
            let previous = app.router.replace(route);
            tracing::debug!(from = ?previous, to = %route, "route replaced");
        }
        NavRequest::Back => {
            let previous = app.router.pop();
            tracing::debug!(from = ?previous, "route popped");
            if app.router.is_empty() {
                effects.push(UiEffect::Quit);
            }
        }
    }

    if !app.router.contains(Route::Profile) {
        app.profile = ProfileState::Loading;
    }
    effects
}
