//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: terminal input
//! from the event loop, state changes forwarded from watch channels, and
//! navigation requests posted by the controller.

use crossterm::event::Event;
use plate_core::navigation::NavRequest;
use plate_core::profile::ProfileState;
use plate_core::session::AuthState;

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Periodic tick from the event loop.
    Tick,

    /// Raw terminal input.
    Terminal(Event),

    /// The controller published a new profile state.
    ProfileChanged(ProfileState),

    /// The shared auth state changed.
    AuthChanged(AuthState),

    /// The controller asked to navigate.
    Navigate(NavRequest),
}
