//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent controller calls and navigation only (no direct UI
//! mutations), which keeps the reducer pure.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Fetch the current user (first activation of the profile screen).
    LoadProfile,

    /// End the session and return to sign-in.
    Logout,

    /// Ask the navigator to go back one screen.
    NavigateBack,
}
