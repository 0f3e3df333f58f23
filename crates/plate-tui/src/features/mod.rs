//! Feature slices for the TUI (update/render per screen).

pub mod profile;
pub mod sign_in;
