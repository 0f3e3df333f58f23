//! Profile screen slice.

mod render;
mod update;

pub use render::{LOGOUT_BUTTON, render_profile};
pub use update::handle_key;
