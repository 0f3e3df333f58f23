//! Sign-in screen slice.
//!
//! Signing in happens through `plate login`; this screen only tells the user
//! they are signed out.

mod render;
mod update;

pub use render::{SIGNED_OUT_NOTICE, render_sign_in};
pub use update::handle_key;
