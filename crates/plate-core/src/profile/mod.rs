//! User profile domain.
//!
//! `UserProfile` is the record owned by the account service. The screen never
//! edits it; it only projects it into a `ProfileView` where every optional
//! field has been resolved to the text that is actually displayed.
//!
//! Structure:
//! - `mod.rs`: profile record, display fallbacks, controller state
//! - `controller.rs`: `ProfileController` (load on activation, fail-open logout)

pub mod controller;

pub use controller::ProfileController;
use serde::{Deserialize, Serialize};

/// Shown in place of a missing phone number.
pub const PHONE_PLACEHOLDER: &str = "+1 555 123 4567";

/// Shown in place of a missing home address.
pub const HOME_ADDRESS_PLACEHOLDER: &str = "123 Main Street, Springfield, IL 62704";

/// Shown in place of a missing work address.
pub const WORK_ADDRESS_PLACEHOLDER: &str = "221B Rose Street, Foodville, FL 12345";

/// Bundled image used when the profile has no avatar.
pub const DEFAULT_AVATAR: &str = "assets/images/avatar.png";

/// Text displayed while the profile is being fetched.
pub const LOADING_TEXT: &str = "Loading profile...";

/// User record as returned by the account service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_home: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_work: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl UserProfile {
    /// Creates a profile with only the required fields set.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            address_home: None,
            address_work: None,
            avatar_url: None,
        }
    }

    /// Resolves every field to its displayed value.
    pub fn view(&self) -> ProfileView<'_> {
        ProfileView {
            name: &self.name,
            email: &self.email,
            phone: or_placeholder(self.phone.as_deref(), PHONE_PLACEHOLDER),
            address_home: or_placeholder(self.address_home.as_deref(), HOME_ADDRESS_PLACEHOLDER),
            address_work: or_placeholder(self.address_work.as_deref(), WORK_ADDRESS_PLACEHOLDER),
            avatar: or_placeholder(self.avatar_url.as_deref(), DEFAULT_AVATAR),
        }
    }
}

/// Empty strings count as missing, same as an absent field.
fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'static str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}

/// Render-time projection of a profile (fallbacks already substituted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileView<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub address_home: &'a str,
    pub address_work: &'a str,
    pub avatar: &'a str,
}

impl<'a> ProfileView<'a> {
    /// Labelled rows of the profile card, in display order.
    pub fn rows(&self) -> [(&'static str, &'a str); 5] {
        [
            ("Full Name", self.name),
            ("Email", self.email),
            ("Phone number", self.phone),
            ("Address 1 - (Home)", self.address_home),
            ("Address 2 - (Work)", self.address_work),
        ]
    }
}

/// Profile screen state.
///
/// There is no error variant: a failed fetch leaves the
/// screen in `Loading`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProfileState {
    #[default]
    Loading,
    Loaded(UserProfile),
}

impl ProfileState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ProfileState::Loaded(_))
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            ProfileState::Loading => None,
            ProfileState::Loaded(profile) => Some(profile),
        }
    }

    /// Applies the single `Loading -> Loaded` transition.
    ///
    /// Returns false (and leaves the state untouched) when already loaded.
    pub fn resolve(&mut self, profile: UserProfile) -> bool {
        match self {
            ProfileState::Loading => {
                *self = ProfileState::Loaded(profile);
                true
            }
            ProfileState::Loaded(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_substitutes_placeholders_for_missing_fields() {
        let profile = UserProfile::new("Ana", "ana@x.com");
        let view = profile.view();

        assert_eq!(view.name, "Ana");
        assert_eq!(view.email, "ana@x.com");
        assert_eq!(view.phone, PHONE_PLACEHOLDER);
        assert_eq!(view.address_home, HOME_ADDRESS_PLACEHOLDER);
        assert_eq!(view.address_work, WORK_ADDRESS_PLACEHOLDER);
        assert_eq!(view.avatar, DEFAULT_AVATAR);
    }

    #[test]
    fn test_view_shows_present_fields_verbatim() {
        let profile = UserProfile {
            phone: Some("  +44 20 7946 0000 ".to_string()),
            address_home: Some("1 Elm Row".to_string()),
            address_work: Some("Dock 7, Harbour Rd".to_string()),
            avatar_url: Some("https://cdn.example.com/a.png".to_string()),
            ..UserProfile::new("Ana", "ana@x.com")
        };
        let view = profile.view();

        assert_eq!(view.phone, "  +44 20 7946 0000 ");
        assert_eq!(view.address_home, "1 Elm Row");
        assert_eq!(view.address_work, "Dock 7, Harbour Rd");
        assert_eq!(view.avatar, "https://cdn.example.com/a.png");
    }

    #[test]
    fn test_empty_strings_fall_back() {
        let profile = UserProfile {
            phone: Some(String::new()),
            address_home: Some(String::new()),
            ..UserProfile::new("Ana", "ana@x.com")
        };
        let view = profile.view();

        assert_eq!(view.phone, PHONE_PLACEHOLDER);
        assert_eq!(view.address_home, HOME_ADDRESS_PLACEHOLDER);
    }

    #[test]
    fn test_rows_are_labelled_in_display_order() {
        let profile = UserProfile::new("Ana", "ana@x.com");
        let labels: Vec<&str> = profile.view().rows().iter().map(|(l, _)| *l).collect();
        assert_eq!(
            labels,
            [
                "Full Name",
                "Email",
                "Phone number",
                "Address 1 - (Home)",
                "Address 2 - (Work)"
            ]
        );
    }

    #[test]
    fn test_resolve_transitions_once() {
        let mut state = ProfileState::default();
        assert!(!state.is_loaded());

        assert!(state.resolve(UserProfile::new("Ana", "ana@x.com")));
        assert!(!state.resolve(UserProfile::new("Bob", "bob@x.com")));
        assert_eq!(state.profile().map(|p| p.name.as_str()), Some("Ana"));
    }
}
