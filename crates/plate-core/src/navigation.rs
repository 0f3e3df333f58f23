//! Navigation seam.
//!
//! Controllers never drive a UI directly; they signal a `Navigator`. The TUI
//! runtime implements it by posting events to its inbox, headless commands
//! use `RouteLog`.

use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Screens the controller can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Profile,
    SignIn,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Profile => "profile",
            Route::SignIn => "sign-in",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A navigation signal as issued by a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavRequest {
    /// Replace the current screen; it is dropped from back history.
    Replace(Route),
    /// Go back one screen.
    Back,
}

/// Receives navigation signals. Calls are fire-and-forget.
pub trait Navigator: Send + Sync {
    fn replace(&self, route: Route);
    fn back(&self);
}

/// Navigator that only records requests, in order.
#[derive(Debug, Default)]
pub struct RouteLog {
    requests: Mutex<Vec<NavRequest>>,
}

impl RouteLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<NavRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most recent replacement target, if any.
    pub fn last_replaced(&self) -> Option<Route> {
        self.requests().into_iter().rev().find_map(|req| match req {
            NavRequest::Replace(route) => Some(route),
            NavRequest::Back => None,
        })
    }

    fn push(&self, request: NavRequest) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
    }
}

impl Navigator for RouteLog {
    fn replace(&self, route: Route) {
        self.push(NavRequest::Replace(route));
    }

    fn back(&self) {
        self.push(NavRequest::Back);
    }
}
