//! Application state composition.
//!
//! ```text
//! AppState
//! ├── router: Router         (route stack, top is visible)
//! ├── profile: ProfileState  (last snapshot from the controller)
//! ├── auth: AuthState        (last snapshot from the session)
//! └── should_quit: bool
//! ```

use plate_core::navigation::Route;
use plate_core::profile::ProfileState;
use plate_core::session::AuthState;

// ============================================================================
// Router
// ============================================================================

/// Stack of screens. The last element is the visible one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    stack: Vec<Route>,
}

impl Router {
    pub fn new(initial: Route) -> Self {
        Self {
            stack: vec![initial],
        }
    }

    pub fn current(&self) -> Option<Route> {
        self.stack.last().copied()
    }

    pub fn contains(&self, route: Route) -> bool {
        self.stack.contains(&route)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Swaps the top of the stack, returning the route it replaced.
    pub fn replace(&mut self, route: Route) -> Option<Route> {
        let previous = self.stack.pop();
        self.stack.push(route);
        previous
    }

    /// Pops the top of the stack.
    pub fn pop(&mut self) -> Option<Route> {
        self.stack.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

// ============================================================================
// AppState
// ============================================================================

pub struct AppState {
    pub router: Router,
    pub profile: ProfileState,
    pub auth: AuthState,
    pub should_quit: bool,
}

impl AppState {
    /// Starts on the profile screen when signed in, sign-in otherwise.
    pub fn new(auth: AuthState) -> Self {
        let initial = if auth.is_authenticated {
            Route::Profile
        } else {
            Route::SignIn
        };
        Self {
            router: Router::new(initial),
            profile: ProfileState::Loading,
            auth,
            should_quit: false,
        }
    }

    pub fn current_route(&self) -> Option<Route> {
        self.router.current()
    }
}
