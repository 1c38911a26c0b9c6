//! Navigation state machine.
//!
//! Pure state, no I/O: the frontend feeds session snapshots into
//! [`Router::sync`] and renders whatever [`Router::current`] says. Auth
//! transitions **reset** the stack to a new root instead of pushing, so a
//! logged-out user can never navigate back into authenticated screens and
//! vice versa.

use crate::auth::Session;

/// Authentication phase as the router sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// Session restore still in flight (`is_loading`); don't route yet.
    Unknown,
    Authenticated,
    Unauthenticated,
}

/// A screen on the navigation stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login,
    SignUp,
    Home,
    RecipeDetails { recipe_id: String },
}

/// The navigation controller.
///
/// Starts on the login root in the `Unknown` phase; the first `sync` after
/// the session finishes loading performs the one-time
/// `Unknown → Authenticated|Unauthenticated` transition.
#[derive(Debug)]
pub struct Router {
    phase: AuthPhase,
    stack: Vec<Screen>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            phase: AuthPhase::Unknown,
            stack: vec![Screen::Login],
        }
    }

    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    /// Returns the visible screen. The stack is never empty.
    pub fn current(&self) -> &Screen {
        self.stack.last().expect("navigation stack is never empty")
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    /// Applies the session state to the router.
    ///
    /// Returns `true` when a phase transition happened, which always
    /// resets the stack to the new root and discards back-history.
    /// While the session is still loading, nothing changes.
    pub fn sync(&mut self, session: &Session) -> bool {
        let target = if session.is_loading {
            AuthPhase::Unknown
        } else if session.is_authenticated {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Unauthenticated
        };

        if target == AuthPhase::Unknown || target == self.phase {
            return false;
        }

        self.phase = target;
        let root = match target {
            AuthPhase::Authenticated => Screen::Home,
            AuthPhase::Unauthenticated => Screen::Login,
            AuthPhase::Unknown => unreachable!(),
        };
        self.stack.clear();
        self.stack.push(root);
        true
    }

    /// Pushes a screen for in-phase forward navigation.
    pub fn push(&mut self, screen: Screen) {
        self.stack.push(screen);
    }

    /// Pops the current screen. Returns `false` at the root.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(is_loading: bool, is_authenticated: bool) -> Session {
        Session {
            token: is_authenticated.then(|| "jwt".to_string()),
            user_id: is_authenticated.then(|| "u1".to_string()),
            is_authenticated,
            is_loading,
        }
    }

    #[test]
    fn test_loading_session_does_not_route() {
        let mut router = Router::new();
        assert_eq!(router.phase(), AuthPhase::Unknown);
        assert_eq!(router.current(), &Screen::Login);

        assert!(!router.sync(&session(true, false)));
        assert_eq!(router.phase(), AuthPhase::Unknown);
    }

    #[test]
    fn test_first_authenticated_sync_resets_to_home_root() {
        let mut router = Router::new();

        assert!(router.sync(&session(false, true)));
        assert_eq!(router.phase(), AuthPhase::Authenticated);
        assert_eq!(router.current(), &Screen::Home);
        // Reset, not push: home is the root, nothing to go back to
        assert!(!router.can_go_back());

        // Exactly once: the same state does not re-trigger
        assert!(!router.sync(&session(false, true)));
    }

    #[test]
    fn test_first_unauthenticated_sync_resets_to_login_root() {
        let mut router = Router::new();
        // Forward navigation while the phase is still unknown
        router.push(Screen::SignUp);

        assert!(router.sync(&session(false, false)));
        assert_eq!(router.phase(), AuthPhase::Unauthenticated);
        assert_eq!(router.current(), &Screen::Login);
        assert!(!router.can_go_back());
    }

    #[test]
    fn test_logout_discards_authenticated_back_history() {
        let mut router = Router::new();
        router.sync(&session(false, true));
        router.push(Screen::RecipeDetails {
            recipe_id: "r1".to_string(),
        });
        assert!(router.can_go_back());

        // Logout: reset to login, authenticated screens unreachable
        assert!(router.sync(&session(false, false)));
        assert_eq!(router.current(), &Screen::Login);
        assert!(!router.can_go_back());
        assert!(!router.pop());
    }

    #[test]
    fn test_login_after_logout_resets_again() {
        let mut router = Router::new();
        router.sync(&session(false, false));
        router.push(Screen::SignUp);

        assert!(router.sync(&session(false, true)));
        assert_eq!(router.current(), &Screen::Home);
        assert!(!router.can_go_back());
    }

    #[test]
    fn test_push_pop_within_a_phase() {
        let mut router = Router::new();
        router.sync(&session(false, true));

        router.push(Screen::RecipeDetails {
            recipe_id: "r7".to_string(),
        });
        assert_eq!(
            router.current(),
            &Screen::RecipeDetails {
                recipe_id: "r7".to_string()
            }
        );

        assert!(router.pop());
        assert_eq!(router.current(), &Screen::Home);
        assert!(!router.pop(), "the root never pops");
    }
}
