//! Core services for the ladle recipe client.
//!
//! Everything here is presentation-agnostic: the CLI (or any other
//! frontend) constructs these services once at startup and drives them.
//!
//! - [`config`] -- `config.toml` loading and path resolution
//! - [`api`] -- the HTTP client wrapper and its error taxonomy
//! - [`auth`] -- credential persistence and the session store
//! - [`recipes`] -- the recipe collection store
//! - [`nav`] -- the navigation state machine

pub mod api;
pub mod auth;
pub mod config;
pub mod nav;
pub mod recipes;

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared helpers for tests that redirect LADLE_HOME.

    use std::sync::{Mutex, MutexGuard, PoisonError};

    use tempfile::TempDir;

    /// Serializes tests that mutate LADLE_HOME; env vars are process-wide.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Points LADLE_HOME at a fresh temp dir for the duration of a test.
    ///
    /// Hold both returned guards until the test finishes.
    pub fn set_test_home() -> (MutexGuard<'static, ()>, TempDir) {
        let guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let temp = TempDir::new().unwrap();
        // SAFETY: guarded by ENV_LOCK, and only read back via the paths
        // module.
        unsafe {
            std::env::set_var("LADLE_HOME", temp.path());
        }
        (guard, temp)
    }
}
