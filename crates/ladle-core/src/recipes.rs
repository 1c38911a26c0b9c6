//! The recipe store.
//!
//! Holds the in-memory recipe collection and performs the CRUD calls
//! against the backend. Every operation is gated on the session token,
//! read from the shared [`SessionStore`] at call time, so a login or logout
//! after construction is picked up by the next call. Without a token an
//! operation reports failure without touching the network.
//!
//! Failure paths are logged here and surfaced to callers as `false` /
//! `None`; no error type escapes this module.

use std::sync::{Arc, Mutex};

use ladle_types::{MutationResponse, NewRecipe, Recipe, RecipeResponse};

use crate::api::{ApiClient, ApiError};
use crate::auth::SessionStore;

/// The recipe service. Construct once at startup and share via `Arc`.
pub struct RecipeStore {
    session: Arc<SessionStore>,
    client: ApiClient,
    state: Mutex<StoreState>,
}

#[derive(Default)]
struct StoreState {
    recipes: Vec<Recipe>,
    is_loading: bool,
    /// Token the collection was last fetched under. Latches
    /// [`RecipeStore::ensure_loaded`] to one fetch per token presence.
    loaded_for: Option<String>,
}

impl RecipeStore {
    pub fn new(client: ApiClient, session: Arc<SessionStore>) -> Self {
        Self {
            session,
            client,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Returns a snapshot of the local collection.
    ///
    /// The collection is a cache of backend state: replaced wholesale by
    /// [`list`](Self::list), never patched incrementally.
    pub fn recipes(&self) -> Vec<Recipe> {
        self.lock().recipes.clone()
    }

    /// Returns whether a list fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.lock().is_loading
    }

    /// Creates a recipe and returns the backend's record.
    ///
    /// The local collection is not touched; the caller decides when to
    /// refresh the list.
    pub async fn create(&self, fields: &NewRecipe) -> Option<Recipe> {
        let token = self.require_token("create").ok()?;

        let response: Result<RecipeResponse, ApiError> = self
            .client
            .post_json("/api/recipes/create-recipe", Some(&token), fields)
            .await;

        match response {
            Ok(res) if res.success => res.recipe,
            Ok(_) => {
                tracing::warn!("Backend rejected recipe creation");
                None
            }
            Err(e) => {
                tracing::warn!(kind = %e.kind, "Failed to create recipe: {}", e);
                None
            }
        }
    }

    /// Fetches the full collection and replaces the local one.
    ///
    /// On failure the previous collection is kept.
    pub async fn list(&self) -> bool {
        let Ok(token) = self.require_token("list") else {
            return false;
        };

        self.lock().is_loading = true;
        let response: Result<Vec<Recipe>, ApiError> = self
            .client
            .get_json("/api/recipes/get-recipes", Some(&token))
            .await;

        let mut state = self.lock();
        state.is_loading = false;
        match response {
            Ok(recipes) => {
                state.recipes = recipes;
                true
            }
            Err(e) => {
                tracing::warn!(kind = %e.kind, "Failed to fetch recipes: {}", e);
                false
            }
        }
    }

    /// Fetches a single recipe, including its owner's display email.
    pub async fn get(&self, id: &str) -> Option<Recipe> {
        let token = self.require_token("get").ok()?;

        let response: Result<RecipeResponse, ApiError> = self
            .client
            .get_json(&format!("/api/recipes/get-recipe/{}", id), Some(&token))
            .await;

        match response {
            Ok(res) if res.success => res.recipe,
            Ok(_) => {
                tracing::debug!("Recipe {} not found", id);
                None
            }
            Err(e) => {
                tracing::warn!(kind = %e.kind, "Failed to fetch recipe {}: {}", id, e);
                None
            }
        }
    }

    /// Updates a recipe by PUTting the full record.
    pub async fn update(&self, recipe: &Recipe) -> bool {
        let Ok(token) = self.require_token("update") else {
            return false;
        };

        let response: Result<MutationResponse, ApiError> = self
            .client
            .put_json(
                &format!("/api/recipes/update-recipe/{}", recipe.id),
                Some(&token),
                recipe,
            )
            .await;

        match response {
            Ok(res) => res.success,
            Err(e) => {
                tracing::warn!(kind = %e.kind, "Failed to update recipe {}: {}", recipe.id, e);
                false
            }
        }
    }

    /// Deletes a recipe by id.
    ///
    /// Deleting an id the backend no longer knows reports `false`.
    pub async fn delete(&self, id: &str) -> bool {
        let Ok(token) = self.require_token("delete") else {
            return false;
        };

        let response: Result<MutationResponse, ApiError> = self
            .client
            .delete_json(&format!("/api/recipes/delete-recipe/{}", id), Some(&token))
            .await;

        match response {
            Ok(res) => res.success,
            Err(e) => {
                tracing::warn!(kind = %e.kind, "Failed to delete recipe {}: {}", id, e);
                false
            }
        }
    }

    /// Fetches the collection once per token presence.
    ///
    /// The first call after a token becomes available performs a
    /// [`list`](Self::list); later calls under the same token are no-ops.
    /// A re-login with a new token arms one new fetch. Without a token,
    /// reports `false` without touching the network.
    pub async fn ensure_loaded(&self) -> bool {
        let Some(token) = self.session.token() else {
            tracing::debug!("Skipping initial recipe fetch: no session token");
            return false;
        };

        if self.lock().loaded_for.as_deref() == Some(token.as_str()) {
            return true;
        }

        if self.list().await {
            self.lock().loaded_for = Some(token);
            true
        } else {
            false
        }
    }

    fn require_token(&self, op: &str) -> Result<String, ApiError> {
        self.session.token().ok_or_else(|| {
            tracing::warn!("Recipe {} refused: no session token", op);
            ApiError::missing_token()
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
