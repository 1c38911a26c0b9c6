//! Wire-format types shared between the ladle core services and the CLI.
//!
//! Field names follow the backend's JSON conventions (`_id`, camelCase),
//! so every struct here round-trips through the REST API unchanged.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recipe difficulty rating.
///
/// Serialized capitalized (`"Easy"`, `"Medium"`, `"Hard"`) to match the
/// backend's stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Returns all difficulties for iteration (e.g., in help text).
    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    /// Case-insensitive parse, for CLI flags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty '{}' (expected easy, medium, or hard)",
                other
            )),
        }
    }
}

/// A recipe record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    /// Id of the owning user.
    #[serde(rename = "createdBy")]
    pub created_by: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Owner's display email. Only populated by the single-recipe
    /// endpoint; absent in list responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Fields for creating a recipe. The backend mints id, owner, and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
}

/// Request body for the register and login endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Response from the register and login endpoints.
///
/// `token`/`user_id` are only present on success.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    pub token: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response from the create-recipe and get-recipe endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeResponse {
    #[serde(default)]
    pub success: bool,
    pub recipe: Option<Recipe>,
}

/// Response from the update and delete endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
