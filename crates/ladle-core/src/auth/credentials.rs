//! Credential storage and retrieval.
//!
//! Stores the session token and user id in `${LADLE_HOME}/credentials.json`
//! with restricted permissions (0600). Tokens are never logged or displayed
//! in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Persisted credentials for the backend session.
///
/// The wire names (`token`, `userId`) are the storage keys the original
/// mobile client used, kept for backend symmetry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub token: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Returns the path to the credentials file.
pub fn credentials_path() -> PathBuf {
    paths::credentials_path()
}

/// Loads credentials from disk.
/// Returns `None` if the file doesn't exist.
pub fn load() -> Result<Option<StoredCredentials>> {
    let path = credentials_path();
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read credentials from {}", path.display()))?;

    let creds = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse credentials from {}", path.display()))?;

    Ok(Some(creds))
}

/// Saves credentials to disk with restricted permissions (0600).
pub fn save(creds: &StoredCredentials) -> Result<()> {
    let path = credentials_path();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let contents = serde_json::to_string_pretty(creds).context("Failed to serialize credentials")?;

    // Write with restricted permissions
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(&path)
            .with_context(|| format!("Failed to open {} for writing", path.display()))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    #[cfg(not(unix))]
    {
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    Ok(())
}

/// Removes the credentials file.
/// Returns whether credentials were present.
pub fn clear() -> Result<bool> {
    let path = credentials_path();
    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(&path)
        .with_context(|| format!("Failed to remove credentials at {}", path.display()))?;
    Ok(true)
}

/// Returns a masked version of a token for display (first 12 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.len() <= 16 {
        return "***".to_string();
    }
    format!("{}...", &token[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: serialization uses the fixed storage keys.
    #[test]
    fn test_credentials_wire_keys() {
        let creds = StoredCredentials {
            token: "jwt-abc".to_string(),
            user_id: "u42".to_string(),
        };

        let json = serde_json::to_string(&creds).unwrap();
        assert!(json.contains("\"token\":\"jwt-abc\""));
        assert!(json.contains("\"userId\":\"u42\""));

        let loaded: StoredCredentials = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, creds);
    }

    /// Test: token masking.
    #[test]
    fn test_mask_token() {
        assert_eq!(
            mask_token("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"),
            "eyJhbGciOiJI..."
        );
        assert_eq!(mask_token("short"), "***");
    }
}
