//! Credentials decoded from the secret blob supplied by the host.

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use sw_error::{Result, SwError};

/// Authentication material attached to every upstream request.
///
/// The host stores these as a single JSON blob. Blobs written by older
/// setup pages used camelCase keys and called the token `password`; both
/// spellings are accepted.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    #[serde(alias = "authToken", alias = "password")]
    pub auth_token: String,

    #[serde(alias = "organizationId")]
    pub organization_id: String,

    #[serde(alias = "userId", default)]
    pub user_id: String,
}

impl Credentials {
    pub fn new(
        auth_token: impl Into<String>,
        organization_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            auth_token: auth_token.into(),
            organization_id: organization_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Decodes and validates a credential blob.
    pub fn from_json(blob: &str) -> Result<Self> {
        let creds: Credentials = serde_json::from_str(blob.trim())
            .map_err(|e| SwError::Credentials(format!("malformed credential blob: {e}")))?;
        creds.validate()?;
        Ok(creds)
    }

    /// Reads a credential blob from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let blob = std::fs::read_to_string(path).map_err(|e| {
            SwError::Credentials(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&blob)
    }

    fn validate(&self) -> Result<()> {
        if self.auth_token.trim().is_empty() {
            return Err(SwError::Credentials("auth_token is empty".to_string()));
        }
        if self.organization_id.trim().is_empty() {
            return Err(SwError::Credentials("organization_id is empty".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("auth_token", &"<redacted>")
            .field("organization_id", &self.organization_id)
            .field("user_id", &self.user_id)
            .finish()
    }
}
