use color_eyre::eyre::Result;
use serde::Deserialize;

use super::UserId;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    pub name: Option<String>,
    pub email: String,
}

impl UserProfile {
    /// Display name falls back to the email address when the directory has
    /// no name on file.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.email)
    }
}

/// Identity-service lookup used to enrich members and assignees with
/// human-readable details.
#[async_trait::async_trait]
pub trait UserDirectory {
    async fn get_profile(&self, user_id: &UserId) -> Result<UserProfile>;
}
