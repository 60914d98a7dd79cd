use color_eyre::eyre::{Context, Result};
use secrecy::{ExposeSecret, Secret};

use crate::domain::{UserDirectory, UserId, UserProfile};

/// Client for the identity service's user-lookup endpoint. Used to attach
/// display names and emails to members and assignees; failures propagate to
/// the caller with no retry.
pub struct HttpUserDirectory {
    http_client: reqwest::Client,
    base_url: String,
    server_token: Secret<String>,
}

impl HttpUserDirectory {
    pub fn new(
        http_client: reqwest::Client,
        base_url: String,
        server_token: Secret<String>,
    ) -> Self {
        Self {
            http_client,
            base_url,
            server_token,
        }
    }
}

#[async_trait::async_trait]
impl UserDirectory for HttpUserDirectory {
    #[tracing::instrument(
        name = "Fetching user profile from directory",
        skip_all
    )]
    async fn get_profile(&self, user_id: &UserId) -> Result<UserProfile> {
        let url = format!("{}/users/{}", self.base_url, user_id.as_ref());

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(self.server_token.expose_secret())
            .send()
            .await
            .wrap_err("Failed to reach the user directory")?
            .error_for_status()
            .wrap_err("User directory returned an error status")?;

        response
            .json::<UserProfile>()
            .await
            .wrap_err("Failed to deserialise user profile")
    }
}
