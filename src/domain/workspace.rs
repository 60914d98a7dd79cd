use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{UserId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkspaceId(Uuid);

impl WorkspaceId {
    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        let parsed = uuid::Uuid::try_parse(id).map_err(|e| {
            ValidationError::new(format!("Invalid workspace ID: {e}"))
        })?;
        Ok(Self(parsed))
    }

    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for WorkspaceId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl AsRef<Uuid> for WorkspaceId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceName(String);

impl WorkspaceName {
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        match name.chars().count() {
            x if x < 1 => Err(ValidationError::new(String::from(
                "Workspace name cannot be empty",
            ))),
            x if x > 255 => Err(ValidationError::new(String::from(
                "Max name length is 255 characters",
            ))),
            _ => Ok(Self(name.to_owned())),
        }
    }
}

impl AsRef<String> for WorkspaceName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

pub const INVITE_CODE_LENGTH: usize = 6;

const INVITE_CODE_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Shared secret admitting self-service joins. Compared with exact,
/// case-sensitive equality; never hashed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteCode(String);

impl InviteCode {
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let code = (0..INVITE_CODE_LENGTH)
            .map(|_| {
                let index = rng.gen_range(0..INVITE_CODE_ALPHABET.len());
                INVITE_CODE_ALPHABET[index] as char
            })
            .collect();
        Self(code)
    }

    pub fn parse(code: &str) -> Result<Self, ValidationError> {
        if code.len() != INVITE_CODE_LENGTH
            || !code.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(ValidationError::new(String::from(
                "Invite code must be 6 alphanumeric characters",
            )));
        }
        Ok(Self(code.to_owned()))
    }

    pub fn matches(&self, supplied: &str) -> bool {
        self.0 == supplied
    }
}

impl AsRef<String> for InviteCode {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: WorkspaceName,
    pub owner_user_id: UserId,
    pub image_url: Option<String>,
    pub invite_code: InviteCode,
    pub created_at: DateTime<Utc>,
}

impl Workspace {
    pub fn new(
        name: WorkspaceName,
        owner_user_id: UserId,
        image_url: Option<String>,
    ) -> Self {
        Self {
            id: WorkspaceId::default(),
            name,
            owner_user_id,
            image_url,
            invite_code: InviteCode::generate(),
            created_at: Utc::now(),
        }
    }
}
