use color_eyre::eyre::Report;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Missing session cookie")]
    MissingToken,
    #[error("Invalid session token")]
    InvalidToken,
    #[error("Resource with ID not found: {0}")]
    NotFound(uuid::Uuid),
    #[error("Validation error")]
    ValidationError(#[from] ValidationError),
    #[error("Conflict")]
    Conflict(#[from] ConflictError),
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConflictError {
    #[error("Already a member of this workspace")]
    AlreadyMember,
    #[error("Invalid invite code")]
    InvalidInviteCode,
    #[error("Cannot remove the only member")]
    LastMemberRemoval,
    #[error("Cannot downgrade the only member")]
    LastMemberDowngrade,
    #[error("All tasks must belong to the same workspace")]
    MixedWorkspaces,
}

#[derive(Debug, Error)]
#[error("Validation error: {0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: String) -> Self {
        Self(message)
    }

    pub fn as_ref(&self) -> &String {
        &self.0
    }
}
