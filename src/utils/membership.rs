use color_eyre::eyre::eyre;

use crate::app_state::MemberStoreType;
use crate::domain::{ApiError, Member, UserId, WorkspaceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// Any membership in the workspace is enough.
    Member,
    /// Workspace management operations: update/delete, invite-code reset,
    /// role changes, removing other members.
    Admin,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Allowed(Member),
    Denied(DenialReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    NotAMember,
    NotAnAdmin,
}

/// The single authorization policy every resource handler consumes.
pub fn evaluate(membership: Option<Member>, level: AccessLevel) -> Decision {
    match membership {
        None => Decision::Denied(DenialReason::NotAMember),
        Some(member) if level == AccessLevel::Admin && !member.is_admin() => {
            Decision::Denied(DenialReason::NotAnAdmin)
        }
        Some(member) => Decision::Allowed(member),
    }
}

/// Resolves the acting user's membership for the target workspace and
/// applies [`evaluate`]. Handlers call this before touching any resource;
/// a denial performs no mutation.
#[tracing::instrument(name = "Authorizing workspace access", skip_all)]
pub async fn authorize(
    member_store: &MemberStoreType,
    workspace_id: &WorkspaceId,
    user_id: &UserId,
    level: AccessLevel,
) -> Result<Member, ApiError> {
    let membership = member_store
        .read()
        .await
        .find_membership(workspace_id, user_id)
        .await
        .map_err(|e| ApiError::UnexpectedError(eyre!(e)))?;

    match evaluate(membership, level) {
        Decision::Allowed(member) => Ok(member),
        Decision::Denied(reason) => {
            tracing::debug!(?reason, "workspace access denied");
            Err(ApiError::Unauthorized)
        }
    }
}
