use std::collections::HashMap;

use crate::domain::{
    Member, MemberId, MemberStore, MemberStoreError, UserId, WorkspaceId,
};

#[derive(Default)]
pub struct HashmapMemberStore {
    members: HashMap<MemberId, Member>,
}

#[async_trait::async_trait]
impl MemberStore for HashmapMemberStore {
    async fn add_member(
        &mut self,
        member: Member,
    ) -> Result<(), MemberStoreError> {
        let duplicate = self.members.values().any(|existing| {
            existing.workspace_id == member.workspace_id
                && existing.user_id == member.user_id
        });
        if duplicate {
            return Err(MemberStoreError::MembershipExists);
        }

        self.members.insert(member.id.clone(), member);
        Ok(())
    }

    async fn get_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Member, MemberStoreError> {
        match self.members.get(member_id) {
            Some(member) => Ok(member.clone()),
            None => Err(MemberStoreError::MemberNotFound),
        }
    }

    async fn find_membership(
        &self,
        workspace_id: &WorkspaceId,
        user_id: &UserId,
    ) -> Result<Option<Member>, MemberStoreError> {
        Ok(self
            .members
            .values()
            .find(|member| {
                &member.workspace_id == workspace_id
                    && &member.user_id == user_id
            })
            .cloned())
    }

    async fn list_members(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<Vec<Member>, MemberStoreError> {
        let mut members: Vec<Member> = self
            .members
            .values()
            .filter(|member| &member.workspace_id == workspace_id)
            .cloned()
            .collect();
        members.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(members)
    }

    async fn list_memberships_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Member>, MemberStoreError> {
        let mut members: Vec<Member> = self
            .members
            .values()
            .filter(|member| &member.user_id == user_id)
            .cloned()
            .collect();
        members.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(members)
    }

    async fn count_members(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<i64, MemberStoreError> {
        Ok(self
            .members
            .values()
            .filter(|member| &member.workspace_id == workspace_id)
            .count() as i64)
    }

    async fn update_member(
        &mut self,
        member: &Member,
    ) -> Result<(), MemberStoreError> {
        match self.members.get_mut(&member.id) {
            Some(existing) => {
                *existing = member.clone();
                Ok(())
            }
            None => Err(MemberStoreError::MemberNotFound),
        }
    }

    async fn delete_member(
        &mut self,
        member_id: &MemberId,
    ) -> Result<(), MemberStoreError> {
        match self.members.remove(member_id) {
            Some(_) => Ok(()),
            None => Err(MemberStoreError::MemberNotFound),
        }
    }

    async fn delete_members_in_workspace(
        &mut self,
        workspace_id: &WorkspaceId,
    ) -> Result<(), MemberStoreError> {
        self.members
            .retain(|_, member| &member.workspace_id != workspace_id);
        Ok(())
    }
}
