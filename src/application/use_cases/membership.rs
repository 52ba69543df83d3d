use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::app_error::AppResult;
use crate::application::ports::identity_service::{IdentityServiceTrait, MemberRef};
use crate::application::use_cases::directory::{DirectorySnapshot, DirectoryUseCases};
use crate::domain::entities::member::MemberRole;

/// Result of a removal request. A declined confirmation is not an error;
/// the operation simply does not proceed.
#[derive(Debug)]
pub enum RemovalOutcome {
    Declined,
    Removed(DirectorySnapshot),
}

#[derive(Clone)]
pub struct MembershipUseCases {
    identity: Arc<dyn IdentityServiceTrait>,
    directory: DirectoryUseCases,
}

impl MembershipUseCases {
    pub fn new(identity: Arc<dyn IdentityServiceTrait>, directory: DirectoryUseCases) -> Self {
        Self {
            identity,
            directory,
        }
    }

    /// Changes a member's role, then re-fetches the directory. No optimistic
    /// update; the caller sees the change only through the fresh snapshot.
    #[instrument(skip(self))]
    pub async fn update_role(
        &self,
        organization_id: Uuid,
        member_id: Uuid,
        role: MemberRole,
    ) -> AppResult<DirectorySnapshot> {
        self.identity.update_member_role(member_id, role).await?;
        self.directory.load_for(organization_id).await
    }

    /// Removes a member. The destructive step requires explicit
    /// confirmation; without it, nothing is sent to the identity service.
    #[instrument(skip(self))]
    pub async fn remove_member(
        &self,
        organization_id: Uuid,
        member: MemberRef,
        confirmed: bool,
    ) -> AppResult<RemovalOutcome> {
        if !confirmed {
            return Ok(RemovalOutcome::Declined);
        }

        self.identity.remove_member(organization_id, member).await?;
        let snapshot = self.directory.load_for(organization_id).await?;
        Ok(RemovalOutcome::Removed(snapshot))
    }
}
