use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::ports::identity_service::{IdentityServiceTrait, NewInvitation};
use crate::application::use_cases::directory::{DirectorySnapshot, DirectoryUseCases};
use crate::application::validators::is_valid_email;
use crate::domain::entities::{member::MemberRole, plan::SubscriptionPlan};

/// The caller's identity, extracted from the session token by the HTTP
/// layer and passed in explicitly.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
}

#[derive(Debug)]
pub struct InviteOutcome {
    pub preview_url: Option<String>,
    pub directory: DirectorySnapshot,
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct InvitationUseCases {
    identity: Arc<dyn IdentityServiceTrait>,
    directory: DirectoryUseCases,
}

impl InvitationUseCases {
    pub fn new(identity: Arc<dyn IdentityServiceTrait>, directory: DirectoryUseCases) -> Self {
        Self {
            identity,
            directory,
        }
    }

    /// Issues a new invitation. Preconditions are checked in order and
    /// short-circuit before any call to the identity service: session,
    /// active organization, email, then the plan gate for `member`-role
    /// invites. Single attempt, no retry; on success the directory is
    /// re-fetched once.
    #[instrument(skip(self, inviter))]
    pub async fn invite(
        &self,
        inviter: Option<&AuthenticatedUser>,
        organization_id: Option<Uuid>,
        email: &str,
        role: MemberRole,
        plan: SubscriptionPlan,
    ) -> AppResult<InviteOutcome> {
        let inviter = inviter.ok_or(AppError::NotLoggedIn)?;
        let organization_id = organization_id.ok_or(AppError::NoActiveOrganization)?;

        let email = email.trim();
        if !is_valid_email(email) {
            return Err(AppError::InvalidInput(
                "Please enter a valid email address".into(),
            ));
        }

        // Only member-role invites are plan gated; admin invites are not.
        if role == MemberRole::Member && !plan.allows_member_invites() {
            return Err(AppError::PlanRequired(format!(
                "Inviting members requires an Elite or Business plan (current plan: {})",
                plan.as_str()
            )));
        }

        let receipt = self
            .identity
            .create_invitation(NewInvitation {
                organization_id,
                inviter_id: inviter.id,
                email: email.to_string(),
                role,
            })
            .await?;

        let directory = self.directory.load_for(organization_id).await?;

        Ok(InviteOutcome {
            preview_url: receipt.preview_url,
            directory,
        })
    }

    /// Cancels a pending invitation and re-fetches the directory.
    #[instrument(skip(self))]
    pub async fn revoke(
        &self,
        organization_id: Uuid,
        invitation_id: Uuid,
    ) -> AppResult<DirectorySnapshot> {
        self.identity.cancel_invitation(invitation_id).await?;
        self.directory.load_for(organization_id).await
    }
}
