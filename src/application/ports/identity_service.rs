use async_trait::async_trait;
use uuid::Uuid;

use crate::app_error::AppResult;
use crate::domain::entities::{
    invitation::Invitation, member::MemberRole, organization::Organization,
};

/// Input for a new invitation, assembled after all issuer preconditions pass.
#[derive(Debug, Clone)]
pub struct NewInvitation {
    pub organization_id: Uuid,
    pub inviter_id: Uuid,
    pub email: String,
    pub role: MemberRole,
}

/// What the identity service hands back for a created invitation. The
/// preview URL only appears in non-production email testing and is returned
/// verbatim, never stored.
#[derive(Debug, Clone)]
pub struct InvitationReceipt {
    pub preview_url: Option<String>,
}

/// Removal target; the identity service accepts either a member id or the
/// member's email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberRef {
    Id(Uuid),
    Email(String),
}

impl MemberRef {
    pub fn parse(s: &str) -> Self {
        match Uuid::parse_str(s) {
            Ok(id) => MemberRef::Id(id),
            Err(_) => MemberRef::Email(s.to_string()),
        }
    }
}

/// RPC-like async client for the external identity/organization service.
/// All authoritative membership state lives behind this trait; the service
/// keeps no local copy beyond the current response.
#[async_trait]
pub trait IdentityServiceTrait: Send + Sync {
    async fn list_invitations(&self, organization_id: Uuid) -> AppResult<Vec<Invitation>>;

    async fn get_full_organization(&self, organization_id: Uuid) -> AppResult<Organization>;

    async fn create_invitation(&self, invitation: NewInvitation) -> AppResult<InvitationReceipt>;

    async fn cancel_invitation(&self, invitation_id: Uuid) -> AppResult<()>;

    async fn update_member_role(&self, member_id: Uuid, role: MemberRole) -> AppResult<()>;

    async fn remove_member(&self, organization_id: Uuid, member: MemberRef) -> AppResult<()>;
}
