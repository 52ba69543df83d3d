use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::app_error::AppResult;
use crate::application::ports::identity_service::IdentityServiceTrait;
use crate::domain::entities::{invitation::Invitation, member::Member};

// ============================================================================
// Directory Snapshot
// ============================================================================

/// One consistent read of an organization's directory: confirmed members
/// first, then pending invitations, each in the order the identity service
/// returned them. Produced whole or not at all, so a failed read never
/// leaves a partially updated view.
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    pub organization_id: Uuid,
    pub members: Vec<Member>,
    pub invitations: Vec<Invitation>,
    pub invite_link: String,
}

impl DirectorySnapshot {
    pub fn total(&self) -> usize {
        self.members.len() + self.invitations.len()
    }

    /// The merged view rows: all members before all invitations.
    pub fn rows(&self) -> Vec<DirectoryRow<'_>> {
        self.members
            .iter()
            .map(DirectoryRow::Member)
            .chain(self.invitations.iter().map(DirectoryRow::Invitation))
            .collect()
    }
}

/// View-level union of the two directory populations, normalized for
/// display: identity, badge, and a join/sent timestamp.
#[derive(Debug, Clone, Copy)]
pub enum DirectoryRow<'a> {
    Member(&'a Member),
    Invitation(&'a Invitation),
}

impl DirectoryRow<'_> {
    pub fn id(&self) -> Uuid {
        match self {
            DirectoryRow::Member(m) => m.id,
            DirectoryRow::Invitation(i) => i.id,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            DirectoryRow::Member(m) => &m.email,
            DirectoryRow::Invitation(i) => &i.email,
        }
    }

    /// Role badge for members, status badge for invitations.
    pub fn badge(&self) -> &'static str {
        match self {
            DirectoryRow::Member(m) => m.role.as_str(),
            DirectoryRow::Invitation(i) => i.status.as_str(),
        }
    }

    pub fn created_at(&self) -> chrono::NaiveDateTime {
        match self {
            DirectoryRow::Member(m) => m.created_at,
            DirectoryRow::Invitation(i) => i.created_at,
        }
    }
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct DirectoryUseCases {
    identity: Arc<dyn IdentityServiceTrait>,
    app_origin: String,
}

impl DirectoryUseCases {
    pub fn new(identity: Arc<dyn IdentityServiceTrait>, app_origin: String) -> Self {
        Self {
            identity,
            app_origin,
        }
    }

    /// Loads the directory if an organization is selected; no-op otherwise.
    #[instrument(skip(self))]
    pub async fn load(&self, organization_id: Option<Uuid>) -> AppResult<Option<DirectorySnapshot>> {
        let Some(organization_id) = organization_id else {
            return Ok(None);
        };
        self.load_for(organization_id).await.map(Some)
    }

    /// Two independent reads against the identity service. If either fails
    /// the whole load fails and no snapshot is produced. Safe to re-invoke
    /// after every mutation.
    #[instrument(skip(self))]
    pub async fn load_for(&self, organization_id: Uuid) -> AppResult<DirectorySnapshot> {
        let invitations = self.identity.list_invitations(organization_id).await?;
        let organization = self.identity.get_full_organization(organization_id).await?;

        Ok(DirectorySnapshot {
            organization_id,
            members: organization.members,
            invitations,
            invite_link: format!(
                "{}/accept-invitation/{}",
                self.app_origin.trim_end_matches('/'),
                organization_id
            ),
        })
    }
}
