//! In-memory mock of the external identity/organization service.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::ports::identity_service::{
    IdentityServiceTrait, InvitationReceipt, MemberRef, NewInvitation,
};
use crate::domain::entities::{
    invitation::{Invitation, InvitationStatus},
    member::{Member, MemberRole},
    organization::Organization,
};
use crate::test_utils::{create_test_invitation, create_test_member, create_test_organization};

/// In-memory implementation of IdentityServiceTrait for testing. Failure
/// injection simulates remote errors; atomic counters let tests assert that
/// short-circuited preconditions issue no calls and that every mutation is
/// followed by exactly one re-fetch.
#[derive(Default)]
pub struct InMemoryIdentityService {
    pub organizations: Mutex<HashMap<Uuid, Organization>>,
    pub invitations: Mutex<Vec<Invitation>>,

    list_invitations_error: Mutex<Option<String>>,
    get_organization_error: Mutex<Option<String>>,
    create_invitation_error: Mutex<Option<String>>,
    preview_url: Mutex<Option<String>>,

    get_organization_calls: AtomicUsize,
    create_invitation_calls: AtomicUsize,
    cancel_invitation_calls: AtomicUsize,
    update_role_calls: AtomicUsize,
    remove_member_calls: AtomicUsize,
}

impl InMemoryIdentityService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_organization(organization: Organization) -> Self {
        let service = Self::default();
        service
            .organizations
            .lock()
            .unwrap()
            .insert(organization.id, organization);
        service
    }

    pub fn add_invitation(&self, invitation: Invitation) {
        self.invitations.lock().unwrap().push(invitation);
    }

    // ------------------------------------------------------------------
    // Failure injection
    // ------------------------------------------------------------------

    pub fn fail_list_invitations(&self, message: &str) {
        *self.list_invitations_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_get_organization(&self, message: &str) {
        *self.get_organization_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_create_invitation(&self, message: &str) {
        *self.create_invitation_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn set_preview_url(&self, url: &str) {
        *self.preview_url.lock().unwrap() = Some(url.to_string());
    }

    // ------------------------------------------------------------------
    // Assertion helpers
    // ------------------------------------------------------------------

    pub fn get_organization_call_count(&self) -> usize {
        self.get_organization_calls.load(Ordering::SeqCst)
    }

    pub fn create_invitation_call_count(&self) -> usize {
        self.create_invitation_calls.load(Ordering::SeqCst)
    }

    pub fn cancel_invitation_call_count(&self) -> usize {
        self.cancel_invitation_calls.load(Ordering::SeqCst)
    }

    pub fn update_role_call_count(&self) -> usize {
        self.update_role_calls.load(Ordering::SeqCst)
    }

    pub fn remove_member_call_count(&self) -> usize {
        self.remove_member_calls.load(Ordering::SeqCst)
    }

    pub fn member_ids(&self, organization_id: Uuid) -> Vec<Uuid> {
        self.organizations
            .lock()
            .unwrap()
            .get(&organization_id)
            .map(|o| o.members.iter().map(|m| m.id).collect())
            .unwrap_or_default()
    }

    pub fn pending_invitation_ids(&self, organization_id: Uuid) -> Vec<Uuid> {
        self.invitations
            .lock()
            .unwrap()
            .iter()
            .filter(|i| {
                i.organization_id == organization_id && i.status == InvitationStatus::Pending
            })
            .map(|i| i.id)
            .collect()
    }
}

#[async_trait]
impl IdentityServiceTrait for InMemoryIdentityService {
    async fn list_invitations(&self, organization_id: Uuid) -> AppResult<Vec<Invitation>> {
        if let Some(message) = self.list_invitations_error.lock().unwrap().clone() {
            return Err(AppError::Remote(message));
        }

        Ok(self
            .invitations
            .lock()
            .unwrap()
            .iter()
            .filter(|i| {
                i.organization_id == organization_id && i.status == InvitationStatus::Pending
            })
            .cloned()
            .collect())
    }

    async fn get_full_organization(&self, organization_id: Uuid) -> AppResult<Organization> {
        if let Some(message) = self.get_organization_error.lock().unwrap().clone() {
            return Err(AppError::Remote(message));
        }

        self.get_organization_calls.fetch_add(1, Ordering::SeqCst);
        self.organizations
            .lock()
            .unwrap()
            .get(&organization_id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn create_invitation(&self, invitation: NewInvitation) -> AppResult<InvitationReceipt> {
        if let Some(message) = self.create_invitation_error.lock().unwrap().clone() {
            return Err(AppError::Remote(message));
        }

        self.create_invitation_calls.fetch_add(1, Ordering::SeqCst);

        let now = chrono::Utc::now().naive_utc();
        self.invitations.lock().unwrap().push(Invitation {
            id: Uuid::new_v4(),
            organization_id: invitation.organization_id,
            inviter_id: invitation.inviter_id,
            email: invitation.email,
            role: invitation.role,
            status: InvitationStatus::Pending,
            created_at: now,
            expires_at: now + chrono::Duration::hours(48),
        });

        Ok(InvitationReceipt {
            preview_url: self.preview_url.lock().unwrap().clone(),
        })
    }

    async fn cancel_invitation(&self, invitation_id: Uuid) -> AppResult<()> {
        self.cancel_invitation_calls.fetch_add(1, Ordering::SeqCst);

        let mut invitations = self.invitations.lock().unwrap();
        let invitation = invitations
            .iter_mut()
            .find(|i| i.id == invitation_id)
            .ok_or(AppError::NotFound)?;

        invitation.status = InvitationStatus::Canceled;
        Ok(())
    }

    async fn update_member_role(&self, member_id: Uuid, role: MemberRole) -> AppResult<()> {
        self.update_role_calls.fetch_add(1, Ordering::SeqCst);

        let mut organizations = self.organizations.lock().unwrap();
        for organization in organizations.values_mut() {
            if let Some(member) = organization.members.iter_mut().find(|m| m.id == member_id) {
                member.role = role;
                return Ok(());
            }
        }
        Err(AppError::NotFound)
    }

    async fn remove_member(&self, organization_id: Uuid, member: MemberRef) -> AppResult<()> {
        self.remove_member_calls.fetch_add(1, Ordering::SeqCst);

        let mut organizations = self.organizations.lock().unwrap();
        let organization = organizations
            .get_mut(&organization_id)
            .ok_or(AppError::NotFound)?;

        let before = organization.members.len();
        organization.members.retain(|m| match &member {
            MemberRef::Id(id) => m.id != *id,
            MemberRef::Email(email) => m.email != *email,
        });

        if organization.members.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// Seeds one organization with `members` confirmed members
/// (`member{i}@opennews.example`) and `invitations` pending invitations
/// (`invitee{i}@opennews.example`), both in insertion order.
pub fn seeded_identity_service(
    members: usize,
    invitations: usize,
) -> (Arc<InMemoryIdentityService>, Uuid) {
    let mut organization = create_test_organization(|_| {});
    let org_id = organization.id;

    organization.members = (0..members)
        .map(|i| {
            create_test_member(org_id, |m| {
                m.email = format!("member{i}@opennews.example");
                m.display_name = format!("Member {i}");
                if i == 0 {
                    m.role = MemberRole::Owner;
                }
            })
        })
        .collect();

    let service = InMemoryIdentityService::with_organization(organization);
    for i in 0..invitations {
        service.add_invitation(create_test_invitation(org_id, |inv| {
            inv.email = format!("invitee{i}@opennews.example");
        }));
    }

    (Arc::new(service), org_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_service_lists_in_insertion_order() {
        let (service, org_id) = seeded_identity_service(2, 3);

        let invitations = service.list_invitations(org_id).await.unwrap();
        let emails: Vec<&str> = invitations.iter().map(|i| i.email.as_str()).collect();
        assert_eq!(
            emails,
            vec![
                "invitee0@opennews.example",
                "invitee1@opennews.example",
                "invitee2@opennews.example",
            ]
        );
    }

    #[tokio::test]
    async fn canceled_invitations_drop_out_of_listings() {
        let (service, org_id) = seeded_identity_service(0, 2);

        let ids = service.pending_invitation_ids(org_id);
        service.cancel_invitation(ids[0]).await.unwrap();

        let remaining = service.list_invitations(org_id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, ids[1]);
    }

    #[tokio::test]
    async fn invitations_are_scoped_to_their_organization() {
        let (service, _) = seeded_identity_service(0, 2);

        let other_org = service.list_invitations(Uuid::new_v4()).await.unwrap();
        assert!(other_org.is_empty());
    }
}
