//! HTTP client for the external identity/organization service.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult, GENERIC_REMOTE_ERROR};
use crate::application::ports::identity_service::{
    IdentityServiceTrait, InvitationReceipt, MemberRef, NewInvitation,
};
use crate::domain::entities::{
    invitation::{Invitation, InvitationStatus},
    member::{Member, MemberRole},
    organization::Organization,
};

#[derive(Clone)]
pub struct HttpIdentityService {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl HttpIdentityService {
    pub fn new(base_url: Url, api_key: SecretString) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.to_string().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Converts a non-success response into a remote error, extracting the
    /// service's message when the body carries one.
    async fn check(&self, response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound);
        }

        let message = response
            .json::<RemoteErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| GENERIC_REMOTE_ERROR.to_string());
        Err(AppError::Remote(message))
    }
}

fn transport_error(e: reqwest::Error) -> AppError {
    // Strip the URL so user-facing messages stay readable.
    AppError::Remote(e.without_url().to_string())
}

// ============================================================================
// Wire DTOs
// ============================================================================

#[derive(Deserialize)]
struct RemoteErrorBody {
    error: Option<String>,
}

#[derive(Deserialize)]
struct InvitationDto {
    id: Uuid,
    organization_id: Uuid,
    inviter_id: Uuid,
    email: String,
    role: String,
    status: String,
    created_at: chrono::NaiveDateTime,
    expires_at: chrono::NaiveDateTime,
}

impl InvitationDto {
    fn into_entity(self) -> AppResult<Invitation> {
        let role = MemberRole::parse(&self.role)
            .ok_or_else(|| AppError::Remote(format!("unknown invitation role: {}", self.role)))?;
        let status = InvitationStatus::parse(&self.status).ok_or_else(|| {
            AppError::Remote(format!("unknown invitation status: {}", self.status))
        })?;

        Ok(Invitation {
            id: self.id,
            organization_id: self.organization_id,
            inviter_id: self.inviter_id,
            email: self.email,
            role,
            status,
            created_at: self.created_at,
            expires_at: self.expires_at,
        })
    }
}

#[derive(Deserialize)]
struct MemberDto {
    id: Uuid,
    email: String,
    display_name: String,
    avatar_url: Option<String>,
    role: String,
    created_at: chrono::NaiveDateTime,
}

#[derive(Deserialize)]
struct OrganizationDto {
    id: Uuid,
    name: String,
    slug: String,
    members: Vec<MemberDto>,
}

impl OrganizationDto {
    fn into_entity(self) -> AppResult<Organization> {
        let organization_id = self.id;
        let members = self
            .members
            .into_iter()
            .map(|m| {
                let role = MemberRole::parse(&m.role)
                    .ok_or_else(|| AppError::Remote(format!("unknown member role: {}", m.role)))?;
                Ok(Member {
                    id: m.id,
                    organization_id,
                    email: m.email,
                    display_name: m.display_name,
                    avatar_url: m.avatar_url,
                    role,
                    created_at: m.created_at,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Organization {
            id: self.id,
            name: self.name,
            slug: self.slug,
            members,
        })
    }
}

#[derive(Deserialize)]
struct CreateInvitationResponse {
    success: bool,
    error: Option<String>,
    preview_url: Option<String>,
}

// ============================================================================
// Trait Implementation
// ============================================================================

#[async_trait]
impl IdentityServiceTrait for HttpIdentityService {
    async fn list_invitations(&self, organization_id: Uuid) -> AppResult<Vec<Invitation>> {
        let url = format!("{}/organizations/{}/invitations", self.base_url, organization_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await
            .map_err(transport_error)?;

        let invitations: Vec<InvitationDto> = self
            .check(response)
            .await?
            .json()
            .await
            .map_err(transport_error)?;

        invitations.into_iter().map(|i| i.into_entity()).collect()
    }

    async fn get_full_organization(&self, organization_id: Uuid) -> AppResult<Organization> {
        let url = format!("{}/organizations/{}?include=members", self.base_url, organization_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await
            .map_err(transport_error)?;

        let organization: OrganizationDto = self
            .check(response)
            .await?
            .json()
            .await
            .map_err(transport_error)?;

        organization.into_entity()
    }

    async fn create_invitation(&self, invitation: NewInvitation) -> AppResult<InvitationReceipt> {
        let url = format!("{}/invitations", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&serde_json::json!({
                "organization_id": invitation.organization_id,
                "inviter_id": invitation.inviter_id,
                "email": invitation.email,
                "role": invitation.role.as_str(),
            }))
            .send()
            .await
            .map_err(transport_error)?;

        let body: CreateInvitationResponse = self
            .check(response)
            .await?
            .json()
            .await
            .map_err(transport_error)?;

        if !body.success {
            return Err(AppError::Remote(
                body.error.unwrap_or_else(|| GENERIC_REMOTE_ERROR.to_string()),
            ));
        }

        Ok(InvitationReceipt {
            preview_url: body.preview_url,
        })
    }

    async fn cancel_invitation(&self, invitation_id: Uuid) -> AppResult<()> {
        let url = format!("{}/invitations/{}", self.base_url, invitation_id);
        let response = self
            .client
            .delete(&url)
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await
            .map_err(transport_error)?;

        self.check(response).await.map(|_| ())
    }

    async fn update_member_role(&self, member_id: Uuid, role: MemberRole) -> AppResult<()> {
        let url = format!("{}/members/{}", self.base_url, member_id);
        let response = self
            .client
            .patch(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&serde_json::json!({ "role": role.as_str() }))
            .send()
            .await
            .map_err(transport_error)?;

        self.check(response).await.map(|_| ())
    }

    async fn remove_member(&self, organization_id: Uuid, member: MemberRef) -> AppResult<()> {
        let url = format!("{}/organizations/{}/members", self.base_url, organization_id);
        let target = match &member {
            MemberRef::Id(id) => id.to_string(),
            MemberRef::Email(email) => email.clone(),
        };
        let response = self
            .client
            .delete(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&serde_json::json!({ "member_id_or_email": target }))
            .send()
            .await
            .map_err(transport_error)?;

        self.check(response).await.map(|_| ())
    }
}
