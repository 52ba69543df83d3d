use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::member::MemberRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
    Canceled,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Rejected => "rejected",
            InvitationStatus::Canceled => "canceled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(InvitationStatus::Pending),
            "accepted" => Some(InvitationStatus::Accepted),
            "rejected" => Some(InvitationStatus::Rejected),
            "canceled" => Some(InvitationStatus::Canceled),
            _ => None,
        }
    }
}

/// A pending offer to join an organization. Issued by this service; accepted
/// or rejected by external action, canceled ("revoked") through this service.
#[derive(Debug, Clone)]
pub struct Invitation {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub inviter_id: Uuid,
    pub email: String,
    pub role: MemberRole,
    pub status: InvitationStatus,
    pub created_at: chrono::NaiveDateTime,
    pub expires_at: chrono::NaiveDateTime,
}

impl Invitation {
    /// Display-level expiry check; the identity service remains authoritative.
    pub fn is_expired(&self, now: chrono::NaiveDateTime) -> bool {
        self.expires_at < now
    }
}
