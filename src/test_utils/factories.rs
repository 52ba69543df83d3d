//! Test data factories. Each creates a complete, valid object with sensible
//! defaults; use the closure parameter to override fields as needed.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::domain::entities::{
    invitation::{Invitation, InvitationStatus},
    member::{Member, MemberRole},
    organization::Organization,
};

pub fn create_test_member(
    organization_id: Uuid,
    overrides: impl FnOnce(&mut Member),
) -> Member {
    let mut member = Member {
        id: Uuid::new_v4(),
        organization_id,
        email: "member@opennews.example".to_string(),
        display_name: "Test Member".to_string(),
        avatar_url: None,
        role: MemberRole::Member,
        created_at: test_datetime(),
    };
    overrides(&mut member);
    member
}

pub fn create_test_invitation(
    organization_id: Uuid,
    overrides: impl FnOnce(&mut Invitation),
) -> Invitation {
    let mut invitation = Invitation {
        id: Uuid::new_v4(),
        organization_id,
        inviter_id: Uuid::new_v4(),
        email: "invitee@opennews.example".to_string(),
        role: MemberRole::Member,
        status: InvitationStatus::Pending,
        created_at: test_datetime(),
        expires_at: test_datetime_offset_days(7),
    };
    overrides(&mut invitation);
    invitation
}

pub fn create_test_organization(overrides: impl FnOnce(&mut Organization)) -> Organization {
    let mut organization = Organization {
        id: Uuid::new_v4(),
        name: "OpenNews Daily".to_string(),
        slug: "opennews-daily".to_string(),
        members: Vec::new(),
    };
    overrides(&mut organization);
    organization
}

/// Returns a consistent test datetime (2024-01-15 12:00:00 UTC).
pub fn test_datetime() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-01-15 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
}

/// Returns the test datetime offset by the given number of days.
pub fn test_datetime_offset_days(days: i64) -> NaiveDateTime {
    test_datetime() + chrono::Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_factory_applies_overrides() {
        let org_id = Uuid::new_v4();
        let member = create_test_member(org_id, |m| {
            m.email = "custom@opennews.example".to_string();
            m.role = MemberRole::Owner;
        });
        assert_eq!(member.organization_id, org_id);
        assert_eq!(member.email, "custom@opennews.example");
        assert_eq!(member.role, MemberRole::Owner);
    }

    #[test]
    fn invitation_factory_defaults_to_pending() {
        let invitation = create_test_invitation(Uuid::new_v4(), |_| {});
        assert_eq!(invitation.status, InvitationStatus::Pending);
        assert!(invitation.expires_at > invitation.created_at);
    }
}
