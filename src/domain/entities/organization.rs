use uuid::Uuid;

use crate::domain::entities::member::Member;

/// The tenant entity that owns members and invitations. Fetched whole from
/// the identity service; never persisted locally.
#[derive(Debug, Clone)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub members: Vec<Member>,
}
