use serde::{Deserialize, Serialize};

/// Coarse subscription-tier gate. Only `member`-role invitations are plan
/// gated; `admin` invites are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Free,
    Starter,
    Elite,
    Business,
}

impl SubscriptionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Free => "free",
            SubscriptionPlan::Starter => "starter",
            SubscriptionPlan::Elite => "elite",
            SubscriptionPlan::Business => "business",
        }
    }

    /// Unknown plan strings fall back to Free, which denies gated actions.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "starter" => SubscriptionPlan::Starter,
            "elite" => SubscriptionPlan::Elite,
            "business" => SubscriptionPlan::Business,
            _ => SubscriptionPlan::Free,
        }
    }

    pub fn allows_member_invites(&self) -> bool {
        matches!(self, SubscriptionPlan::Elite | SubscriptionPlan::Business)
    }
}
