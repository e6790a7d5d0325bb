use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subscription status as reported by the backend. Anything the backend
/// sends that we don't recognize lands in `Unknown` — the portal treats a
/// subscription as active only on an explicit "active".
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Inactive,
    Expired,
    Cancelled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub plan_name: String,
    pub status: SubscriptionStatus,
    pub end_date: Option<DateTime<Utc>>,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }
}
