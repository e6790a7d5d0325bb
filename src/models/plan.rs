use serde::{Deserialize, Serialize};

/// A purchasable plan as the backend catalog describes it. `amount` is in
/// minor units (paise); `sort_order == 1` marks the highlighted tier.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BackendPlan {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    pub key: String,
    pub name: String,
    pub amount: i64,
    pub duration: PlanDuration,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub sort_order: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlanDuration {
    pub value: i64,
    pub unit: String,
}

impl BackendPlan {
    pub fn rupees(&self) -> i64 {
        self.amount / 100
    }

    pub fn is_popular(&self) -> bool {
        self.sort_order == 1
    }
}

/// The visitor's pending plan choice, persisted across the login/signup
/// round trip. At most one is pending; a new selection overwrites.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SelectedPlan {
    pub key: String,
    pub name: String,
    pub price: String,
    pub period: String,
    pub features: Vec<String>,
}

impl SelectedPlan {
    pub fn from_backend(plan: &BackendPlan) -> Self {
        SelectedPlan {
            key: plan.key.clone(),
            name: plan.name.clone(),
            price: format!("₹{}", plan.rupees()),
            period: format!("{} {}", plan.duration.value, plan.duration.unit),
            features: plan.features.clone(),
        }
    }
}

/// Order parameters the backend returns from create-order, handed to the
/// checkout gateway as-is.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrder {
    pub key: String,
    pub amount: i64,
    pub currency: String,
    pub order_id: String,
}

/// Identifiers the gateway hands back on success; forwarded verbatim to
/// the backend's verify endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, FromForm)]
pub struct PaymentConfirmation {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}
