use serde::Serialize;

use crate::config::Config;
use crate::models::PaymentOrder;

/// Everything the checkout page needs to open the gateway's widget. The
/// success handler posts the gateway's identifiers to `callback_url`.
#[derive(Debug, Serialize, Clone)]
pub struct CheckoutSession {
    pub key: String,
    pub amount: i64,
    pub currency: String,
    pub order_id: String,
    pub merchant_name: String,
    pub description: String,
    pub prefill_name: String,
    pub prefill_email: String,
    pub theme_color: String,
    pub callback_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Payment gateway is not available right now. Please try again later.")]
    Unavailable,
}

/// The payment gateway as a capability: availability is checked
/// synchronously, before any order is created server-side, and the real
/// widget can be swapped for a scripted one in tests.
pub trait CheckoutGateway: Send + Sync {
    fn is_available(&self) -> bool;

    fn open(
        &self,
        order: &PaymentOrder,
        plan_name: &str,
        prefill_name: &str,
        prefill_email: &str,
    ) -> Result<CheckoutSession, CheckoutError>;
}

/// Razorpay's hosted checkout, keyed by the configured key id.
pub struct RazorpayCheckout {
    key_id: Option<String>,
}

impl RazorpayCheckout {
    pub fn from_config() -> Self {
        RazorpayCheckout { key_id: Config::razorpay_key_id() }
    }

    pub fn with_key(key_id: impl Into<String>) -> Self {
        RazorpayCheckout { key_id: Some(key_id.into()) }
    }
}

impl CheckoutGateway for RazorpayCheckout {
    fn is_available(&self) -> bool {
        self.key_id.is_some()
    }

    fn open(
        &self,
        order: &PaymentOrder,
        plan_name: &str,
        prefill_name: &str,
        prefill_email: &str,
    ) -> Result<CheckoutSession, CheckoutError> {
        if !self.is_available() {
            return Err(CheckoutError::Unavailable);
        }

        Ok(CheckoutSession {
            // create-order already returns the key the order was made
            // under; trust it over our own config.
            key: order.key.clone(),
            amount: order.amount,
            currency: order.currency.clone(),
            order_id: order.order_id.clone(),
            merchant_name: "GharSeva".to_string(),
            description: format!("{} Subscription", plan_name),
            prefill_name: prefill_name.to_string(),
            prefill_email: prefill_email.to_string(),
            theme_color: "#ea580c".to_string(),
            callback_url: "/dashboard/payment/callback".to_string(),
        })
    }
}
