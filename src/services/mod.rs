pub mod backend;
pub mod checkout;

pub use backend::{AuthOutcome, BackendApi, BackendError, HttpBackend, SessionProbe};
pub use checkout::{CheckoutError, CheckoutGateway, CheckoutSession, RazorpayCheckout};
