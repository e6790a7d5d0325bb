//! Shared harness: a scripted backend and gateway behind the portal's
//! injection points, driven through Rocket's local client.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use rocket::local::blocking::Client;

use gharseva_portal::models::{
    AuthUser, BackendPlan, PaymentConfirmation, PaymentOrder, PlanDuration, ProfileFields,
    ProviderProfile, Subscription, SubscriptionStatus, UploadedFile,
};
use gharseva_portal::services::{
    AuthOutcome, BackendApi, BackendError, CheckoutGateway, RazorpayCheckout, SessionProbe,
};

pub const TEST_CREDENTIAL: &str = "sid=test-session";

/// Backend with scripted responses. Every call is recorded so tests can
/// assert what did — and did not — go over the wire.
pub struct MockBackend {
    pub profile: Mutex<Option<ProviderProfile>>,
    pub subscription: Mutex<Option<Subscription>>,
    pub plans: Mutex<Vec<BackendPlan>>,
    pub verify_ok: AtomicBool,
    pub logout_fails: AtomicBool,
    pub me_fails: AtomicBool,
    pub calls: Mutex<Vec<String>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        MockBackend {
            profile: Mutex::new(None),
            subscription: Mutex::new(None),
            plans: Mutex::new(vec![professional_plan()]),
            verify_ok: AtomicBool::new(true),
            logout_fails: AtomicBool::new(false),
            me_fails: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockBackend {
    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    pub fn called(&self, call: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|c| c == call)
    }

    pub fn with_profile(self, profile: ProviderProfile) -> Self {
        *self.profile.lock().unwrap() = Some(profile);
        self
    }

    pub fn with_subscription(self, subscription: Subscription) -> Self {
        *self.subscription.lock().unwrap() = Some(subscription);
        self
    }
}

#[rocket::async_trait]
impl BackendApi for MockBackend {
    async fn me(&self, _credential: &str) -> Result<SessionProbe, BackendError> {
        self.record("me");
        if self.me_fails.load(Ordering::SeqCst) {
            return Err(BackendError::Api { status: 401, message: "Not authenticated".into() });
        }
        Ok(SessionProbe { user: test_user(), provider: None })
    }

    async fn login(&self, email: &str, _password: &str) -> Result<AuthOutcome, BackendError> {
        self.record("login");
        Ok(AuthOutcome {
            user: AuthUser { id: "1".into(), name: "A".into(), email: email.into() },
            credential: Some(TEST_CREDENTIAL.into()),
        })
    }

    async fn signup(
        &self,
        name: &str,
        email: &str,
        _password: &str,
    ) -> Result<AuthOutcome, BackendError> {
        self.record("signup");
        Ok(AuthOutcome {
            user: AuthUser { id: "1".into(), name: name.into(), email: email.into() },
            credential: Some(TEST_CREDENTIAL.into()),
        })
    }

    async fn logout(&self, _credential: &str) -> Result<(), BackendError> {
        self.record("logout");
        if self.logout_fails.load(Ordering::SeqCst) {
            return Err(BackendError::Transport("connection reset".into()));
        }
        Ok(())
    }

    async fn fetch_profile(
        &self,
        _credential: &str,
    ) -> Result<Option<ProviderProfile>, BackendError> {
        self.record("fetch_profile");
        Ok(self.profile.lock().unwrap().clone())
    }

    async fn submit_profile(
        &self,
        _credential: &str,
        fields: &ProfileFields,
        _photo: Option<UploadedFile>,
        _document: UploadedFile,
    ) -> Result<(), BackendError> {
        self.record("submit_profile");
        *self.profile.lock().unwrap() = Some(profile_from_fields(fields));
        Ok(())
    }

    async fn my_subscription(
        &self,
        _credential: &str,
    ) -> Result<Option<Subscription>, BackendError> {
        self.record("my_subscription");
        Ok(self.subscription.lock().unwrap().clone())
    }

    async fn list_plans(&self) -> Result<Vec<BackendPlan>, BackendError> {
        self.record("list_plans");
        Ok(self.plans.lock().unwrap().clone())
    }

    async fn create_order(
        &self,
        _credential: &str,
        plan_key: &str,
    ) -> Result<PaymentOrder, BackendError> {
        self.record("create_order");
        Ok(PaymentOrder {
            key: "rzp_test_key".into(),
            amount: 99900,
            currency: "INR".into(),
            order_id: format!("order_{}", plan_key),
        })
    }

    async fn verify_payment(
        &self,
        _credential: &str,
        _confirmation: &PaymentConfirmation,
    ) -> Result<(), BackendError> {
        self.record("verify_payment");
        if self.verify_ok.load(Ordering::SeqCst) {
            *self.subscription.lock().unwrap() = Some(active_subscription());
            Ok(())
        } else {
            Err(BackendError::Api { status: 400, message: "Invalid payment signature".into() })
        }
    }
}

/// Gateway that is simply switched on or off.
pub struct MockGateway {
    pub available: bool,
}

impl CheckoutGateway for MockGateway {
    fn is_available(&self) -> bool {
        self.available
    }

    fn open(
        &self,
        order: &PaymentOrder,
        plan_name: &str,
        prefill_name: &str,
        prefill_email: &str,
    ) -> Result<gharseva_portal::services::CheckoutSession, gharseva_portal::services::CheckoutError>
    {
        RazorpayCheckout::with_key("rzp_test_key").open(order, plan_name, prefill_name, prefill_email)
    }
}

pub fn test_user() -> AuthUser {
    AuthUser { id: "1".into(), name: "A".into(), email: "a@x.com".into() }
}

pub fn professional_plan() -> BackendPlan {
    BackendPlan {
        id: Some("p1".into()),
        key: "professional".into(),
        name: "Professional".into(),
        amount: 99900,
        duration: PlanDuration { value: 1, unit: "month".into() },
        features: vec!["Unlimited leads".into(), "Priority customer support".into()],
        sort_order: 1,
    }
}

pub fn active_subscription() -> Subscription {
    Subscription {
        plan_name: "Professional".into(),
        status: SubscriptionStatus::Active,
        end_date: Some(Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap()),
    }
}

pub fn completed_profile() -> ProviderProfile {
    ProviderProfile {
        name: "Asha".into(),
        phone: "9876543210".into(),
        email: Some("a@x.com".into()),
        primary_service: None,
        primary_service_area: None,
        description: Some("Reliable plumbing.".into()),
        profile_photo_url: None,
        aadhaar_url: Some("/uploads/aadhaar.png".into()),
        is_verified: false,
        rating: Some(4.7),
        jobs_completed: 12,
        monthly_earnings: Some(15000),
        leads_today: None,
    }
}

fn profile_from_fields(fields: &ProfileFields) -> ProviderProfile {
    ProviderProfile {
        name: fields.name.clone(),
        phone: fields.phone.clone(),
        email: Some(fields.email.clone()),
        primary_service: Some(fields.primary_service),
        primary_service_area: Some(fields.service_area),
        description: Some(fields.description.clone()),
        profile_photo_url: None,
        aadhaar_url: Some("/uploads/aadhaar.png".into()),
        is_verified: false,
        rating: None,
        jobs_completed: 0,
        monthly_earnings: None,
        leads_today: None,
    }
}

pub fn client_with(backend: Arc<MockBackend>, gateway: Arc<dyn CheckoutGateway>) -> Client {
    let rocket = gharseva_portal::build(backend, gateway);
    Client::tracked(rocket).expect("valid rocket instance")
}

pub fn client(backend: Arc<MockBackend>) -> Client {
    client_with(backend, Arc::new(MockGateway { available: true }))
}

/// Signs up through the portal so the tracked client carries a session.
pub fn sign_up(client: &Client) {
    let response = client
        .post("/auth/signup")
        .header(rocket::http::ContentType::Form)
        .body("name=A&email=a%40x.com&password=secret123")
        .dispatch();
    assert_eq!(response.status(), rocket::http::Status::SeeOther);
}

/// Minimal multipart body for the profile form. `with_document` controls
/// whether the aadhaar part is included at all.
pub fn profile_multipart(with_document: bool) -> (rocket::http::ContentType, Vec<u8>) {
    let boundary = "PORTAL-TEST-BOUNDARY";
    let mut body = String::new();

    for (name, value) in [
        ("name", "Asha"),
        ("whatsapp", "9876543210"),
        ("email", "a@x.com"),
        ("service", "Plumbing"),
        ("area", "Wakad"),
        ("description", "Reliable plumbing for Wakad homes."),
    ] {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }

    if with_document {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"aadhaar\"; filename=\"aadhaar.png\"\r\nContent-Type: image/png\r\n\r\nPNGBYTES\r\n"
        ));
    }

    body.push_str(&format!("--{boundary}--\r\n"));

    let content_type = rocket::http::ContentType::new("multipart", "form-data")
        .with_params(("boundary", boundary));
    (content_type, body.into_bytes())
}
