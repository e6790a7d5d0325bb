use log::warn;
use reqwest::{Client, Response, StatusCode, header};
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::models::{
    AuthUser, BackendPlan, PaymentConfirmation, PaymentOrder, ProfileFields, ProviderProfile,
    Subscription, UploadedFile,
};

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Error from a backend call. `Api` carries the backend's own message when
/// the response body had one, otherwise the generic fallback; callers show
/// it once as a blocking notification and never retry.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("could not reach the server: {0}")]
    Transport(String),

    #[error("{message}")]
    Api { status: u16, message: String },
}

impl BackendError {
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Transport(_) => GENERIC_FAILURE.to_string(),
            BackendError::Api { message, .. } => message.clone(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::Api { status: 404, .. })
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, BackendError::Api { status: 401, .. })
    }
}

/// What the session probe returns.
#[derive(Debug, Deserialize, Clone)]
pub struct SessionProbe {
    pub user: AuthUser,
    pub provider: Option<ProbeProvider>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProbeProvider {
    #[serde(default)]
    pub profile_completed: bool,
}

/// Identity plus the session cookie the backend set, replayed on every
/// later call.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub user: AuthUser,
    pub credential: Option<String>,
}

/// One method per backend endpoint. Behind a trait so tests can script the
/// backend instead of standing one up.
#[rocket::async_trait]
pub trait BackendApi: Send + Sync {
    async fn me(&self, credential: &str) -> Result<SessionProbe, BackendError>;
    async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome, BackendError>;
    async fn signup(&self, name: &str, email: &str, password: &str)
        -> Result<AuthOutcome, BackendError>;
    async fn logout(&self, credential: &str) -> Result<(), BackendError>;

    async fn fetch_profile(&self, credential: &str)
        -> Result<Option<ProviderProfile>, BackendError>;
    async fn submit_profile(
        &self,
        credential: &str,
        fields: &ProfileFields,
        photo: Option<UploadedFile>,
        document: UploadedFile,
    ) -> Result<(), BackendError>;

    async fn my_subscription(&self, credential: &str)
        -> Result<Option<Subscription>, BackendError>;
    async fn list_plans(&self) -> Result<Vec<BackendPlan>, BackendError>;
    async fn create_order(&self, credential: &str, plan_key: &str)
        -> Result<PaymentOrder, BackendError>;
    async fn verify_payment(
        &self,
        credential: &str,
        confirmation: &PaymentConfirmation,
    ) -> Result<(), BackendError>;
}

/// reqwest-backed client for the GharSeva backend API.
pub struct HttpBackend {
    http: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new() -> Self {
        Self::with_base_url(Config::backend_api_url())
    }

    pub fn with_base_url(base_url: String) -> Self {
        // No timeout on purpose: a hung backend call stays pending, which
        // is the documented behavior of this flow.
        HttpBackend {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str, credential: &str) -> reqwest::RequestBuilder {
        let mut req = self.http.request(method, self.url(path));
        if !credential.is_empty() {
            req = req.header(header::COOKIE, credential);
        }
        req
    }

    /// Pulls `name=value` pairs out of the response's Set-Cookie headers
    /// so the session credential can be replayed later.
    fn capture_cookies(response: &Response) -> Option<String> {
        let pairs: Vec<String> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        if pairs.is_empty() { None } else { Some(pairs.join("; ")) }
    }

    async fn check(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // The backend reports failures as { "message": "..." }.
        #[derive(Deserialize)]
        struct ErrorBody {
            message: Option<String>,
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());

        Err(BackendError::Api { status: status.as_u16(), message })
    }

    async fn check_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        Self::check(response)
            .await?
            .json::<T>()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))
    }

    fn transport(e: reqwest::Error) -> BackendError {
        warn!("backend request failed: {}", e);
        BackendError::Transport(e.to_string())
    }
}

#[rocket::async_trait]
impl BackendApi for HttpBackend {
    async fn me(&self, credential: &str) -> Result<SessionProbe, BackendError> {
        let res = self
            .request(reqwest::Method::GET, "/api/auth/me", credential)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::check_json(res).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome, BackendError> {
        let res = self
            .request(reqwest::Method::POST, "/api/auth/login", "")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(Self::transport)?;

        let credential = Self::capture_cookies(&res);
        #[derive(Deserialize)]
        struct Body {
            user: AuthUser,
        }
        let body: Body = Self::check_json(res).await?;
        Ok(AuthOutcome { user: body.user, credential })
    }

    async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, BackendError> {
        let res = self
            .request(reqwest::Method::POST, "/api/auth/signup", "")
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await
            .map_err(Self::transport)?;

        let credential = Self::capture_cookies(&res);
        #[derive(Deserialize)]
        struct Body {
            user: AuthUser,
        }
        let body: Body = Self::check_json(res).await?;
        Ok(AuthOutcome { user: body.user, credential })
    }

    async fn logout(&self, credential: &str) -> Result<(), BackendError> {
        let res = self
            .request(reqwest::Method::POST, "/api/auth/logout", credential)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::check(res).await?;
        Ok(())
    }

    async fn fetch_profile(&self, credential: &str)
        -> Result<Option<ProviderProfile>, BackendError>
    {
        let res = self
            .request(reqwest::Method::GET, "/api/profile", credential)
            .send()
            .await
            .map_err(Self::transport)?;

        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        #[derive(Deserialize)]
        struct Body {
            provider: Option<ProviderProfile>,
        }
        let body: Body = Self::check_json(res).await?;
        Ok(body.provider)
    }

    async fn submit_profile(
        &self,
        credential: &str,
        fields: &ProfileFields,
        photo: Option<UploadedFile>,
        document: UploadedFile,
    ) -> Result<(), BackendError> {
        let mut form = reqwest::multipart::Form::new()
            .text("name", fields.name.clone())
            .text("phone", fields.phone.clone())
            .text("email", fields.email.clone())
            .text("primaryService", fields.primary_service.label().to_string())
            .text("serviceArea", fields.service_area.label().to_string())
            .text("description", fields.description.clone());

        if let Some(photo) = photo {
            let part = reqwest::multipart::Part::bytes(photo.bytes)
                .file_name(photo.file_name)
                .mime_str(&photo.content_type)
                .map_err(|e| BackendError::Transport(e.to_string()))?;
            form = form.part("profilePhoto", part);
        }

        let part = reqwest::multipart::Part::bytes(document.bytes)
            .file_name(document.file_name)
            .mime_str(&document.content_type)
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        form = form.part("aadhaar", part);

        let res = self
            .request(reqwest::Method::POST, "/api/profile", credential)
            .multipart(form)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::check(res).await?;
        Ok(())
    }

    async fn my_subscription(&self, credential: &str)
        -> Result<Option<Subscription>, BackendError>
    {
        let res = self
            .request(reqwest::Method::GET, "/subscriptions/my", credential)
            .send()
            .await
            .map_err(Self::transport)?;

        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        #[derive(Deserialize)]
        struct Body {
            subscription: Option<Subscription>,
        }
        let body: Body = Self::check_json(res).await?;
        Ok(body.subscription)
    }

    async fn list_plans(&self) -> Result<Vec<BackendPlan>, BackendError> {
        let res = self
            .request(reqwest::Method::GET, "/subscriptions/plans", "")
            .send()
            .await
            .map_err(Self::transport)?;

        #[derive(Deserialize)]
        struct Body {
            #[serde(default)]
            plans: Vec<BackendPlan>,
        }
        let body: Body = Self::check_json(res).await?;
        Ok(body.plans)
    }

    async fn create_order(&self, credential: &str, plan_key: &str)
        -> Result<PaymentOrder, BackendError>
    {
        let res = self
            .request(reqwest::Method::POST, "/subscriptions/create-order", credential)
            .json(&json!({ "planKey": plan_key }))
            .send()
            .await
            .map_err(Self::transport)?;
        Self::check_json(res).await
    }

    async fn verify_payment(
        &self,
        credential: &str,
        confirmation: &PaymentConfirmation,
    ) -> Result<(), BackendError> {
        let res = self
            .request(reqwest::Method::POST, "/subscriptions/verify", credential)
            .json(&json!({
                "razorpay_order_id": confirmation.razorpay_order_id,
                "razorpay_payment_id": confirmation.razorpay_payment_id,
                "razorpay_signature": confirmation.razorpay_signature,
            }))
            .send()
            .await
            .map_err(Self::transport)?;
        Self::check(res).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_prefers_backend_message() {
        let err = BackendError::Api { status: 400, message: "Email already registered".into() };
        assert_eq!(err.user_message(), "Email already registered");
    }

    #[test]
    fn transport_error_falls_back_to_generic_message() {
        let err = BackendError::Transport("connection refused".into());
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn not_found_detection() {
        let err = BackendError::Api { status: 404, message: "no profile".into() };
        assert!(err.is_not_found());
        assert!(!err.is_unauthorized());
    }
}
