use serde::{Deserialize, Serialize};
use validator::Validate;

/// Identity returned by the backend on login/signup and by the session
/// probe. The backend serializes Mongo ids as `_id`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AuthUser {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, FromForm)]
pub struct LoginDto {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, FromForm)]
pub struct SignupDto {
    #[validate(length(min = 2, message = "Enter your full name"))]
    pub name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}
