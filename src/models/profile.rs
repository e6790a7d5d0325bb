use serde::{Deserialize, Serialize};

use crate::models::{ServiceArea, ServiceCategory};

/// Provider profile as the backend returns it. The portal never mutates
/// this copy; it only renders it and derives gating decisions from it.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProfile {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub primary_service: Option<ServiceCategory>,
    pub primary_service_area: Option<ServiceArea>,
    pub description: Option<String>,
    pub profile_photo_url: Option<String>,
    pub aadhaar_url: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    pub rating: Option<f64>,
    #[serde(default)]
    pub jobs_completed: i64,
    pub monthly_earnings: Option<i64>,
    pub leads_today: Option<i64>,
}

/// Text fields of the profile form, paired with the uploaded files by the
/// route handler before the multipart call to the backend.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileFields {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub primary_service: ServiceCategory,
    pub service_area: ServiceArea,
    pub description: String,
}

/// A file pulled out of the form submission, spooled into memory for the
/// onward multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
