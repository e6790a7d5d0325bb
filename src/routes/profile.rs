use log::{info, warn};
use rocket::State;
use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::http::CookieJar;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::serde::json::Json;
use rocket_dyn_templates::{Template, context};

use crate::Backend;
use crate::guards::SessionGuard;
use crate::models::category::insertable_suggestions;
use crate::models::{ProfileFields, ServiceArea, ServiceCategory};
use crate::session::{CompletionFlag, SessionStore};
use crate::utils::uploads;
use crate::utils::validate_mobile;

#[get("/dashboard/profile/edit")]
pub fn profile_form(guard: SessionGuard, flash: Option<FlashMessage<'_>>) -> Template {
    let professions: Vec<&str> = ServiceCategory::PROFESSIONS.iter().map(|c| c.label()).collect();
    let areas: Vec<&str> = ServiceArea::ALL.iter().map(|a| a.label()).collect();

    Template::render(
        "profile_form",
        context! {
            user: &guard.user,
            professions,
            areas,
            flash_kind: flash.as_ref().map(|f| f.kind().to_string()),
            flash_message: flash.as_ref().map(|f| f.message().to_string()),
        },
    )
}

/// Bio suggestions for the chosen profession, minus anything the bio
/// already contains. Static lookup, no backend involved.
#[get("/dashboard/profile/suggestions?<service>&<name>&<bio>")]
pub fn profile_suggestions(
    _guard: SessionGuard,
    service: ServiceCategory,
    name: Option<&str>,
    bio: Option<&str>,
) -> Json<Vec<String>> {
    Json(insertable_suggestions(
        service,
        name.unwrap_or(""),
        bio.unwrap_or(""),
    ))
}

#[derive(FromForm)]
pub struct ProfileSubmission<'r> {
    pub name: String,
    pub whatsapp: String,
    pub email: String,
    pub service: ServiceCategory,
    pub area: ServiceArea,
    pub description: String,
    pub profile_photo: Option<TempFile<'r>>,
    pub aadhaar: Option<TempFile<'r>>,
}

/// Profile upsert. The identity document is required before anything goes
/// over the wire; the rest is packaged into one multipart request to the
/// backend.
#[post("/dashboard/profile", data = "<form>")]
pub async fn submit_profile(
    guard: SessionGuard,
    cookies: &CookieJar<'_>,
    backend: &State<Backend>,
    form: Form<ProfileSubmission<'_>>,
) -> Flash<Redirect> {
    let mut form = form.into_inner();
    let back = || Redirect::to("/dashboard/profile/edit");

    if !uploads::is_attached(&form.aadhaar) {
        return Flash::error(back(), "Please upload your Aadhaar card for verification.");
    }

    if !validate_mobile(&form.whatsapp) {
        return Flash::error(back(), "Enter a valid WhatsApp number.");
    }

    // Vet the files locally; the form promises PDF/JPG/PNG up to 5MB.
    let aadhaar = form.aadhaar.as_mut().unwrap();
    match uploads::extension_of(aadhaar) {
        Some(ext) if uploads::is_valid_document_extension(&ext) => {}
        _ => return Flash::error(back(), "Aadhaar must be a PDF, JPG or PNG file."),
    }
    if aadhaar.len() > uploads::MAX_UPLOAD_BYTES {
        return Flash::error(back(), "Aadhaar file is larger than 5MB.");
    }

    let aadhaar = match uploads::spool(aadhaar, "aadhaar").await {
        Ok(file) => file,
        Err(e) => {
            warn!("failed to read aadhaar upload: {}", e);
            return Flash::error(back(), "Could not read the uploaded Aadhaar file.");
        }
    };

    let photo = if uploads::is_attached(&form.profile_photo) {
        let photo = form.profile_photo.as_mut().unwrap();
        match uploads::extension_of(photo) {
            Some(ext) if uploads::is_valid_image_extension(&ext) => {}
            _ => return Flash::error(back(), "Profile photo must be an image."),
        }
        if photo.len() > uploads::MAX_UPLOAD_BYTES {
            return Flash::error(back(), "Profile photo is larger than 5MB.");
        }
        match uploads::spool(photo, "profile_photo").await {
            Ok(file) => Some(file),
            Err(e) => {
                warn!("failed to read profile photo upload: {}", e);
                return Flash::error(back(), "Could not read the uploaded profile photo.");
            }
        }
    } else {
        None
    };

    let fields = ProfileFields {
        name: form.name.clone(),
        phone: form.whatsapp.clone(),
        email: form.email.clone(),
        primary_service: form.service,
        service_area: form.area,
        description: form.description.clone(),
    };

    match backend
        .submit_profile(&guard.credential, &fields, photo, aadhaar)
        .await
    {
        Ok(()) => {
            // Optimistic until the dashboard's next authoritative fetch.
            let session = SessionStore::new(cookies);
            session.set_completion(CompletionFlag::optimistic_completed());
            info!("profile submitted for {}", guard.user.email);
            Flash::success(Redirect::to("/dashboard?tab=profile"), "Profile updated successfully!")
        }
        Err(e) => Flash::error(back(), e.user_message()),
    }
}
