use log::info;
use rocket::State;
use rocket::form::Form;
use rocket::http::CookieJar;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket_dyn_templates::{Template, context};
use validator::Validate;

use crate::Backend;
use crate::models::{LoginDto, SignupDto};
use crate::session::SessionStore;

/// First human-readable message out of a validator error set.
fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Please check the form and try again.".to_string())
}

#[get("/login")]
pub fn login_page(cookies: &CookieJar<'_>, flash: Option<FlashMessage<'_>>) -> Template {
    let session = SessionStore::new(cookies);
    Template::render(
        "login",
        context! {
            selected_plan: session.selected_plan(),
            flash_kind: flash.as_ref().map(|f| f.kind().to_string()),
            flash_message: flash.as_ref().map(|f| f.message().to_string()),
        },
    )
}

#[get("/signup")]
pub fn signup_page(cookies: &CookieJar<'_>, flash: Option<FlashMessage<'_>>) -> Template {
    let session = SessionStore::new(cookies);
    Template::render(
        "signup",
        context! {
            // A pending plan survives the switch between the two forms.
            selected_plan: session.selected_plan(),
            flash_kind: flash.as_ref().map(|f| f.kind().to_string()),
            flash_message: flash.as_ref().map(|f| f.message().to_string()),
        },
    )
}

/// On success the destination is always the dashboard — it alone decides
/// whether a pending plan gets resumed.
#[post("/auth/login", data = "<dto>")]
pub async fn login(
    cookies: &CookieJar<'_>,
    backend: &State<Backend>,
    dto: Form<LoginDto>,
) -> Result<Redirect, Flash<Redirect>> {
    if let Err(errors) = dto.validate() {
        return Err(Flash::error(
            Redirect::to("/login"),
            first_validation_message(&errors),
        ));
    }

    match backend.login(&dto.email, &dto.password).await {
        Ok(outcome) => {
            let session = SessionStore::new(cookies);
            session.login(&outcome.user, outcome.credential.as_deref());
            info!("provider {} logged in", outcome.user.email);
            Ok(Redirect::to("/dashboard"))
        }
        Err(e) => Err(Flash::error(Redirect::to("/login"), e.user_message())),
    }
}

#[post("/auth/signup", data = "<dto>")]
pub async fn signup(
    cookies: &CookieJar<'_>,
    backend: &State<Backend>,
    dto: Form<SignupDto>,
) -> Result<Redirect, Flash<Redirect>> {
    if let Err(errors) = dto.validate() {
        return Err(Flash::error(
            Redirect::to("/signup"),
            first_validation_message(&errors),
        ));
    }

    match backend.signup(&dto.name, &dto.email, &dto.password).await {
        Ok(outcome) => {
            let session = SessionStore::new(cookies);
            session.signup(&outcome.user, outcome.credential.as_deref());
            info!("provider {} signed up", outcome.user.email);
            Ok(Redirect::to("/dashboard"))
        }
        Err(e) => Err(Flash::error(Redirect::to("/signup"), e.user_message())),
    }
}

/// Local state is cleared no matter what the backend says; at worst the
/// remote session lingers until its cookie is rejected.
#[post("/logout")]
pub async fn logout(cookies: &CookieJar<'_>, backend: &State<Backend>) -> Redirect {
    let session = SessionStore::new(cookies);
    session.logout(backend.inner().as_ref()).await;
    Redirect::to("/")
}
