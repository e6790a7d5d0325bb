use rocket::State;
use rocket::http::CookieJar;
use rocket::request::FlashMessage;
use rocket_dyn_templates::{Template, context};

use crate::Backend;
use crate::models::catalog::{LANDING_PLANS, LOCATIONS, REVIEWS, SERVICES, STATS};
use crate::session::SessionStore;

/// Landing page. Runs the session probe on every load so the nav reflects
/// reality even after the backend session expired.
#[get("/")]
pub async fn landing(
    cookies: &CookieJar<'_>,
    backend: &State<Backend>,
    flash: Option<FlashMessage<'_>>,
) -> Template {
    let session = SessionStore::new(cookies);
    let user = session.restore(backend.inner().as_ref()).await;

    Template::render(
        "index",
        context! {
            user: &user,
            logged_in: user.is_some(),
            profile_completed: session.is_profile_completed(),
            services: &SERVICES[..],
            locations: &LOCATIONS[..],
            reviews: &REVIEWS[..],
            stats: &STATS[..],
            plans: &LANDING_PLANS[..],
            flash_kind: flash.as_ref().map(|f| f.kind().to_string()),
            flash_message: flash.as_ref().map(|f| f.message().to_string()),
        },
    )
}
