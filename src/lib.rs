#[macro_use]
extern crate rocket;

pub mod config;
pub mod flow;
pub mod guards;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod utils;

use std::sync::Arc;

use rocket::fs::{FileServer, relative};
use rocket::{Build, Rocket};
use rocket_dyn_templates::Template;

use crate::services::{BackendApi, CheckoutGateway};

/// The external collaborators, injected so tests can script them.
pub type Backend = Arc<dyn BackendApi>;
pub type Gateway = Arc<dyn CheckoutGateway>;

/* ----------------------------- ERRORS ----------------------------- */

#[catch(404)]
fn not_found() -> Template {
    Template::render("error", rocket_dyn_templates::context! {
        code: 404,
        message: "This page does not exist.",
    })
}

#[catch(500)]
fn internal_error() -> Template {
    Template::render("error", rocket_dyn_templates::context! {
        code: 500,
        message: "Something went wrong on our side.",
    })
}

/* ----------------------------- BUILD ----------------------------- */

pub fn build(backend: Backend, gateway: Gateway) -> Rocket<Build> {
    rocket::build()
        .manage(backend)
        .manage(gateway)
        .attach(Template::fairing())
        .mount(
            "/",
            routes![
                // Landing
                routes::pages::landing,
                // Auth
                routes::auth::login_page,
                routes::auth::signup_page,
                routes::auth::login,
                routes::auth::signup,
                routes::auth::logout,
                // Dashboard
                routes::dashboard::dashboard,
                routes::dashboard::dashboard_unauthenticated,
                // Profile
                routes::profile::profile_form,
                routes::profile::profile_suggestions,
                routes::profile::submit_profile,
                // Subscription
                routes::subscription::select_plan,
                routes::subscription::subscribe,
                routes::subscription::payment_callback,
            ],
        )
        .mount("/static", FileServer::from(relative!("static")))
        .register("/", catchers![not_found, internal_error])
}
