#[macro_use]
extern crate rocket;

use std::sync::Arc;

use dotenvy::dotenv;
use rocket::{Build, Rocket};

use gharseva_portal::services::{HttpBackend, RazorpayCheckout};
use gharseva_portal::{build, config::Config};

#[launch]
fn rocket() -> Rocket<Build> {
    dotenv().ok();
    env_logger::init();

    println!("🏠 GharSeva portal running");
    println!("🔗 Backend API → {}", Config::backend_api_url());
    if !Config::is_checkout_enabled() {
        println!("⚠️  Razorpay key not configured; checkout is disabled");
    }

    build(
        Arc::new(HttpBackend::new()),
        Arc::new(RazorpayCheckout::from_config()),
    )
}
