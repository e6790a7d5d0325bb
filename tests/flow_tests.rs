//! Plan selection and resume across the auth round trip.

mod common;

use std::sync::Arc;

use common::{MockBackend, client, completed_profile, sign_up};
use rocket::http::{ContentType, Status};

#[test]
fn plan_click_while_logged_out_routes_to_signup_and_persists_intent() {
    let backend = Arc::new(MockBackend::default());
    let client = client(backend.clone());

    let response = client
        .post("/plans/select")
        .header(ContentType::Form)
        .body("plan_key=professional")
        .dispatch();

    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(response.headers().get_one("Location"), Some("/signup"));

    let cookies = client.cookies();
    let plan_cookie = cookies.get("gs_selected_plan").expect("plan persisted");
    assert!(plan_cookie.value().contains("professional"));

    // Nothing was purchased or ordered by merely selecting.
    assert!(!backend.called("create_order"));
}

#[test]
fn signup_with_pending_plan_lands_on_gated_dashboard() {
    // Visitor clicks "Professional" logged out, signs up, and the
    // dashboard (not the landing page) decides what happens next: with no
    // profile, gated tabs show the completion prompt instead of plans.
    let backend = Arc::new(MockBackend::default());
    let client = client(backend.clone());

    client
        .post("/plans/select")
        .header(ContentType::Form)
        .body("plan_key=professional")
        .dispatch();

    let response = client
        .post("/auth/signup")
        .header(ContentType::Form)
        .body("name=A&email=a%40x.com&password=secret123")
        .dispatch();
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(response.headers().get_one("Location"), Some("/dashboard"));

    let response = client.get("/dashboard?tab=overview").dispatch();
    let body = response.into_string().expect("body");

    assert!(body.contains("Complete Your Profile"));
    assert!(!body.contains("Choose Professional"));
    assert!(!body.contains("No New Leads Currently"));
}

#[test]
fn selecting_a_second_plan_overwrites_the_first() {
    let backend = Arc::new(MockBackend::default());
    let client = client(backend);

    for key in ["basic", "professional"] {
        client
            .post("/plans/select")
            .header(ContentType::Form)
            .body(format!("plan_key={}", key))
            .dispatch();
    }

    let cookies = client.cookies();
    let plan_cookie = cookies.get("gs_selected_plan").expect("plan persisted");
    assert!(plan_cookie.value().contains("professional"));
    assert!(!plan_cookie.value().contains("basic"));
}

#[test]
fn plan_click_while_logged_in_goes_straight_to_dashboard() {
    let backend = Arc::new(MockBackend::default());
    let client = client(backend);
    sign_up(&client);

    let response = client
        .post("/plans/select")
        .header(ContentType::Form)
        .body("plan_key=basic")
        .dispatch();

    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(response.headers().get_one("Location"), Some("/dashboard"));
}

#[test]
fn dashboard_prompts_to_resume_pending_plan_once_profile_exists() {
    let backend = Arc::new(MockBackend::default().with_profile(completed_profile()));
    let client = client(backend);
    sign_up(&client);

    client
        .post("/plans/select")
        .header(ContentType::Form)
        .body("plan_key=professional")
        .dispatch();

    let response = client.get("/dashboard?tab=overview").dispatch();
    let body = response.into_string().expect("body");

    assert!(body.contains("Finish setting up Professional"));
    assert!(body.contains("Choose Professional"));
}

#[test]
fn unknown_plan_key_is_rejected() {
    let backend = Arc::new(MockBackend::default());
    let client = client(backend);

    let response = client
        .post("/plans/select")
        .header(ContentType::Form)
        .body("plan_key=platinum")
        .dispatch();

    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(response.headers().get_one("Location"), Some("/"));
    assert!(client.cookies().get("gs_selected_plan").is_none());
}
