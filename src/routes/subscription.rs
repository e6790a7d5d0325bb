use log::{info, warn};
use rocket::State;
use rocket::form::Form;
use rocket::http::CookieJar;
use rocket::response::{Flash, Redirect};
use rocket_dyn_templates::{Template, context};

use crate::flow::{FlowEvent, PurchaseFlow};
use crate::guards::SessionGuard;
use crate::models::catalog::landing_plan;
use crate::models::{PaymentConfirmation, SelectedPlan};
use crate::session::{CompletionFlag, SessionStore};
use crate::{Backend, Gateway};

#[derive(FromForm)]
pub struct SelectPlanForm {
    pub plan_key: String,
}

/// "Start with {plan}" on the landing page. The choice is persisted
/// before anything else so it survives the signup round trip; a repeat
/// selection simply overwrites the previous one.
#[post("/plans/select", data = "<form>")]
pub async fn select_plan(
    cookies: &CookieJar<'_>,
    form: Form<SelectPlanForm>,
) -> Result<Redirect, Flash<Redirect>> {
    let Some(plan) = landing_plan(&form.plan_key) else {
        return Err(Flash::error(Redirect::to("/"), "That plan is no longer offered."));
    };

    let session = SessionStore::new(cookies);
    session.select_plan(&plan.to_selected());

    let authenticated = session.is_logged_in();
    let state = PurchaseFlow::NoPlanSelected.apply(FlowEvent::PlanChosen { authenticated });
    info!("plan {} selected, flow now {}", plan.key, state.as_str());

    // Signed-in visitors go straight to the dashboard; everyone else
    // signs up first and lands there afterwards.
    if authenticated {
        Ok(Redirect::to("/dashboard"))
    } else {
        Ok(Redirect::to("/signup"))
    }
}

#[derive(FromForm)]
pub struct BuyPlanForm {
    pub plan_key: String,
    pub plan_name: String,
}

/// "Buy" on the dashboard plan list. Order of checks matters: the gateway
/// availability check aborts the attempt before any order exists
/// server-side.
#[post("/dashboard/subscribe", data = "<form>")]
pub async fn subscribe(
    guard: SessionGuard,
    cookies: &CookieJar<'_>,
    backend: &State<Backend>,
    gateway: &State<Gateway>,
    form: Form<BuyPlanForm>,
) -> Result<Template, Flash<Redirect>> {
    let backend = backend.inner().as_ref();
    let dash = || Redirect::to("/dashboard?tab=overview");

    if !gateway.is_available() {
        return Err(Flash::error(dash(), "Payment gateway failed to load. Please try again later."));
    }

    // Buying is only offered once the profile exists; re-check so a stale
    // page can't jump the gate.
    let profile = match backend.fetch_profile(&guard.credential).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return Err(Flash::error(dash(), "Complete your profile before choosing a plan."));
        }
        Err(e) => return Err(Flash::error(dash(), e.user_message())),
    };

    let order = match backend.create_order(&guard.credential, &form.plan_key).await {
        Ok(order) => order,
        Err(e) => {
            warn!("create-order failed for plan {}: {}", form.plan_key, e);
            return Err(Flash::error(dash(), e.user_message()));
        }
    };

    let prefill_email = profile.email.clone().unwrap_or_else(|| guard.user.email.clone());
    let checkout = match gateway.open(&order, &form.plan_name, &profile.name, &prefill_email) {
        Ok(checkout) => checkout,
        Err(e) => return Err(Flash::error(dash(), e.to_string())),
    };

    // Keep the pending selection pointed at what is actually being bought,
    // so a later resume (e.g. dismissed checkout) prompts for this plan.
    let session = SessionStore::new(cookies);
    if session.selected_plan().map(|p| p.key != form.plan_key).unwrap_or(true) {
        session.select_plan(&SelectedPlan {
            key: form.plan_key.clone(),
            name: form.plan_name.clone(),
            price: format!("₹{}", order.amount / 100),
            period: String::new(),
            features: Vec::new(),
        });
    }

    let state = PurchaseFlow::PlanSelectedAuthenticated.apply(FlowEvent::OrderCreated);
    info!("order {} created for plan {}, flow now {}", checkout.order_id, form.plan_key, state.as_str());

    Ok(Template::render("checkout", context! { checkout: &checkout, user: &guard.user }))
}

/// The gateway's success handler posts here. The three identifiers are
/// forwarded verbatim to the backend; only the backend's verdict flips
/// the subscription, never the callback alone. A dismissed checkout never
/// reaches this route.
#[post("/dashboard/payment/callback", data = "<confirmation>")]
pub async fn payment_callback(
    guard: SessionGuard,
    cookies: &CookieJar<'_>,
    backend: &State<Backend>,
    confirmation: Form<PaymentConfirmation>,
) -> Flash<Redirect> {
    let backend = backend.inner().as_ref();
    let session = SessionStore::new(cookies);
    let state = PurchaseFlow::PaymentPending.apply(FlowEvent::CallbackReceived);

    match backend.verify_payment(&guard.credential, &confirmation).await {
        Ok(()) => {
            let state = state.apply(FlowEvent::VerifySucceeded);
            info!("payment {} verified, flow now {}", confirmation.razorpay_payment_id, state.as_str());

            // Refetch so the dashboard reflects the backend's state, not
            // the callback's word.
            let (profile, subscription) = tokio::join!(
                backend.fetch_profile(&guard.credential),
                backend.my_subscription(&guard.credential),
            );
            if let Ok(profile) = profile {
                session.set_completion(CompletionFlag::confirmed(profile.is_some()));
            }
            if let Err(e) = subscription {
                warn!("post-verify subscription refetch failed: {}", e);
            }

            session.clear_selected_plan();
            Flash::success(Redirect::to("/dashboard?tab=overview"), "Subscription activated 🎉")
        }
        Err(e) => {
            let state = state.apply(FlowEvent::VerifyFailed);
            warn!(
                "payment {} verification failed, flow now {}: {}",
                confirmation.razorpay_payment_id,
                state.as_str(),
                e
            );
            Flash::error(
                Redirect::to("/dashboard?tab=overview"),
                "Payment successful but verification failed. Please contact support before retrying.",
            )
        }
    }
}
