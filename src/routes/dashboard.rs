use log::warn;
use rocket::State;
use rocket::http::CookieJar;
use rocket::request::FlashMessage;
use rocket::response::Redirect;
use rocket_dyn_templates::{Template, context};

use crate::Backend;
use crate::flow::{FlowFacts, PurchaseFlow};
use crate::guards::SessionGuard;
use crate::session::{CompletionFlag, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromFormField)]
pub enum DashboardTab {
    #[field(value = "profile")]
    Profile,
    #[field(value = "overview")]
    Overview,
    #[field(value = "leads")]
    Leads,
    #[field(value = "earnings")]
    Earnings,
}

impl DashboardTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            DashboardTab::Profile => "profile",
            DashboardTab::Overview => "overview",
            DashboardTab::Leads => "leads",
            DashboardTab::Earnings => "earnings",
        }
    }

    /// Profile is always reachable; the other tabs need a profile.
    pub fn requires_profile(&self) -> bool {
        !matches!(self, DashboardTab::Profile)
    }
}

/// The dashboard is the single place that inspects the pending plan and
/// decides what happens next. On mount it fetches the profile and the
/// subscription concurrently — neither depends on the other — and only
/// fetches the plan catalog when no subscription is active.
#[get("/dashboard?<tab>")]
pub async fn dashboard(
    tab: Option<DashboardTab>,
    guard: SessionGuard,
    cookies: &CookieJar<'_>,
    backend: &State<Backend>,
    flash: Option<FlashMessage<'_>>,
) -> Template {
    let backend = backend.inner().as_ref();
    let session = SessionStore::new(cookies);
    let tab = tab.unwrap_or(DashboardTab::Profile);

    let (profile, subscription) = tokio::join!(
        backend.fetch_profile(&guard.credential),
        backend.my_subscription(&guard.credential),
    );

    let profile = profile.unwrap_or_else(|e| {
        warn!("profile fetch failed: {}", e);
        None
    });
    let subscription = subscription.unwrap_or_else(|e| {
        warn!("subscription fetch failed: {}", e);
        None
    });

    // The fetch is authoritative; it overrides any optimistic flag left
    // over from a recent submit.
    session.set_completion(CompletionFlag::confirmed(profile.is_some()));

    let subscription_active = subscription.as_ref().map(|s| s.is_active()).unwrap_or(false);

    let plans = if subscription_active {
        Vec::new()
    } else {
        backend.list_plans().await.unwrap_or_else(|e| {
            warn!("plan catalog fetch failed: {}", e);
            Vec::new()
        })
    };

    let selected_plan = session.selected_plan();
    let flow = PurchaseFlow::derive(FlowFacts {
        authenticated: true,
        plan_pending: selected_plan.is_some(),
        profile_complete: profile.is_some(),
        subscription_active,
    });

    let gated = profile.is_none() && tab.requires_profile();

    Template::render(
        "dashboard",
        context! {
            user: &guard.user,
            tab: tab.as_str(),
            gated,
            flow: flow.as_str(),
            profile: &profile,
            subscription: &subscription,
            subscription_active,
            plans: &plans,
            selected_plan: &selected_plan,
            flash_kind: flash.as_ref().map(|f| f.kind().to_string()),
            flash_message: flash.as_ref().map(|f| f.message().to_string()),
        },
    )
}

#[get("/dashboard?<_tab>", rank = 2)]
pub fn dashboard_unauthenticated(_tab: Option<&str>) -> Redirect {
    Redirect::to("/")
}
