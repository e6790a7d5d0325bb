use serde::Serialize;

/// Facts the dashboard derives its state from. Profile and subscription
/// are whatever the two concurrent fetches returned; the pending plan is
/// whatever the session store holds.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowFacts {
    pub authenticated: bool,
    pub plan_pending: bool,
    pub profile_complete: bool,
    pub subscription_active: bool,
}

/// The plan-selection / purchase protocol. Selection and purchase are
/// deliberately split: a visitor can pick a plan before logging in, and
/// the dashboard is the single place that resumes the pending intent.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseFlow {
    NoPlanSelected,
    PlanSelectedUnauthenticated,
    PlanSelectedAuthenticated,
    ProfileIncomplete,
    PaymentPending,
    PaymentVerifying,
    Subscribed,
    Failed,
}

/// Events that move the flow forward. Payment events originate outside
/// the portal's request cycle (the gateway's success handler).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    PlanChosen { authenticated: bool },
    AuthSucceeded,
    OrderCreated,
    GatewayUnavailable,
    CheckoutDismissed,
    CallbackReceived,
    VerifySucceeded,
    VerifyFailed,
}

impl PurchaseFlow {
    /// State as the dashboard sees it on mount, after both fetches have
    /// completed. An active subscription is terminal; a missing profile
    /// gates everything else regardless of payment state.
    pub fn derive(facts: FlowFacts) -> Self {
        if facts.subscription_active {
            return PurchaseFlow::Subscribed;
        }
        if facts.authenticated && !facts.profile_complete {
            return PurchaseFlow::ProfileIncomplete;
        }
        match (facts.plan_pending, facts.authenticated) {
            (true, true) => PurchaseFlow::PlanSelectedAuthenticated,
            (true, false) => PurchaseFlow::PlanSelectedUnauthenticated,
            (false, _) => PurchaseFlow::NoPlanSelected,
        }
    }

    /// Whether the buy button may call create-order from this state.
    pub fn can_open_checkout(&self) -> bool {
        matches!(
            self,
            PurchaseFlow::NoPlanSelected | PurchaseFlow::PlanSelectedAuthenticated
        )
    }

    pub fn apply(self, event: FlowEvent) -> PurchaseFlow {
        use FlowEvent::*;
        use PurchaseFlow::*;

        match (self, event) {
            // Selecting a plan persists it first, then routes by session.
            (_, PlanChosen { authenticated: false }) => PlanSelectedUnauthenticated,
            (_, PlanChosen { authenticated: true }) => PlanSelectedAuthenticated,

            // Auth success always lands on the dashboard, which decides
            // whether to resume the pending plan.
            (PlanSelectedUnauthenticated, AuthSucceeded) => PlanSelectedAuthenticated,
            (state, AuthSucceeded) => state,

            // An unavailable gateway aborts before create-order.
            (state, GatewayUnavailable) if state.can_open_checkout() => state,

            (state, OrderCreated) if state.can_open_checkout() => PaymentPending,

            // Dismissing the checkout fires no callback; nothing changes
            // and the pending state simply lapses back to selection.
            (PaymentPending, CheckoutDismissed) => PlanSelectedAuthenticated,

            (PaymentPending, CallbackReceived) => PaymentVerifying,
            (PaymentVerifying, VerifySucceeded) => Subscribed,
            // Money may have moved without a confirmed subscription;
            // terminal until manual follow-up. No automatic retry.
            (PaymentVerifying, VerifyFailed) => Failed,

            (state, _) => state,
        }
    }

    /// Name used by templates to pick what the dashboard body shows.
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseFlow::NoPlanSelected => "no_plan_selected",
            PurchaseFlow::PlanSelectedUnauthenticated => "plan_selected_unauthenticated",
            PurchaseFlow::PlanSelectedAuthenticated => "plan_selected_authenticated",
            PurchaseFlow::ProfileIncomplete => "profile_incomplete",
            PurchaseFlow::PaymentPending => "payment_pending",
            PurchaseFlow::PaymentVerifying => "payment_verifying",
            PurchaseFlow::Subscribed => "subscribed",
            PurchaseFlow::Failed => "failed",
        }
    }
}
