use log::info;
use rocket::http::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};

use crate::models::{AuthUser, SelectedPlan};
use crate::services::BackendApi;

const CREDENTIAL_COOKIE: &str = "gs_backend_session";
const USER_COOKIE: &str = "gs_user";
const PROFILE_COOKIE: &str = "gs_profile_completed";
const PLAN_COOKIE: &str = "gs_selected_plan";

/// Where a profile-completion value came from. A Confirmed value (from an
/// authoritative fetch) always overwrites; an Optimistic one (set right
/// after a successful profile submit) only holds until the next fetch.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlagSource {
    Confirmed,
    Optimistic,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct CompletionFlag {
    pub value: bool,
    pub source: FlagSource,
}

impl CompletionFlag {
    pub fn absent() -> Self {
        CompletionFlag { value: false, source: FlagSource::Confirmed }
    }

    pub fn confirmed(value: bool) -> Self {
        CompletionFlag { value, source: FlagSource::Confirmed }
    }

    pub fn optimistic_completed() -> Self {
        CompletionFlag { value: true, source: FlagSource::Optimistic }
    }

    /// Reconciliation rule: confirmed always wins.
    pub fn reconcile(self, incoming: CompletionFlag) -> CompletionFlag {
        match incoming.source {
            FlagSource::Confirmed => incoming,
            FlagSource::Optimistic => {
                if self.source == FlagSource::Confirmed && self.value {
                    // Already authoritatively complete; nothing to upgrade.
                    self
                } else {
                    incoming
                }
            }
        }
    }
}

/// Single owner of every persisted portal cookie: the backend session
/// credential, the cached identity, the profile-completion flag and the
/// pending plan selection. Components go through this store rather than
/// touching cookies directly.
pub struct SessionStore<'a> {
    cookies: &'a CookieJar<'a>,
}

impl<'a> SessionStore<'a> {
    pub fn new(cookies: &'a CookieJar<'a>) -> Self {
        SessionStore { cookies }
    }

    // Values are JSON blobs; percent-encode them so they stay legal
    // cookie values.
    fn put(&self, name: &'static str, value: String) {
        let encoded = urlencoding::encode(&value).into_owned();
        self.cookies
            .add(Cookie::build((name, encoded)).path("/").http_only(true));
    }

    fn take(&self, name: &'static str) -> Option<String> {
        self.cookies
            .get(name)
            .and_then(|c| urlencoding::decode(c.value()).ok())
            .map(|v| v.into_owned())
    }

    fn drop_cookie(&self, name: &'static str) {
        self.cookies.remove(Cookie::build(name).path("/"));
    }

    /* ----------------------------- credential ----------------------------- */

    pub fn credential(&self) -> Option<String> {
        self.take(CREDENTIAL_COOKIE)
    }

    /* ----------------------------- identity ----------------------------- */

    pub fn user(&self) -> Option<AuthUser> {
        self.take(USER_COOKIE)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    pub fn is_logged_in(&self) -> bool {
        self.user().is_some()
    }

    /// Store the identity and credential returned by a successful login.
    pub fn login(&self, user: &AuthUser, credential: Option<&str>) {
        if let Ok(raw) = serde_json::to_string(user) {
            self.put(USER_COOKIE, raw);
        }
        if let Some(credential) = credential {
            self.put(CREDENTIAL_COOKIE, credential.to_string());
        }
    }

    /// Signup stores the same state as login.
    pub fn signup(&self, user: &AuthUser, credential: Option<&str>) {
        self.login(user, credential);
    }

    /// Session probe. With a stored credential, asks the backend "who am
    /// I" and caches the answer; on any failure the cached identity is
    /// silently cleared — an expired session is not an error. The pending
    /// plan selection survives either way.
    pub async fn restore(&self, backend: &dyn BackendApi) -> Option<AuthUser> {
        let Some(credential) = self.credential() else {
            if self.user().is_some() {
                self.clear_identity();
            }
            return None;
        };

        match backend.me(&credential).await {
            Ok(probe) => {
                self.login(&probe.user, None);
                let completed = probe
                    .provider
                    .as_ref()
                    .map(|p| p.profile_completed)
                    .unwrap_or(false);
                self.set_completion(CompletionFlag::confirmed(completed));
                Some(probe.user)
            }
            Err(e) => {
                info!("session probe failed, treating as unauthenticated: {}", e);
                self.clear_identity();
                None
            }
        }
    }

    /// Attempts the backend logout, then clears all local state no matter
    /// what — at worst the remote session lingers until its cookie is
    /// rejected on next use.
    pub async fn logout(&self, backend: &dyn BackendApi) {
        if let Some(credential) = self.credential() {
            if let Err(e) = backend.logout(&credential).await {
                info!("backend logout failed, clearing local state anyway: {}", e);
            }
        }
        self.clear_all();
    }

    fn clear_identity(&self) {
        self.drop_cookie(USER_COOKIE);
        self.drop_cookie(PROFILE_COOKIE);
        self.drop_cookie(CREDENTIAL_COOKIE);
    }

    pub fn clear_all(&self) {
        self.clear_identity();
        self.drop_cookie(PLAN_COOKIE);
    }

    /* ----------------------------- profile flag ----------------------------- */

    pub fn completion(&self) -> CompletionFlag {
        self.take(PROFILE_COOKIE)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_else(CompletionFlag::absent)
    }

    pub fn is_profile_completed(&self) -> bool {
        self.completion().value
    }

    pub fn set_completion(&self, incoming: CompletionFlag) {
        let next = self.completion().reconcile(incoming);
        if let Ok(raw) = serde_json::to_string(&next) {
            self.put(PROFILE_COOKIE, raw);
        }
    }

    /* ----------------------------- plan selection ----------------------------- */

    pub fn select_plan(&self, plan: &SelectedPlan) {
        if let Ok(raw) = serde_json::to_string(plan) {
            self.put(PLAN_COOKIE, raw);
        }
    }

    pub fn selected_plan(&self) -> Option<SelectedPlan> {
        self.take(PLAN_COOKIE)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    pub fn clear_selected_plan(&self) {
        self.drop_cookie(PLAN_COOKIE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmed_always_overwrites() {
        let current = CompletionFlag::optimistic_completed();
        let next = current.reconcile(CompletionFlag::confirmed(false));
        assert_eq!(next, CompletionFlag::confirmed(false));

        let current = CompletionFlag::confirmed(false);
        let next = current.reconcile(CompletionFlag::confirmed(true));
        assert_eq!(next, CompletionFlag::confirmed(true));
    }

    #[test]
    fn optimistic_does_not_downgrade_confirmed_completion() {
        let current = CompletionFlag::confirmed(true);
        let next = current.reconcile(CompletionFlag::optimistic_completed());
        assert_eq!(next, CompletionFlag::confirmed(true));
    }

    #[test]
    fn optimistic_upgrades_incomplete_state() {
        let current = CompletionFlag::confirmed(false);
        let next = current.reconcile(CompletionFlag::optimistic_completed());
        assert_eq!(next, CompletionFlag::optimistic_completed());
    }
}
