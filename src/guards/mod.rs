use rocket::http::Status;
use rocket::request::{self, FromRequest, Outcome, Request};

use crate::models::AuthUser;
use crate::session::SessionStore;

/// Cookie-backed session guard. Forwards when no session is cached so a
/// lower-ranked route can bounce the visitor to the landing page; the
/// backend still gets the final say when the credential is replayed.
pub struct SessionGuard {
    pub user: AuthUser,
    pub credential: String,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SessionGuard {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let store = SessionStore::new(req.cookies());
        match (store.user(), store.credential()) {
            (Some(user), Some(credential)) => Outcome::Success(SessionGuard { user, credential }),
            _ => Outcome::Forward(Status::Unauthorized),
        }
    }
}
