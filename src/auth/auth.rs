use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, error::ErrorUnauthorized};
use futures::future::{Ready, ready};

/// Authenticated session context, placed in request extensions by
/// [`crate::auth::middleware::auth_middleware`].
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub session_id: String,
}

impl FromRequest for Session {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<Session>() {
            Some(session) => ready(Ok(session.clone())),
            None => ready(Err(ErrorUnauthorized("Not logged in"))),
        }
    }
}
