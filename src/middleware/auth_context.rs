use std::future::{ready, Ready};

use actix_web::{
    dev::Payload, error::ErrorUnauthorized, Error, FromRequest, HttpMessage, HttpRequest,
};

use crate::middleware::auth::Claims;
use crate::models::account::{UserRole, UserSession};

/// Extracts the session from claims verified by `AuthMiddleware`.
#[derive(Clone)]
pub struct AdminSession(pub UserSession);

impl FromRequest for AdminSession {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(claims) = req.extensions().get::<Claims>() {
            ready(Ok(AdminSession(UserSession::new(
                claims.user_id.clone(),
                claims.sub.clone(),
                UserRole::from_claim(claims.role.as_deref()),
                claims.exp,
            ))))
        } else {
            ready(Err(ErrorUnauthorized("User not authenticated")))
        }
    }
}
