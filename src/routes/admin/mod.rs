use actix_web::web;

use crate::middleware::auth::AuthMiddleware;
use crate::middleware::role_auth::RequireRole;
use crate::models::account::UserRole;

pub mod pricing_audit;
pub mod session;

pub fn config(cfg: &mut web::ServiceConfig) {
    // The last `wrap` runs first: tokens are verified before the role check.
    cfg.service(
        web::scope("/admin")
            .wrap(RequireRole::new(UserRole::Admin))
            .wrap(AuthMiddleware)
            .route("/session", web::get().to(session::current))
            .route("/pricing-audit", web::get().to(pricing_audit::get_all)),
    );
}
