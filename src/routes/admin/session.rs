use actix_web::{HttpResponse, Responder};

use crate::middleware::auth_context::AdminSession;
use crate::models::catalog::ApiEnvelope;

/*
    /api/admin/session
*/
pub async fn current(user: AdminSession) -> impl Responder {
    HttpResponse::Ok().json(ApiEnvelope::ok(user.0))
}
