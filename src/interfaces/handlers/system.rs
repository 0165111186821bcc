use actix_web::{HttpResponse, Responder};

/// Liveness probe. Fixed body, no async work, so the hosting platform can
/// poll it cheaply.
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
