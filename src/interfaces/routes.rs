use actix_web::web;

use crate::handlers::{assets::serve_asset, contact::contact_endpoint, system::health_check};

/// The whole HTTP surface: two API routes and a catch-all that proxies the
/// asset store. Unknown `/api/*` paths intentionally fall through to the
/// asset router, which passes the store's 404 along without SPA fallback.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/health").to(health_check));
    cfg.service(web::resource("/api/contact").to(contact_endpoint));
    cfg.default_service(web::to(serve_asset));
}
