use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};

use crate::{assets::store::StoredAsset, utils::mime::mime_for_path, AppState};

const SPA_INDEX_PATH: &str = "/index.html";
const HTML_CONTENT_TYPE: &str = "text/html;charset=UTF-8";
const API_PREFIX: &str = "/api/";

/// Default service: everything that is not an API route is looked up in the
/// external asset store, with SPA fallback on extensionless 404s and MIME
/// backfill when the store omits Content-Type.
pub async fn serve_asset(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let path = req.path();

    let asset = match state.assets.fetch(path).await {
        Ok(asset) => asset,
        Err(e) => {
            tracing::error!("Asset store fetch failed for {}: {}", path, e);
            return HttpResponse::BadGateway()
                .json(serde_json::json!({ "error": "Upstream asset store unavailable" }));
        }
    };

    if asset.status == 404 {
        if is_spa_route(path) {
            match state.assets.fetch(SPA_INDEX_PATH).await {
                Ok(mut index) if index.status == 200 => {
                    index.set_content_type(HTML_CONTENT_TYPE);
                    return to_http_response(index);
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("SPA fallback fetch failed: {}", e);
                }
            }
        }
        // Real missing asset: the store's 404 passes through untouched.
        return to_http_response(asset);
    }

    let mut asset = asset;
    if asset.content_type().is_none() {
        if let Some(content_type) = resolve_content_type(path) {
            asset.set_content_type(content_type);
        }
    }
    to_http_response(asset)
}

fn last_segment(path: &str) -> &str {
    path.split('/').filter(|s| !s.is_empty()).next_back().unwrap_or("")
}

/// Client-side routes have no file extension and never live under the API
/// prefix.
fn is_spa_route(path: &str) -> bool {
    !last_segment(path).contains('.') && !path.starts_with(API_PREFIX)
}

fn resolve_content_type(path: &str) -> Option<&'static str> {
    if let Some(mime) = mime_for_path(path) {
        return Some(mime);
    }
    let segment = last_segment(path);
    let extensionless = !segment.is_empty() && !segment.contains('.');
    if path == "/" || extensionless {
        return Some(HTML_CONTENT_TYPE);
    }
    None
}

fn to_http_response(asset: StoredAsset) -> HttpResponse {
    let status = StatusCode::from_u16(asset.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut builder = HttpResponse::build(status);
    for (name, value) in &asset.headers {
        builder.insert_header((name.as_str(), value.as_str()));
    }
    builder.body(asset.body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensionless_paths_outside_api_are_spa_routes() {
        assert!(is_spa_route("/dashboard"));
        assert!(is_spa_route("/docs/getting-started"));
        assert!(is_spa_route("/"));
    }

    #[test]
    fn asset_paths_and_api_paths_are_not_spa_routes() {
        assert!(!is_spa_route("/missing.png"));
        assert!(!is_spa_route("/api/unknown"));
    }

    #[test]
    fn root_and_extensionless_paths_default_to_html() {
        assert_eq!(resolve_content_type("/"), Some(HTML_CONTENT_TYPE));
        assert_eq!(resolve_content_type("/pricing"), Some(HTML_CONTENT_TYPE));
    }

    #[test]
    fn known_extensions_resolve_and_unknown_ones_pass_through() {
        assert_eq!(resolve_content_type("/app.css"), Some("text/css;charset=UTF-8"));
        assert_eq!(resolve_content_type("/data.blob"), None);
    }
}
