
use std::sync::Arc;

use actix_web::{http::StatusCode, test, App};
use lornu_gateway::{assets::store::AssetStore, routes::configure_routes};
use test_utils::{app_state, ok_asset, test_config, MockMailer, StubAssetStore, UnreachableAssetStore};

async fn spawn_app(
    assets: Arc<dyn AssetStore>,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    let state = app_state(assets, Arc::new(MockMailer::new()), None, test_config());
    test::init_service(App::new().app_data(state).configure(configure_routes)).await
}

#[actix_web::test]
async fn health_check_responds_without_touching_the_store() {
    let app = spawn_app(Arc::new(UnreachableAssetStore)).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({ "status": "ok" }));
}

#[actix_web::test]
async fn missing_content_type_is_backfilled_from_extension() {
    let store = StubAssetStore::new().with_asset("/app.css", ok_asset("body{}", None));
    let app = spawn_app(Arc::new(store)).await;

    let req = test::TestRequest::get().uri("/app.css").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "text/css;charset=UTF-8"
    );
}

#[actix_web::test]
async fn present_content_type_passes_through_unmodified() {
    let store = StubAssetStore::new().with_asset(
        "/logo.svg",
        ok_asset("<svg/>", Some("image/svg+xml;charset=utf-8")),
    );
    let app = spawn_app(Arc::new(store)).await;

    let req = test::TestRequest::get().uri("/logo.svg").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "image/svg+xml;charset=utf-8"
    );
}

#[actix_web::test]
async fn root_path_without_content_type_defaults_to_html() {
    let store = StubAssetStore::new().with_asset("/", ok_asset("<html></html>", None));
    let app = spawn_app(Arc::new(store)).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "text/html;charset=UTF-8"
    );
}

#[actix_web::test]
async fn extensionless_404_falls_back_to_index_html() {
    let store =
        StubAssetStore::new().with_asset("/index.html", ok_asset("<html>spa</html>", None));
    let app = spawn_app(Arc::new(store)).await;

    let req = test::TestRequest::get().uri("/dashboard").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "text/html;charset=UTF-8"
    );
    let body = test::read_body(resp).await;
    assert_eq!(body, "<html>spa</html>");
}

#[actix_web::test]
async fn missing_asset_with_extension_stays_404() {
    let store =
        StubAssetStore::new().with_asset("/index.html", ok_asset("<html>spa</html>", None));
    let app = spawn_app(Arc::new(store)).await;

    let req = test::TestRequest::get().uri("/missing.png").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn unknown_api_path_is_not_rewritten_to_index() {
    let store =
        StubAssetStore::new().with_asset("/index.html", ok_asset("<html>spa</html>", None));
    let app = spawn_app(Arc::new(store)).await;

    let req = test::TestRequest::get().uri("/api/unknown").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn fallback_without_index_returns_original_404() {
    let app = spawn_app(Arc::new(StubAssetStore::new())).await;

    let req = test::TestRequest::get().uri("/dashboard").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn unreachable_store_returns_502() {
    let app = spawn_app(Arc::new(UnreachableAssetStore)).await;

    let req = test::TestRequest::get().uri("/anything").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Upstream asset store unavailable");
}
