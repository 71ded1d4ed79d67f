//! Shared utilities for integration tests.

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use tower::ServiceExt;

use killboard_core::config::KillboardConfig;
use killboard_core::http::HttpServer;

/// Router for a board served at `http://kb.test`.
pub fn board(path_info: bool, kb_host: Option<&str>) -> Router {
    let mut config = KillboardConfig::default();
    config.site.path_info = path_info;
    config.site.kb_host = kb_host.map(str::to_string);
    config.site.title = "Test Board".to_string();
    HttpServer::new(config).router()
}

/// Send a GET for `target` with `Host: kb.test`.
pub async fn get(router: Router, target: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(target)
        .header(header::HOST, "kb.test")
        .body(Body::empty())
        .unwrap();
    router.oneshot(request).await.unwrap()
}

/// Collect a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
