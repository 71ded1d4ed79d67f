//! End-to-end page requests through the HTTP front end.

use axum::http::{header, StatusCode};

mod common;

#[tokio::test]
async fn test_query_string_page() {
    let router = common::board(false, Some("http://kb.test"));
    let response = common::get(router, "/?a=kill_detail&id=45&unlimited&akey=k1").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let html = common::body_text(response).await;
    assert!(html.contains("<title>Test Board - kill_detail</title>"));
    assert!(html.contains("<dt class=\"query\">id</dt><dd>45</dd>"));
    assert!(html.contains("<dt class=\"query\">unlimited</dt><dd></dd>"));
    // links carry the session key the request came with
    assert!(html.contains("href=\"http://kb.test/?a=awards&amp;akey=k1\""));
}

#[tokio::test]
async fn test_path_info_page() {
    let router = common::board(true, Some("http://kb.test"));
    let response = common::get(router, "/index.php/kill_detail/45/unlimited/?akey=k2").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = common::body_text(response).await;
    assert!(html.contains("<h2>kill_detail</h2>"));
    assert!(html.contains("<dt class=\"path\">45</dt><dd></dd>"));
    assert!(html.contains("<dt class=\"path\">unlimited</dt><dd></dd>"));
    assert!(html.contains("href=\"http://kb.test/index.php/losses/?akey=k2\""));
}

#[tokio::test]
async fn test_index_and_empty_requests_show_home() {
    for target in ["/", "/index.php/index/", "/?a=index"] {
        let router = common::board(true, None);
        let html = common::body_text(common::get(router, target).await).await;
        assert!(html.contains("<h2>home</h2>"), "{target}");
    }
}

#[tokio::test]
async fn test_stale_link_redirects() {
    let router = common::board(true, Some("http://kb.test"));
    let response = common::get(router, "/index.php/kill_detail/?a=kill_detail&id=45").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "http://kb.test/?a=kill_detail&id=45"
    );
    assert!(common::body_text(response).await.is_empty());
}

#[tokio::test]
async fn test_fallback_host_from_request() {
    let router = common::board(false, None);
    let html = common::body_text(common::get(router, "/?a=awards&akey=k3").await).await;
    assert!(html.contains("href=\"http://kb.test/index.php?a=kills&amp;akey=k3\""));
}

#[tokio::test]
async fn test_health() {
    let router = common::board(false, None);
    let response = common::get(router, "/healthz").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_text(response).await, "ok");
}

#[tokio::test]
async fn test_rewritten_index_path() {
    let router = common::board(true, Some("http://kb.test"));
    let html = common::body_text(common::get(router, "/index/kill_detail/45/unlimited").await).await;
    assert!(html.contains("<h2>kill_detail</h2>"));
    assert!(html.contains("<dt class=\"path\">45</dt>"));
}
