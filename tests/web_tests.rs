//! Tests for the HTML form routes.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use scholarsift::feed::mock::{make_paper, MockFeed};
use scholarsift::web::{create_router, AppState};
use scholarsift::ExportWriter;
use std::sync::Arc;
use tower::ServiceExt;

fn app(feed: Arc<MockFeed>, dir: &std::path::Path) -> (Router, AppState) {
    let writer = ExportWriter::new(dir.join("outputs")).with_log_file(dir.join("export_log.json"));
    let state = AppState::new(feed, writer);
    (create_router(state.clone()), state)
}

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_index_shows_search_form() {
    let dir = tempfile::tempdir().unwrap();
    let (router, _) = app(Arc::new(MockFeed::new()), dir.path());

    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("action=\"/search\""));
    assert!(!html.contains("action=\"/export\""));
}

#[tokio::test]
async fn test_search_reveals_export_controls() {
    let dir = tempfile::tempdir().unwrap();
    let feed = Arc::new(MockFeed::with_papers((1..=4).map(make_paper).collect()));
    let (router, state) = app(feed.clone(), dir.path());

    let response = router
        .oneshot(form("/search", "query=graph+neural+networks&max_results=3"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("ScholarSift results (query: graph neural networks)"));
    assert!(html.contains("Paper number 3"));
    assert!(!html.contains("Paper number 4"));
    assert!(html.contains(r#"<option value="PDF" selected>PDF</option>"#));
    assert_eq!(state.session.len(), 3);
    assert_eq!(feed.requests(), vec![("graph neural networks".to_string(), 3)]);
}

#[tokio::test]
async fn test_search_clamps_result_count() {
    let dir = tempfile::tempdir().unwrap();
    let feed = Arc::new(MockFeed::with_papers((1..=20).map(make_paper).collect()));
    let (router, _) = app(feed.clone(), dir.path());

    router
        .clone()
        .oneshot(form("/search", "query=a&max_results=50"))
        .await
        .unwrap();
    router
        .oneshot(form("/search", "query=b&max_results=0"))
        .await
        .unwrap();

    assert_eq!(
        feed.requests(),
        vec![("a".to_string(), 10), ("b".to_string(), 1)]
    );
}

#[tokio::test]
async fn test_no_matches_hides_export_controls() {
    let dir = tempfile::tempdir().unwrap();
    let (router, state) = app(Arc::new(MockFeed::new()), dir.path());

    let html = body_text(
        router
            .oneshot(form("/search", "query=zzzznomatch&max_results=5"))
            .await
            .unwrap(),
    )
    .await;

    assert!(html.contains("No matching papers found."));
    assert!(!html.contains("action=\"/export\""));
    assert!(state.session.is_empty());
}

#[tokio::test]
async fn test_failed_search_keeps_earlier_results_exportable() {
    let dir = tempfile::tempdir().unwrap();
    let feed = Arc::new(MockFeed::with_papers(vec![make_paper(1), make_paper(2)]));
    let (router, state) = app(feed.clone(), dir.path());

    router
        .clone()
        .oneshot(form("/search", "query=first&max_results=2"))
        .await
        .unwrap();

    feed.fail_with_status(503);
    let html = body_text(
        router
            .clone()
            .oneshot(form("/search", "query=second&max_results=2"))
            .await
            .unwrap(),
    )
    .await;

    assert!(html.contains("Could not reach arXiv"));
    assert!(html.contains("action=\"/export\""));
    assert_eq!(state.session.len(), 2);
    assert_eq!(state.session.query_info().unwrap().query, "first");

    let html = body_text(router.oneshot(form("/export", "format=Excel")).await.unwrap()).await;
    assert!(html.contains(r#"href="/files/scholarsift_export.xlsx""#));
}

#[tokio::test]
async fn test_export_then_download() {
    let dir = tempfile::tempdir().unwrap();
    let feed = Arc::new(MockFeed::with_papers(vec![make_paper(1), make_paper(2)]));
    let (router, _) = app(feed, dir.path());

    router
        .clone()
        .oneshot(form("/search", "query=llm&max_results=2"))
        .await
        .unwrap();

    let response = router
        .clone()
        .oneshot(form("/export", "format=Text"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"href="/files/scholarsift_export.txt""#));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/files/scholarsift_export.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    let text = body_text(response).await;
    assert!(text.starts_with("ScholarSift Paper Export Report"));
    assert!(text.contains("Paper number 2"));
}

#[tokio::test]
async fn test_export_with_empty_session() {
    let dir = tempfile::tempdir().unwrap();
    let (router, _) = app(Arc::new(MockFeed::new()), dir.path());

    let html = body_text(
        router
            .oneshot(form("/export", "format=PDF"))
            .await
            .unwrap(),
    )
    .await;

    assert!(html.contains("Nothing was exported as PDF."));
    assert!(!html.contains("/files/"));
    assert!(!dir.path().join("outputs").exists());
}

#[tokio::test]
async fn test_export_rejects_unknown_format() {
    let dir = tempfile::tempdir().unwrap();
    let (router, _) = app(Arc::new(MockFeed::new()), dir.path());

    let response = router
        .oneshot(form("/export", "format=csv"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("csv"));
}

#[tokio::test]
async fn test_download_only_serves_export_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("outputs")).unwrap();
    std::fs::write(dir.path().join("outputs").join("secret.txt"), "nope").unwrap();
    let (router, _) = app(Arc::new(MockFeed::new()), dir.path());

    for uri in [
        "/files/secret.txt",
        "/files/..%2Fexport_log.json",
        "/files/scholarsift_export.pdf",
    ] {
        let response = router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}
