use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use super::test_utils::*;
use crate::advisor::{DEFAULT_SEARCH_RESULTS, DEFAULT_TEMPERATURE, MISSING_FIELDS_WARNING};
use crate::web::render::BUSY_MESSAGE;
use crate::web::{router, AppState};

fn app(runner: Arc<FakeRunner>) -> Router {
    router(Arc::new(AppState { runner }))
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
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

/// Decoded body of the download link in a rendered page.
fn download_payload(html: &str) -> String {
    let prefix = "href=\"data:text/markdown;charset=utf-8,";
    let start = html.find(prefix).unwrap() + prefix.len();
    let end = start + html[start..].find('"').unwrap();
    urlencoding::decode(&html[start..end]).unwrap().into_owned()
}

const FULL_FORM: &str = "crop_name=Wheat&location=Punjab&symptoms=Yellow+leaves&soil_info=&temperature=3.0&search_results=5";

#[tokio::test]
async fn test_index_renders_form() {
    let response = app(FakeRunner::succeeding("unused"))
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"name="crop_name""#));
    assert!(html.contains(r#"name="temperature""#));
    assert!(html.contains(r#"name="search_results""#));
    assert!(html.contains("Get Smart Advice"));
    assert!(html.contains(&format!(r#"<p id="busy" class="busy" hidden>{}</p>"#, BUSY_MESSAGE)));
    assert!(html.contains("querySelector('button').disabled = true"));
}

#[tokio::test]
async fn test_missing_fields_block_the_run() {
    let runner = FakeRunner::succeeding("unused");
    let response = app(runner.clone())
        .oneshot(form_post("/advice", "crop_name=Wheat&location=&symptoms=Yellow+leaves"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(MISSING_FIELDS_WARNING));
    assert!(!html.contains("Smart Crop Advice</h2>"));
    assert_eq!(runner.calls(), 0);
}

#[tokio::test]
async fn test_successful_run_shows_and_offers_raw_result() {
    let raw = "## Diagnosis\n\nStripe rust. Apply \"triazole\" & irrigate.";
    let runner = FakeRunner::succeeding(raw);
    let response = app(runner.clone())
        .oneshot(form_post("/advice", FULL_FORM))
        .await
        .unwrap();

    let html = body_text(response).await;
    assert_eq!(runner.calls(), 1);
    let submitted = runner.last_request().unwrap();
    assert_eq!(submitted.crop_name, "Wheat");
    assert_eq!(submitted.effective_temperature(), 2.0);
    assert_eq!(submitted.effective_search_results(), 5);

    assert!(html.contains("<h2>Smart Crop Advice</h2>"));
    assert!(html.contains("<h2>Diagnosis</h2>"));
    assert!(html.contains(r#"download="wheat_crop_advice.md""#));
    assert_eq!(download_payload(&html), raw);
    assert!(!html.contains("An error occurred"));
}

#[tokio::test]
async fn test_failed_run_shows_only_the_error() {
    let runner = FakeRunner::failing("invalid api key");
    let response = app(runner.clone())
        .oneshot(form_post("/advice", FULL_FORM))
        .await
        .unwrap();

    let html = body_text(response).await;
    assert_eq!(runner.calls(), 1);
    assert!(html.contains("An error occurred: invalid api key"));
    assert!(!html.contains("Smart Crop Advice</h2>"));
    assert!(!html.contains("Download Advice"));
}

#[tokio::test]
async fn test_download_link_keeps_line_endings() {
    let raw = "# Advice\n\nWater weekly.\n- Mulch <beds>\r\n- 50% shade";
    let response = app(FakeRunner::succeeding(raw))
        .oneshot(form_post("/advice", FULL_FORM))
        .await
        .unwrap();

    let html = body_text(response).await;
    assert_eq!(download_payload(&html).as_bytes(), raw.as_bytes());
}

#[tokio::test]
async fn test_server_has_no_download_route() {
    let response = app(FakeRunner::succeeding("unused"))
        .oneshot(form_post("/download", "filename=x.md&content=forged"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_out_of_range_sliders_are_clamped() {
    let runner = FakeRunner::succeeding("advice");
    let response = app(runner.clone())
        .oneshot(form_post(
            "/advice",
            "crop_name=Rice&location=Bihar&symptoms=Wilting&temperature=-1&search_results=-3",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(runner.calls(), 1);
    let submitted = runner.last_request().unwrap();
    assert_eq!(submitted.effective_temperature(), 0.1);
    assert_eq!(submitted.effective_search_results(), 1);
}

#[tokio::test]
async fn test_unparseable_sliders_fall_back_to_defaults() {
    let runner = FakeRunner::succeeding("advice");
    let response = app(runner.clone())
        .oneshot(form_post(
            "/advice",
            "crop_name=Rice&location=Bihar&symptoms=Wilting&temperature=&search_results=many",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let submitted = runner.last_request().unwrap();
    assert_eq!(submitted.effective_temperature(), DEFAULT_TEMPERATURE);
    assert_eq!(submitted.effective_search_results(), DEFAULT_SEARCH_RESULTS);
}

#[tokio::test]
async fn test_fractional_result_count_is_rounded() {
    let runner = FakeRunner::succeeding("advice");
    app(runner.clone())
        .oneshot(form_post(
            "/advice",
            "crop_name=Rice&location=Bihar&symptoms=Wilting&search_results=7.5",
        ))
        .await
        .unwrap();

    assert_eq!(runner.last_request().unwrap().effective_search_results(), 8);
}

#[tokio::test]
async fn test_health() {
    let response = app(FakeRunner::succeeding("unused"))
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_text(response).await, "ok");
}
