// SPDX-License-Identifier: MPL-2.0
mod common;

use common::{closed_port_url, png_bytes, MockResponse, MockServer};
use iced_colorizer::media::SourceFile;
use iced_colorizer::service::{
    ColorizeClient, ColorizeError, ServiceHealth, UploadPayload, GENERIC_MIME,
};
use std::path::PathBuf;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(10);

fn payload(name: &str) -> UploadPayload {
    let source = SourceFile::from_bytes(PathBuf::from(name), png_bytes(3, 2, [40, 40, 40, 255]))
        .expect("png source");
    UploadPayload::from(&source)
}

#[tokio::test]
async fn colorize_posts_single_file_field() {
    let colored = png_bytes(3, 2, [200, 120, 40, 255]);
    let mut server = MockServer::start(vec![MockResponse::image(colored.clone())]).await;
    let client = ColorizeClient::new(&server.url, TIMEOUT).expect("client");

    let body = client.colorize(payload("cat.jpg")).await.expect("colorize");
    assert_eq!(body.as_slice(), colored.as_slice());

    let request = server.next_request().await;
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/colorize");
    assert!(request
        .head
        .to_ascii_lowercase()
        .contains("content-type: multipart/form-data"));

    let text = request.body_text();
    assert_eq!(text.matches("Content-Disposition").count(), 1, "{text}");
    assert!(text.contains("name=\"file\""), "{text}");
    assert!(text.contains("filename=\"cat.jpg\""), "{text}");
    assert!(text.contains("image/png"), "{text}");
}

#[tokio::test]
async fn non_success_status_is_reported_with_code() {
    let server = MockServer::start(vec![MockResponse::status(500)]).await;
    let client = ColorizeClient::new(&server.url, TIMEOUT).expect("client");

    let err = client.colorize(payload("dog.png")).await.unwrap_err();
    assert_eq!(err, ColorizeError::Status(500));
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let url = closed_port_url().await;
    let client = ColorizeClient::new(&url, TIMEOUT).expect("client");

    let err = client.colorize(payload("dog.png")).await.unwrap_err();
    assert!(matches!(err, ColorizeError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start(vec![
        MockResponse::image(png_bytes(1, 1, [0, 0, 0, 255])).delayed(Duration::from_secs(3))
    ])
    .await;
    let client = ColorizeClient::new(&server.url, Duration::from_millis(300)).expect("client");

    let err = client.colorize(payload("cat.jpg")).await.unwrap_err();
    assert_eq!(err, ColorizeError::Timeout);
}

#[tokio::test]
async fn upload_uses_its_own_field_and_parses_filename() {
    let mut server = MockServer::start(vec![MockResponse::json(
        r#"{"filename": "a1b2-cat.jpg", "size": 123}"#,
    )])
    .await;
    let client = ColorizeClient::new(&server.url, TIMEOUT).expect("client");

    let receipt = client.upload(payload("cat.jpg")).await.expect("upload");
    assert_eq!(receipt.filename, "a1b2-cat.jpg");

    let request = server.next_request().await;
    assert_eq!(request.path, "/upload");
    let text = request.body_text();
    assert!(text.contains("name=\"uploaded_file\""), "{text}");
    assert!(!text.contains("name=\"file\""), "{text}");
}

#[tokio::test]
async fn upload_sends_non_image_files_as_is() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("report.pdf");
    std::fs::write(&path, b"%PDF-1.4 data").expect("write pdf");

    let mut server = MockServer::start(vec![MockResponse::json(r#"{"filename": "report.pdf"}"#)])
        .await;
    let client = ColorizeClient::new(&server.url, TIMEOUT).expect("client");

    let payload = UploadPayload::read(&path).expect("raw payload");
    let receipt = client.upload(payload).await.expect("upload");
    assert_eq!(receipt.filename, "report.pdf");

    let request = server.next_request().await;
    assert_eq!(request.path, "/upload");
    let text = request.body_text();
    assert!(text.contains("name=\"uploaded_file\""), "{text}");
    assert!(text.contains("filename=\"report.pdf\""), "{text}");
    assert!(text.contains(GENERIC_MIME), "{text}");
    assert!(text.contains("%PDF-1.4 data"), "{text}");
}

#[tokio::test]
async fn upload_without_filename_is_invalid_response() {
    let server = MockServer::start(vec![MockResponse::json(r#"{"ok": true}"#)]).await;
    let client = ColorizeClient::new(&server.url, TIMEOUT).expect("client");

    let err = client.upload(payload("cat.jpg")).await.unwrap_err();
    assert!(matches!(err, ColorizeError::InvalidResponse(_)), "got {err:?}");
}

#[tokio::test]
async fn health_reports_model_state() {
    let mut server = MockServer::start(vec![
        MockResponse::json(r#"{"status": "healthy", "model_loaded": true}"#),
        MockResponse::json(r#"{"status": "starting", "model_loaded": false}"#),
    ])
    .await;
    let client = ColorizeClient::new(&server.url, TIMEOUT).expect("client");

    let first = client.health().await;
    assert_eq!(ServiceHealth::from_result(&first), ServiceHealth::Online);
    assert_eq!(server.next_request().await.path, "/health");

    let second = client.health().await;
    assert_eq!(
        ServiceHealth::from_result(&second),
        ServiceHealth::ModelNotLoaded
    );
}

#[tokio::test]
async fn unreachable_health_is_offline() {
    let client = ColorizeClient::new(&closed_port_url().await, TIMEOUT).expect("client");
    let result = client.health().await;
    assert_eq!(ServiceHealth::from_result(&result), ServiceHealth::Offline);
}
