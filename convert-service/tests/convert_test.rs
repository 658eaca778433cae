mod common;

use axum::http::StatusCode;
use common::{rtf_part, TestApp, TEST_ORIGIN};
use reqwest::multipart;

const SAMPLE_RTF: &[u8] = br"{\rtf1\ansi Hello \b World\b0 !}";

#[tokio::test]
async fn convert_returns_html_with_footer() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    let form = multipart::Form::new().part("file", rtf_part("test.rtf", SAMPLE_RTF));

    let response = client
        .post(format!("{}/convert", app.address))
        .header("Origin", TEST_ORIGIN)
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, response.status());

    let content_type = response
        .headers()
        .get("content-type")
        .expect("Missing content-type header")
        .to_str()
        .unwrap()
        .to_string();
    assert!(
        content_type.starts_with("text/html"),
        "unexpected content type: {}",
        content_type
    );

    let cors = response
        .headers()
        .get("access-control-allow-origin")
        .expect("Missing CORS header")
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(TEST_ORIGIN, cors);

    let body = response.text().await.expect("Failed to read body");
    assert!(body.starts_with("<!DOCTYPE html>"), "no wrapper: {}", body);
    assert!(body.contains("Hello"), "missing text: {}", body);
    assert!(body.contains("<b>"), "missing bold formatting: {}", body);
    assert!(
        body.contains("<footer>Converted from: test.rtf (size: 0 KB)</footer>"),
        "missing footer: {}",
        body
    );
}

#[tokio::test]
async fn convert_is_deterministic() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let form = multipart::Form::new().part("file", rtf_part("same.rtf", SAMPLE_RTF));
        let response = client
            .post(format!("{}/convert", app.address))
            .header("Origin", TEST_ORIGIN)
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(StatusCode::OK, response.status());
        bodies.push(response.bytes().await.expect("Failed to read body"));
    }

    assert_eq!(bodies[0], bodies[1]);
}

#[tokio::test]
async fn first_matching_part_is_selected() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    // A non-matching part first, then two RTF parts: the first RTF part
    // must win, the later one must be ignored.
    let form = multipart::Form::new()
        .part(
            "notes",
            multipart::Part::bytes(b"just text".to_vec())
                .file_name("notes.txt")
                .mime_str("text/plain")
                .unwrap(),
        )
        .part("first", rtf_part("a.rtf", br"{\rtf1\ansi Alpha}"))
        .part("second", rtf_part("b.rtf", br"{\rtf1\ansi Beta}"));

    let response = client
        .post(format!("{}/convert", app.address))
        .header("Origin", TEST_ORIGIN)
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, response.status());
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Alpha"), "wrong part converted: {}", body);
    assert!(!body.contains("Beta"), "later part not ignored: {}", body);
    assert!(body.contains("Converted from: a.rtf"), "wrong footer: {}", body);
}

#[tokio::test]
async fn referer_prefix_is_accepted() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    let form = multipart::Form::new().part("file", rtf_part("test.rtf", SAMPLE_RTF));

    let response = client
        .post(format!("{}/convert", app.address))
        .header("Referer", format!("{}/tools/upload.html", TEST_ORIGIN))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, response.status());
}
