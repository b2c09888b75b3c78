//! Integration tests for the image upload API.

mod common;

use std::io::Cursor;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use image::{DynamicImage, ImageFormat};
use tower::ServiceExt;

use common::{response_json, test_app};

const BOUNDARY: &str = "ziner-test-boundary";

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        width,
        height,
        image::Rgba([30, 60, 90, 255]),
    ));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("encode png");
    buf
}

/// Hand-rolled multipart body with one file part per entry.
fn multipart_body(files: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (filename, content_type, bytes) in files {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(path: &str, files: &[(&str, &str, &[u8])]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(files)))
        .expect("request")
}

#[tokio::test]
async fn test_upload_returns_three_variants() {
    let (app, dir) = test_app();

    let png = png_bytes(64, 64);
    let response = app
        .clone()
        .oneshot(multipart_request("/images", &[("photo.png", "image/png", &png)]))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response_json(response).await;
    let id = body["id"].as_str().expect("id");
    assert!(id.starts_with("img_"));
    for variant in ["original", "display", "thumbnail"] {
        let entry = &body["variants"][variant];
        assert_eq!(entry["width"], 64);
        assert_eq!(entry["height"], 64);
        assert!(entry["url"].as_str().expect("url").starts_with("/uploads/"));
        assert!(entry["size"].as_u64().expect("size") > 0);
    }

    // Variants really are on disk where /uploads serves from
    let image_dir = dir.path().join("uploads/images").join(id);
    assert!(image_dir.join("original.png").exists());
    assert!(image_dir.join("thumbnail.png").exists());
}

#[tokio::test]
async fn test_upload_without_file_is_400() {
    let (app, _dir) = test_app();

    let response = app
        .clone()
        .oneshot(multipart_request("/images", &[]))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_unsupported_type_is_415() {
    let (app, _dir) = test_app();

    let response = app
        .clone()
        .oneshot(multipart_request(
            "/images",
            &[("vector.svg", "image/svg+xml", b"<svg/>")],
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_batch_upload_reports_partial_success() {
    let (app, _dir) = test_app();

    let good = png_bytes(32, 32);
    let response = app
        .clone()
        .oneshot(multipart_request(
            "/images/batch",
            &[
                ("good.png", "image/png", &good),
                ("broken.jpg", "image/jpeg", b"not an image"),
            ],
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["uploaded"].as_array().expect("uploaded").len(), 1);
    let errors = body["errors"].as_array().expect("errors");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["filename"], "broken.jpg");
    assert!(errors[0]["error"].as_str().expect("error").contains("decode"));
}

#[tokio::test]
async fn test_delete_image_removes_variants() {
    let (app, dir) = test_app();

    let png = png_bytes(16, 16);
    let response = app
        .clone()
        .oneshot(multipart_request("/images", &[("a.png", "image/png", &png)]))
        .await
        .expect("response");
    let body = response_json(response).await;
    let id = body["id"].as_str().expect("id").to_string();

    let response = app
        .clone()
        .oneshot(common::empty_request("DELETE", &format!("/images/{id}")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!dir.path().join("uploads/images").join(&id).exists());
}
