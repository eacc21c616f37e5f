//! HTTP-level tests for image upload and serving.

mod common;

use axum::http::StatusCode;
use common::{body_bytes, body_json, build_test_app_with_media, get, post_multipart};
use sqlx::PgPool;

/// Smallest well-formed PNG header the format sniffer recognises.
const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
];

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_then_serve(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();

    let response = post_multipart(
        build_test_app_with_media(pool.clone(), media.path()),
        "/api/v1/media",
        &[
            ("namespace", None, &b"menu"[..]),
            ("file", Some("photo.png"), PNG_BYTES),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let key = json["data"]["key"].as_str().unwrap().to_string();
    assert!(key.starts_with("menu/") && key.ends_with(".png"), "{key}");
    assert_eq!(json["data"]["content_type"], "image/png");
    assert_eq!(json["data"]["size_bytes"], PNG_BYTES.len());

    let response = get(
        build_test_app_with_media(pool, media.path()),
        &format!("/media/{key}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/png");
    assert_eq!(body_bytes(response).await, PNG_BYTES);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_rejects_non_images(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();

    let response = post_multipart(
        build_test_app_with_media(pool, media.path()),
        "/api/v1/media",
        &[("file", Some("notes.txt"), &b"hello, not an image"[..])],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_without_file_field_is_bad_request(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();

    let response = post_multipart(
        build_test_app_with_media(pool, media.path()),
        "/api/v1/media",
        &[("namespace", None, &b"restaurant"[..])],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_media_key_returns_404(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();

    let response = get(
        build_test_app_with_media(pool, media.path()),
        "/media/restaurant/missing.png",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
