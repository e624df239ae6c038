//! Media Upload Tests
//!
//! Covers the multipart upload endpoint and its validation rules.

mod common;

use axum::http::StatusCode;
use common::try_app;

#[tokio::test]
async fn upload_registers_media_and_stores_the_file() {
    let Some(app) = try_app().await else { return };
    app.create_user("Uploader", "med_uploader").await;

    let resp = app
        .post_file(
            "/api/medias",
            "med_uploader",
            "picture.png",
            "image/png",
            b"not really a png, but close enough",
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    let body = resp.json();
    assert_eq!(body["result"], true);
    let media_id = body["media_id"].as_i64().unwrap();

    let (file_name, host_path): (String, String) = sqlx::query_as(
        "SELECT file_name, host_path FROM media_attachments WHERE id = $1",
    )
    .bind(media_id)
    .fetch_one(app.pool())
    .await
    .unwrap();

    assert_eq!(file_name, format!("{}_med_uploader_media.png", media_id));
    assert!(host_path.ends_with(&file_name));

    let on_disk = tokio::fs::read(format!("target/test-media/{}", file_name))
        .await
        .expect("uploaded file missing from disk");
    assert_eq!(on_disk, b"not really a png, but close enough");
}

#[tokio::test]
async fn upload_rejects_unsupported_file_type() {
    let Some(app) = try_app().await else { return };
    app.create_user("Uploader Pdf", "med_pdf").await;

    let resp = app
        .post_file(
            "/api/medias",
            "med_pdf",
            "paper.pdf",
            "application/pdf",
            b"%PDF-1.7",
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["result"], false);
}

#[tokio::test]
async fn upload_rejects_oversized_file() {
    let Some(app) = try_app().await else { return };
    app.create_user("Uploader Big", "med_big").await;

    let contents = vec![0u8; 3 * 1024 * 1024];
    let resp = app
        .post_file("/api/medias", "med_big", "huge.png", "image/png", &contents)
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_requires_known_api_key() {
    let Some(app) = try_app().await else { return };

    let resp = app
        .post_file("/api/medias", "med_nobody", "pic.png", "image/png", b"png")
        .await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}
