//! Integration tests for profile updates and password changes.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use bitnbolt_admin::services::{
    ProfileImage, ProfileUpdate, ProfileUpdateError, submit_profile_update,
};
use bitnbolt_integration_tests::{
    Dashboard, FakeBackend, VALID_TOKEN, admin_json, flash, location,
};
use secrecy::SecretString;
use serde_json::json;

const IMAGE_PATH: &str = "/api/admin/profile/image";
const PROFILE_PATH: &str = "/api/admin/profile";

fn token() -> SecretString {
    SecretString::from(VALID_TOKEN)
}

fn png() -> Option<ProfileImage> {
    ProfileImage::from_upload(Some("image/png"), vec![0x89, b'P', b'N', b'G'])
}

#[tokio::test]
async fn test_image_then_name() {
    let backend = FakeBackend::start().await;
    backend.respond_ok(
        Method::POST,
        IMAGE_PATH,
        json!({ "profileImage": "https://cdn.bitnbolt.in/a1.png" }),
    );
    backend.respond_ok(Method::PUT, PROFILE_PATH, json!({}));

    let update = ProfileUpdate {
        admin_name: " Ravi Kumar ".to_string(),
        image: png(),
    };
    let updated = submit_profile_update(&backend.client(), &token(), &update)
        .await
        .unwrap();

    assert_eq!(
        updated.image_url.as_deref(),
        Some("https://cdn.bitnbolt.in/a1.png")
    );

    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path, IMAGE_PATH);
    assert_eq!(
        requests[0].body,
        json!({ "imageData": "data:image/png;base64,iVBORw==" })
    );
    assert_eq!(requests[1].path, PROFILE_PATH);
    assert_eq!(requests[1].method, Method::PUT);
    assert_eq!(requests[1].body, json!({ "admin_name": "Ravi Kumar" }));
}

#[tokio::test]
async fn test_failed_upload_stops_the_update() {
    let backend = FakeBackend::start().await;
    backend.respond(
        Method::POST,
        IMAGE_PATH,
        StatusCode::PAYLOAD_TOO_LARGE,
        json!({ "success": false, "message": "Image too large" }),
    );
    backend.respond_ok(Method::PUT, PROFILE_PATH, json!({}));

    let update = ProfileUpdate {
        admin_name: "Ravi".to_string(),
        image: png(),
    };
    let err = submit_profile_update(&backend.client(), &token(), &update)
        .await
        .unwrap_err();

    assert!(matches!(err, ProfileUpdateError::ImageUpload(_)));
    assert_eq!(err.user_message(), "Image too large");
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn test_upload_failure_without_message_uses_fallback() {
    let backend = FakeBackend::start().await;
    backend.respond(
        Method::POST,
        IMAGE_PATH,
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "success": false }),
    );

    let update = ProfileUpdate {
        admin_name: "Ravi".to_string(),
        image: png(),
    };
    let err = submit_profile_update(&backend.client(), &token(), &update)
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Failed to upload image");
}

#[tokio::test]
async fn test_name_only_update_skips_upload() {
    let backend = FakeBackend::start().await;
    backend.respond_ok(Method::PUT, PROFILE_PATH, json!({}));

    let update = ProfileUpdate {
        admin_name: "Ravi".to_string(),
        image: None,
    };
    let updated = submit_profile_update(&backend.client(), &token(), &update)
        .await
        .unwrap();

    assert!(updated.image_url.is_none());
    assert!(backend.requests_to(IMAGE_PATH).is_empty());
    assert_eq!(backend.requests_to(PROFILE_PATH).len(), 1);
}

#[tokio::test]
async fn test_blank_name_sends_nothing() {
    let backend = FakeBackend::start().await;

    let update = ProfileUpdate {
        admin_name: "   ".to_string(),
        image: png(),
    };
    let err = submit_profile_update(&backend.client(), &token(), &update)
        .await
        .unwrap_err();

    assert!(matches!(err, ProfileUpdateError::Validation(_)));
    assert!(backend.requests().is_empty());
}

// =============================================================================
// Dashboard pages
// =============================================================================

async fn signed_in(backend: &FakeBackend) -> Dashboard {
    let dashboard = Dashboard::spawn(backend).await;
    dashboard
        .sign_in(backend, &admin_json("a1", "Ravi Kumar", "admin"))
        .await;
    dashboard
}

#[tokio::test]
async fn test_profile_page_shows_details() {
    let backend = FakeBackend::start().await;
    let dashboard = signed_in(&backend).await;

    let response = dashboard.get("/profile").await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let html = response.text().await.unwrap();

    assert!(html.contains("a1@bitnbolt.in"));
    assert!(html.contains(r#"value="Ravi Kumar""#));
    assert!(html.contains("Member since"));
}

#[tokio::test]
async fn test_multipart_profile_submission() {
    let backend = FakeBackend::start().await;
    backend.respond_ok(Method::POST, IMAGE_PATH, json!({}));
    backend.respond_ok(Method::PUT, PROFILE_PATH, json!({}));
    let dashboard = signed_in(&backend).await;

    let form = reqwest::multipart::Form::new()
        .text("admin_name", "Ravi K")
        .part(
            "image",
            reqwest::multipart::Part::bytes(vec![0x89, b'P', b'N', b'G'])
                .file_name("me.png")
                .mime_str("image/png")
                .unwrap(),
        );
    let response = dashboard
        .client
        .post(dashboard.url("/profile"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(
        flash(&response, "success").as_deref(),
        Some("Profile updated successfully!")
    );
    assert_eq!(
        backend.requests_to(IMAGE_PATH)[0].body["imageData"],
        "data:image/png;base64,iVBORw=="
    );
    assert_eq!(
        backend.requests_to(PROFILE_PATH)[0].body,
        json!({ "admin_name": "Ravi K" })
    );
}

#[tokio::test]
async fn test_short_new_password_sends_nothing() {
    let backend = FakeBackend::start().await;
    let dashboard = signed_in(&backend).await;

    let response = dashboard
        .post_form(
            "/profile/password",
            &[
                ("current_password", "old-secret"),
                ("new_password", "abc"),
                ("confirm_password", "abc"),
            ],
        )
        .await;

    assert!(location(&response).starts_with("/profile?error="));
    assert_eq!(
        flash(&response, "error").as_deref(),
        Some("New password must be at least 6 characters long")
    );
    assert!(backend.requests_to(PROFILE_PATH).is_empty());
}

#[tokio::test]
async fn test_password_change_sends_both_passwords() {
    let backend = FakeBackend::start().await;
    backend.respond_ok(Method::PUT, PROFILE_PATH, json!({}));
    let dashboard = signed_in(&backend).await;

    let response = dashboard
        .post_form(
            "/profile/password",
            &[
                ("current_password", "old-secret"),
                ("new_password", "new-secret"),
                ("confirm_password", "new-secret"),
            ],
        )
        .await;

    assert_eq!(
        flash(&response, "success").as_deref(),
        Some("Password changed successfully!")
    );
    assert_eq!(
        backend.requests_to(PROFILE_PATH)[0].body,
        json!({ "currentPassword": "old-secret", "newPassword": "new-secret" })
    );
}

#[tokio::test]
async fn test_wrong_current_password_message() {
    let backend = FakeBackend::start().await;
    backend.respond(
        Method::PUT,
        PROFILE_PATH,
        StatusCode::BAD_REQUEST,
        json!({ "success": false, "message": "Current password is incorrect" }),
    );
    let dashboard = signed_in(&backend).await;

    let response = dashboard
        .post_form(
            "/profile/password",
            &[
                ("current_password", "wrong"),
                ("new_password", "new-secret"),
                ("confirm_password", "new-secret"),
            ],
        )
        .await;

    assert_eq!(
        flash(&response, "error").as_deref(),
        Some("Current password is incorrect")
    );
}
