//! Integration test harness for the BitnBolt admin dashboard.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bitnbolt-integration-tests
//! ```
//!
//! Nothing external is needed: [`FakeBackend`] is an in-process axum server
//! standing in for the marketplace REST API, and [`Dashboard`] serves the
//! real dashboard router against it. Both listen on ephemeral ports.
//!
//! # Test Categories
//!
//! - `session_guard` - Token checks shared by every page
//! - `vendors` - Vendor list, filters and lifecycle actions
//! - `admins` - Admin account management
//! - `profile` - Image-then-name profile pipeline and password change
//! - `dashboard` - Page rendering, sign-in and sign-out

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use bitnbolt_admin::backend::BackendClient;
use bitnbolt_admin::config::{AdminConfig, BackendConfig};
use bitnbolt_admin::state::AppState;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Token the fake backend accepts by default.
pub const VALID_TOKEN: &str = "test-token-1";

/// Install the process-wide rustls provider before any HTTP client is built.
pub fn init_crypto() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

// =============================================================================
// Fake backend
// =============================================================================

/// A request received by the fake backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    /// JSON body, or `Value::Null` when absent or not JSON.
    pub body: Value,
}

impl RecordedRequest {
    /// Value of a query-string parameter.
    #[must_use]
    pub fn query_param(&self, key: &str) -> Option<String> {
        self.query.as_deref().and_then(|q| {
            q.split('&').find_map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                (k == key).then(|| v.replace('+', " "))
            })
        })
    }
}

#[derive(Default)]
struct FakeState {
    routes: HashMap<(Method, String), (StatusCode, Value)>,
    requests: Vec<RecordedRequest>,
}

/// In-process stand-in for the marketplace backend.
///
/// Unregistered routes answer 404 with a backend-style failure envelope.
#[derive(Clone)]
pub struct FakeBackend {
    addr: SocketAddr,
    state: Arc<Mutex<FakeState>>,
}

async fn fake_handler(
    State(state): State<Arc<Mutex<FakeState>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let recorded = RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };

    let mut state = state.lock().unwrap();
    state.requests.push(recorded);
    let (status, body) = state.routes.get(&(method, path)).cloned().unwrap_or((
        StatusCode::NOT_FOUND,
        json!({ "success": false, "message": "Route not found" }),
    ));
    drop(state);

    (status, Json(body)).into_response()
}

impl FakeBackend {
    /// Start on an ephemeral port.
    pub async fn start() -> Self {
        init_crypto();
        let state = Arc::new(Mutex::new(FakeState::default()));
        let app = Router::new()
            .fallback(fake_handler)
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer `method path` with `status` and a JSON body from now on.
    pub fn respond(&self, method: Method, path: &str, status: StatusCode, body: Value) {
        self.state
            .lock()
            .unwrap()
            .routes
            .insert((method, path.to_string()), (status, body));
    }

    /// Answer `method path` with `{success: true, data}`.
    pub fn respond_ok(&self, method: Method, path: &str, data: Value) {
        self.respond(
            method,
            path,
            StatusCode::OK,
            json!({ "success": true, "data": data }),
        );
    }

    /// Accept `token` on `GET /api/admin/session` as `admin`.
    pub fn accept_session(&self, admin: &Value) {
        self.respond_ok(
            Method::GET,
            "/api/admin/session",
            json!({ "admin": admin }),
        );
    }

    /// Reject every session check with 401.
    pub fn reject_session(&self) {
        self.respond(
            Method::GET,
            "/api/admin/session",
            StatusCode::UNAUTHORIZED,
            json!({ "success": false, "message": "Invalid token" }),
        );
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Requests received for `path`.
    #[must_use]
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }

    /// Client pointed at this backend.
    #[must_use]
    pub fn client(&self) -> BackendClient {
        BackendClient::new(&self.backend_config()).unwrap()
    }

    #[must_use]
    pub fn backend_config(&self) -> BackendConfig {
        let mut config = BackendConfig::new(&self.url()).unwrap();
        config.timeout = Duration::from_secs(5);
        config
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// Admin record as the backend returns it.
#[must_use]
pub fn admin_json(id: &str, name: &str, role: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{id}@bitnbolt.in"),
        "admin_name": name,
        "role": role,
        "permissions": ["manage_vendors", "view_analytics"],
        "isActive": true,
        "lastLogin": "2024-05-01T09:30:00Z",
        "createdAt": "2024-01-15T00:00:00Z"
    })
}

/// Vendor record as the backend returns it.
#[must_use]
pub fn vendor_json(id: &str, shop: &str, approved: bool, suspended: bool) -> Value {
    json!({
        "_id": id,
        "seller_name": format!("Owner of {shop}"),
        "email": format!("{id}@shops.in"),
        "phone": "9876543210",
        "shopName": shop,
        "approved": approved,
        "suspended": suspended,
        "emailVerified": true,
        "phoneVerified": false,
        "createdAt": "2024-03-10T12:00:00Z"
    })
}

/// One page of vendors with stats and pagination.
#[must_use]
pub fn vendor_page(vendors: Vec<Value>, page: u32, pages: u32) -> Value {
    let total = vendors.len();
    json!({
        "vendors": vendors,
        "stats": {
            "total": total,
            "approved": 1,
            "pending": 1,
            "suspended": 0,
            "emailVerified": total,
            "phoneVerified": 0
        },
        "pagination": { "page": page, "limit": 10, "total": total, "pages": pages }
    })
}

// =============================================================================
// Dashboard
// =============================================================================

/// The real dashboard router served against a [`FakeBackend`].
pub struct Dashboard {
    addr: SocketAddr,
    /// Browser-like client: keeps cookies, does not follow redirects.
    pub client: reqwest::Client,
}

impl Dashboard {
    /// Serve the dashboard on an ephemeral port.
    pub async fn spawn(backend: &FakeBackend) -> Self {
        init_crypto();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let config = AdminConfig {
            host: addr.ip(),
            port: addr.port(),
            base_url: format!("http://{addr}"),
            backend: backend.backend_config(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 0.0,
            sentry_traces_sample_rate: 0.0,
            tls: None,
        };
        let state = AppState::with_backend(config, backend.client());
        let app = bitnbolt_admin::app(state);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self { addr, client }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .unwrap()
    }

    /// Sign in through the form; the backend issues [`VALID_TOKEN`] and
    /// accepts it as `admin` afterwards.
    pub async fn sign_in(&self, backend: &FakeBackend, admin: &Value) {
        backend.respond_ok(
            Method::POST,
            "/api/admin/login",
            json!({ "token": VALID_TOKEN, "admin": admin }),
        );
        backend.accept_session(admin);

        let response = self
            .post_form(
                "/auth/signin",
                &[("email", "ops@bitnbolt.in"), ("password", "secret-pass")],
            )
            .await;
        assert_eq!(location(&response), "/");
    }
}

/// `Location` header of a redirect, or "" when there is none.
#[must_use]
pub fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Decoded `?name=` parameter of a redirect target.
#[must_use]
pub fn flash(response: &reqwest::Response, name: &str) -> Option<String> {
    let target = reqwest::Url::parse("http://dashboard").ok()?.join(&location(response)).ok()?;
    target
        .query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}
