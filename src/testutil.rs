//! Shared test helpers — available to all `#[cfg(test)]` modules in the crate.
//!
//! `MockBackend` is a tiny in-process axum server speaking the same shapes as
//! the real REST backend: login, token refresh, profile, elections, admin
//! collections, and blockchain status. Fixed credentials: any known account
//! with the password `correct-horse`.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use crate::config::ClientConfig;
use crate::http::{ApiClient, Navigator, Route};
use crate::storage::MemoryTokenStore;

/// Opt-in log output for debugging tests: `RUST_LOG=debug cargo test`.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Build an unsigned JWT-shaped token with the given payload.
pub fn make_jwt(payload: Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.sig")
}

/// Navigator that records every route it is pointed at.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

/// Build an `ApiClient` over a `MemoryTokenStore` pointed at the mock.
pub fn test_client(backend: &MockBackend) -> (ApiClient, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::default());
    let client = ApiClient::new(
        &ClientConfig::new(backend.base_url()),
        Arc::new(MemoryTokenStore::new()),
        Arc::clone(&navigator) as Arc<dyn Navigator>,
    )
    .unwrap();
    (client, navigator)
}

// ============================================================================
// Mock backend
// ============================================================================

#[derive(Debug, Default)]
pub struct MockState {
    access_counter: AtomicUsize,
    pub fail_profile: AtomicBool,
    pub fail_refresh: AtomicBool,
    pub login_calls: AtomicUsize,
    profile_email: Mutex<String>,
    pub refresh_calls: AtomicUsize,
    valid_access: Mutex<String>,
}

impl MockState {
    fn issue_access(&self) -> String {
        let n = self.access_counter.fetch_add(1, Ordering::SeqCst) + 1;
        let token = format!("access-{n}");
        *self.valid_access.lock().unwrap() = token.clone();
        token
    }
}

pub struct MockBackend {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
    pub state: Arc<MockState>,
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl MockBackend {
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState {
            profile_email: Mutex::new("voter@example.org".to_string()),
            valid_access: Mutex::new("access-0".to_string()),
            ..Default::default()
        });

        let app = Router::new()
            .route("/api/auth/login/", post(login))
            .route("/api/auth/token/refresh/", post(refresh))
            .route("/api/profile/", get(profile))
            .route("/api/elections/", get(list_elections))
            .route("/api/admin/stats/", get(admin_stats))
            .route("/api/admin/votes/", get(admin_votes))
            .route("/api/admin/votes/:id/verify/", post(verify_vote))
            .route("/api/admin/votes/:id/", delete(delete_vote))
            .route("/api/blockchain/status/", get(chain_status))
            .layer(TraceLayer::new_for_http())
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            handle,
            state,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// The access token the mock currently accepts.
    pub fn current_access(&self) -> String {
        self.state.valid_access.lock().unwrap().clone()
    }

    pub fn set_current_access(&self, token: &str) {
        *self.state.valid_access.lock().unwrap() = token.to_string();
    }
}

fn authorized(headers: &HeaderMap, state: &MockState) -> bool {
    let expected = format!("Bearer {}", state.valid_access.lock().unwrap());
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Authentication credentials were not provided." })),
    )
        .into_response()
}

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.login_calls.fetch_add(1, Ordering::SeqCst);

    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default();
    let known = matches!(email.as_str(), "voter@example.org" | "admin@example.org");

    if !known || password != "correct-horse" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid email or password." })),
        )
            .into_response();
    }

    *state.profile_email.lock().unwrap() = email;
    let access = state.issue_access();
    Json(json!({ "access": access, "refresh": "refresh-ok" })).into_response()
}

async fn refresh(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);

    let rejected = state.fail_refresh.load(Ordering::SeqCst)
        || body["refresh"].as_str() != Some("refresh-ok");
    if rejected {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Token is invalid or expired." })),
        )
            .into_response();
    }

    let access = state.issue_access();
    Json(json!({ "access": access })).into_response()
}

async fn profile(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if state.fail_profile.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error" })),
        )
            .into_response();
    }
    if !authorized(&headers, &state) {
        return unauthorized();
    }

    let email = state.profile_email.lock().unwrap().clone();
    let is_admin = email.starts_with("admin");
    Json(json!({
        "id": "1",
        "email": email,
        "name": "Test Voter",
        "is_staff": is_admin,
        "is_admin": is_admin,
    }))
    .into_response()
}

async fn list_elections(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !authorized(&headers, &state) {
        return unauthorized();
    }
    Json(json!([{
        "id": "e1",
        "title": "City Council 2026",
        "description": "Annual council election",
        "is_active": true,
        "start_time": "2026-08-01T00:00:00Z",
        "end_time": "2026-09-01T00:00:00Z",
        "candidates": [
            { "id": "c1", "name": "Alice", "party": "Green" },
            { "id": "c2", "name": "Bob", "party": null },
        ],
    }]))
    .into_response()
}

async fn admin_stats(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !authorized(&headers, &state) {
        return unauthorized();
    }
    Json(json!({
        "total_users": 3,
        "total_elections": 1,
        "total_votes": 2,
        "verified_votes": 1,
        "pending_votes": 1,
    }))
    .into_response()
}

async fn admin_votes(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !authorized(&headers, &state) {
        return unauthorized();
    }
    Json(json!([
        {
            "id": "v1",
            "election_id": "e1",
            "election_name": "City Council 2026",
            "voter_email": "voter@example.org",
            "is_verified": true,
            "tx_hash": "0xaaa",
            "cast_at": "2026-08-10T12:00:00Z",
        },
        {
            "id": "v2",
            "election_id": "e1",
            "election_name": "City Council 2026",
            "voter_email": "other@example.org",
            "is_verified": false,
            "tx_hash": null,
            "cast_at": "2026-08-11T12:00:00Z",
        },
    ]))
    .into_response()
}

async fn verify_vote(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers, &state) {
        return unauthorized();
    }
    Json(json!({ "message": format!("Vote {id} verified") })).into_response()
}

async fn delete_vote(
    State(state): State<Arc<MockState>>,
    Path(_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers, &state) {
        return unauthorized();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn chain_status(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !authorized(&headers, &state) {
        return unauthorized();
    }
    Json(json!({
        "connected": true,
        "network": "sepolia",
        "block_height": 123456,
        "last_synced_block": 123450,
        "pending_transactions": 1,
        "contract_address": "0xdeadbeef",
    }))
    .into_response()
}
