//! Authenticated HTTP client.
//!
//! Every authenticated request carries `Authorization: Bearer <access>`. On a
//! 401, the client attempts exactly one silent token refresh and replays the
//! original request with the new access token; a missing or rejected refresh
//! token clears storage and forces navigation to the login route. The
//! already-retried flag guarantees the refresh never loops.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::storage::{StoreError, TokenStore};

/// Shown when the server's error body has no usable message.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

const REFRESH_PATH: &str = "/api/auth/token/refresh/";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx response with the message extracted from the body.
    #[error("API error ({status}): {message}")]
    Api { message: String, status: u16 },
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Token store error: {0}")]
    Store(#[from] StoreError),
    /// No usable credentials; the caller has been routed to the login screen.
    #[error("Not authenticated")]
    Unauthenticated,
}

// ============================================================================
// Routes and navigation
// ============================================================================

/// Client-side routes the session layer can force-navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Admin,
    Dashboard,
    Home,
    Login,
    Register,
    ResetPassword,
    Verify,
}

impl Route {
    pub fn as_path(&self) -> &'static str {
        match self {
            Route::Admin => "/admin",
            Route::Dashboard => "/dashboard",
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::ResetPassword => "/reset-password",
            Route::Verify => "/verify",
        }
    }

    /// Routes that require an authenticated session.
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Admin | Route::Dashboard)
    }
}

/// Abstraction over the SPA's forced navigation (login redirects, logout).
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Default navigator that only records the intent in the log.
#[derive(Debug, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(route = route.as_path(), "Navigation requested");
    }
}

// ============================================================================
// Client
// ============================================================================

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    navigator: Arc<dyn Navigator>,
    store: Arc<dyn TokenStore>,
}

#[derive(Debug, serde::Deserialize)]
struct RefreshResponse {
    access: String,
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            http,
            navigator,
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token store backing this client (shared with the session layer).
    pub fn store(&self) -> &dyn TokenStore {
        self.store.as_ref()
    }

    pub(crate) fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ------------------------------------------------------------------------
    // Typed request helpers
    // ------------------------------------------------------------------------

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ClientError> {
        let response = self.send(Method::GET, path, None).await?;
        parse_json(response).await
    }

    pub async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ClientError> {
        let body = serde_json::to_value(body)?;
        let response = self.send(Method::POST, path, Some(body)).await?;
        parse_json(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let response = self.send(Method::DELETE, path, None).await?;
        expect_success(response).await
    }

    /// POST without a bearer token (login, register, OTP, password reset).
    /// A 401 here is a real rejection, never a refresh trigger.
    pub async fn post_unauthenticated<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ClientError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        parse_json(response).await
    }

    // ------------------------------------------------------------------------
    // Core send with retry-once refresh
    // ------------------------------------------------------------------------

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response, ClientError> {
        let mut retried = false;

        loop {
            let mut request = self.http.request(method.clone(), self.url(path));
            if let Some(access) = self.store.get_access()? {
                request = request.bearer_auth(access);
            }
            if let Some(ref json) = body {
                request = request.json(json);
            }

            let response = request.send().await?;

            if response.status() == StatusCode::UNAUTHORIZED && !retried {
                // Exactly one refresh attempt per failed request.
                retried = true;
                tracing::debug!(path, "Got 401, attempting token refresh");
                self.refresh_access().await?;
                continue;
            }

            return Ok(response);
        }
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Missing refresh token or a rejected exchange both end the session:
    /// storage is cleared and the navigator is pointed at the login route.
    async fn refresh_access(&self) -> Result<(), ClientError> {
        let Some(refresh) = self.store.get_refresh()? else {
            self.navigator.navigate(Route::Login);
            return Err(ClientError::Unauthenticated);
        };

        let response = self
            .http
            .post(self.url(REFRESH_PATH))
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .await?;

        if response.status().is_success() {
            let body: RefreshResponse = response.json().await?;
            self.store.set_access(&body.access)?;
            tracing::debug!("Access token refreshed");
            Ok(())
        } else {
            tracing::info!(status = %response.status(), "Token refresh rejected, ending session");
            self.store.clear()?;
            self.navigator.navigate(Route::Login);
            Err(ClientError::Unauthenticated)
        }
    }
}

// ============================================================================
// Response handling
// ============================================================================

async fn parse_json<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json().await?)
    } else {
        let body = response.bytes().await.unwrap_or_default();
        Err(ClientError::Api {
            message: extract_message(&body),
            status: status.as_u16(),
        })
    }
}

async fn expect_success(response: reqwest::Response) -> Result<(), ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        let body = response.bytes().await.unwrap_or_default();
        Err(ClientError::Api {
            message: extract_message(&body),
            status: status.as_u16(),
        })
    }
}

/// Pull a human-readable message out of an error body, trying the
/// `detail` | `error` | `message` fields in that order.
fn extract_message(body: &[u8]) -> String {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
        return GENERIC_ERROR_MESSAGE.to_string();
    };

    for key in ["detail", "error", "message"] {
        if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
            return message.to_string();
        }
    }

    GENERIC_ERROR_MESSAGE.to_string()
}
