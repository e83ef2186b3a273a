//! Session state machine.
//!
//! `Unauthenticated -> Checking -> {Authenticated, Unauthenticated}`. The
//! expired-token path deliberately has no logic of its own: the profile fetch
//! runs through [`crate::ApiClient`], whose 401 protocol performs the single
//! refresh attempt and forces the login redirect on failure.

use chrono::Utc;
use thiserror::Error;

use crate::api::auth;
use crate::api::models::User;
use crate::claims;
use crate::http::{ApiClient, ClientError, Route, GENERIC_ERROR_MESSAGE};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("Login failed: {0}")]
    LoginFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Authenticated(User),
    Checking,
    Unauthenticated,
}

pub struct Session {
    client: ApiClient,
    error: Option<String>,
    /// A latched error survives [`Session::clear_transient_error`] and is
    /// only removed by an explicit [`Session::clear_error`].
    error_latched: bool,
    state: SessionState,
}

impl Session {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            error: None,
            error_latched: false,
            state: SessionState::Unauthenticated,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Explicitly clear any surfaced error, latched or not.
    pub fn clear_error(&mut self) {
        self.error = None;
        self.error_latched = false;
    }

    /// Clear an error unless it is latched. Called on incidental state
    /// churn so login failures stay visible until acted upon.
    pub fn clear_transient_error(&mut self) {
        if !self.error_latched {
            self.error = None;
        }
    }

    fn latch_error(&mut self, message: String) {
        self.error = Some(message);
        self.error_latched = true;
    }

    /// Restore a session from stored tokens, if any.
    ///
    /// `current_route` decides whether an unauthenticated outcome forces a
    /// redirect to the login screen.
    pub async fn bootstrap(&mut self, current_route: Route) -> Result<(), SessionError> {
        self.state = SessionState::Checking;

        let access = self.client.store().get_access().map_err(ClientError::from)?;
        let Some(access) = access else {
            self.to_unauthenticated(current_route);
            return Ok(());
        };

        let stored_claims = claims::decode(&access).ok();
        if stored_claims
            .as_ref()
            .is_some_and(|c| c.is_expired(Utc::now()))
        {
            tracing::debug!("Stored access token is expired; profile fetch will refresh");
        }

        match auth::profile(&self.client).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Session restored");
                self.state = SessionState::Authenticated(user);
            }
            Err(ClientError::Unauthenticated) => {
                // The client already cleared tokens and routed to /login.
                self.state = SessionState::Unauthenticated;
            }
            Err(e) => match stored_claims.filter(|c| !c.is_expired(Utc::now())) {
                Some(c) => {
                    tracing::warn!(error = %e, "Profile fetch failed, using token claims");
                    self.state = SessionState::Authenticated(c.to_user());
                }
                None => {
                    tracing::warn!(error = %e, "Profile fetch failed and claims are unusable");
                    self.to_unauthenticated(current_route);
                }
            },
        }

        Ok(())
    }

    /// Authenticate, store tokens, and return the role-based landing route.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Route, SessionError> {
        self.clear_transient_error();
        self.state = SessionState::Checking;

        let tokens = match auth::login(&self.client, email, password).await {
            Ok(tokens) => tokens,
            Err(ClientError::Api { message, status }) => {
                tracing::debug!(status, "Login rejected");
                self.latch_error(message.clone());
                self.state = SessionState::Unauthenticated;
                return Err(SessionError::LoginFailed(message));
            }
            Err(e) => {
                self.latch_error(GENERIC_ERROR_MESSAGE.to_string());
                self.state = SessionState::Unauthenticated;
                return Err(e.into());
            }
        };

        self.client
            .store()
            .set_tokens(&tokens.access, &tokens.refresh)
            .map_err(ClientError::from)?;

        let user = match auth::profile(&self.client).await {
            Ok(user) => user,
            Err(e) => match claims::decode(&tokens.access) {
                Ok(c) => {
                    tracing::warn!(error = %e, "Profile fetch failed after login, using token claims");
                    c.to_user()
                }
                Err(_) => return Err(SessionError::Client(e)),
            },
        };

        let landing = if user.is_admin {
            Route::Admin
        } else {
            Route::Dashboard
        };
        tracing::info!(user_id = %user.id, admin = user.is_admin, "Login succeeded");

        self.state = SessionState::Authenticated(user);
        self.client.navigator().navigate(landing);
        Ok(landing)
    }

    /// Unconditional transition to `Unauthenticated`: clears both stored
    /// tokens and navigates home.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.state = SessionState::Unauthenticated;
        self.clear_error();
        self.client.store().clear().map_err(ClientError::from)?;
        tracing::info!("Logged out");
        self.client.navigator().navigate(Route::Home);
        Ok(())
    }

    fn to_unauthenticated(&mut self, current_route: Route) {
        self.state = SessionState::Unauthenticated;
        if current_route.is_protected() {
            self.client.navigator().navigate(Route::Login);
        }
    }
}
