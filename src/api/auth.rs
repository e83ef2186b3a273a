//! Authentication endpoints: login, registration, OTP, password reset,
//! profile. Login/registration/OTP/reset go out unauthenticated; a 401 from
//! them is a real rejection, not a refresh trigger.

use serde::Serialize;

use super::models::{ApiMessage, TokenPair, User};
use crate::http::{ApiClient, ClientError};

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

pub async fn login(
    client: &ApiClient,
    email: &str,
    password: &str,
) -> Result<TokenPair, ClientError> {
    client
        .post_unauthenticated("/api/auth/login/", &LoginRequest { email, password })
        .await
}

pub async fn register(client: &ApiClient, request: &RegisterRequest) -> Result<ApiMessage, ClientError> {
    client.post_unauthenticated("/api/auth/register/", request).await
}

/// Submit the emailed OTP code to activate the account.
pub async fn confirm_otp(
    client: &ApiClient,
    email: &str,
    code: &str,
) -> Result<ApiMessage, ClientError> {
    client
        .post_unauthenticated(
            "/api/auth/otp/confirm/",
            &serde_json::json!({ "code": code, "email": email }),
        )
        .await
}

pub async fn resend_otp(client: &ApiClient, email: &str) -> Result<ApiMessage, ClientError> {
    client
        .post_unauthenticated("/api/auth/otp/resend/", &serde_json::json!({ "email": email }))
        .await
}

pub async fn request_password_reset(
    client: &ApiClient,
    email: &str,
) -> Result<ApiMessage, ClientError> {
    client
        .post_unauthenticated(
            "/api/auth/password-reset/",
            &serde_json::json!({ "email": email }),
        )
        .await
}

pub async fn confirm_password_reset(
    client: &ApiClient,
    token: &str,
    new_password: &str,
) -> Result<ApiMessage, ClientError> {
    client
        .post_unauthenticated(
            "/api/auth/password-reset/confirm/",
            &serde_json::json!({ "password": new_password, "token": token }),
        )
        .await
}

/// Fetch the authenticated user's profile.
pub async fn profile(client: &ApiClient) -> Result<User, ClientError> {
    client.get("/api/profile/").await
}
