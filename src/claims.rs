//! Unverified decoding of the access token's JWT payload.
//!
//! The client never checks signatures — expiry and identity are authoritative
//! only on the server. Decoded claims are used for two things: deciding
//! whether a stored token is worth presenting at all, and filling in the user
//! object when the profile fetch fails.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::models::User;

/// Leeway applied to expiry checks so a token that dies mid-request is
/// treated as already expired.
const EXPIRY_LEEWAY_SECONDS: i64 = 30;

#[derive(Debug, Error)]
pub enum ClaimsError {
    #[error("Invalid base64 in token payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Token payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Token is not a three-part JWT")]
    Malformed,
}

/// Claims of interest from the access token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "sub")]
    pub user_id: Option<String>,
}

impl Claims {
    /// Whether the token's `exp` has passed (with leeway). A token without
    /// an `exp` claim is treated as unexpired; the server still decides.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.exp {
            Some(exp) => now.timestamp() >= exp - EXPIRY_LEEWAY_SECONDS,
            None => false,
        }
    }

    /// Best-effort user object from token fields alone.
    pub fn to_user(&self) -> User {
        User {
            email: self.email.clone().unwrap_or_default(),
            id: self.user_id.clone().unwrap_or_default(),
            is_admin: self.is_admin,
            is_staff: self.is_staff,
            name: self.name.clone().unwrap_or_default(),
        }
    }
}

/// Decode the payload segment of a JWT without verifying the signature.
pub fn decode(token: &str) -> Result<Claims, ClaimsError> {
    let payload = token.split('.').nth(1).ok_or(ClaimsError::Malformed)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}
