//! Multi-step form flows: registration, OTP verification, password reset.
//!
//! Each flow validates locally before any server round-trip; validation
//! messages are the exact strings surfaced to the user.

pub mod otp;
pub mod password_reset;
pub mod registration;

use thiserror::Error;

use crate::http::ClientError;

/// Local validation failures. The `Display` text is user-facing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("{0} is required.")]
    MissingField(&'static str),
    #[error("Passwords do not match.")]
    PasswordMismatch,
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Validation(#[from] FormError),
}
