//! Registration form: local validation, then the register endpoint.
//! A successful registration is followed by the OTP verification flow.

use super::{FlowError, FormError};
use crate::api::auth::{self, RegisterRequest};
use crate::api::models::ApiMessage;
use crate::http::ApiClient;

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub confirm_password: String,
    pub email: String,
    pub name: String,
    pub password: String,
}

impl RegistrationForm {
    /// Mismatched passwords always block, regardless of other field state.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        if self.name.trim().is_empty() {
            return Err(FormError::MissingField("Name"));
        }
        if self.email.trim().is_empty() {
            return Err(FormError::MissingField("Email"));
        }
        if self.password.is_empty() {
            return Err(FormError::MissingField("Password"));
        }
        if !is_plausible_email(&self.email) {
            return Err(FormError::InvalidEmail);
        }
        Ok(())
    }

    pub async fn submit(&self, client: &ApiClient) -> Result<ApiMessage, FlowError> {
        self.validate()?;
        let message = auth::register(
            client,
            &RegisterRequest {
                email: self.email.trim().to_string(),
                name: self.name.trim().to_string(),
                password: self.password.clone(),
            },
        )
        .await?;
        tracing::info!("Registration submitted");
        Ok(message)
    }
}

/// Cheap shape check; the server does the real validation.
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}
