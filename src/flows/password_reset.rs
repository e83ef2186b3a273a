//! Password reset: request a reset email, then confirm with the emailed
//! token and a new password. The confirm step shares the registration
//! flow's password-match rule.

use super::{FlowError, FormError};
use crate::api::auth;
use crate::api::models::ApiMessage;
use crate::http::ApiClient;

pub async fn request(client: &ApiClient, email: &str) -> Result<ApiMessage, FlowError> {
    if email.trim().is_empty() {
        return Err(FormError::MissingField("Email").into());
    }
    Ok(auth::request_password_reset(client, email.trim()).await?)
}

#[derive(Debug, Clone, Default)]
pub struct ResetConfirmForm {
    pub confirm_password: String,
    pub new_password: String,
    pub token: String,
}

impl ResetConfirmForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.new_password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        if self.token.trim().is_empty() {
            return Err(FormError::MissingField("Reset token"));
        }
        if self.new_password.is_empty() {
            return Err(FormError::MissingField("Password"));
        }
        Ok(())
    }

    pub async fn submit(&self, client: &ApiClient) -> Result<ApiMessage, FlowError> {
        self.validate()?;
        let message =
            auth::confirm_password_reset(client, self.token.trim(), &self.new_password).await?;
        tracing::info!("Password reset confirmed");
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatched_passwords_block() {
        let form = ResetConfirmForm {
            confirm_password: "other".to_string(),
            new_password: "secret".to_string(),
            token: "tok".to_string(),
        };
        assert_eq!(form.validate().unwrap_err(), FormError::PasswordMismatch);
    }

    #[test]
    fn test_missing_token_blocks() {
        let form = ResetConfirmForm {
            confirm_password: "secret".to_string(),
            new_password: "secret".to_string(),
            token: String::new(),
        };
        assert_eq!(
            form.validate().unwrap_err(),
            FormError::MissingField("Reset token")
        );
    }

    #[test]
    fn test_valid_form_passes() {
        let form = ResetConfirmForm {
            confirm_password: "secret".to_string(),
            new_password: "secret".to_string(),
            token: "tok".to_string(),
        };
        assert!(form.validate().is_ok());
    }
}
