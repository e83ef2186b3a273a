//! OTP verification flow: the per-digit input model, the resend cooldown,
//! and the confirm/resend round-trips.
//!
//! `OtpInput` mirrors the six-cell widget: a digit advances the cursor,
//! backspace clears the current cell or retreats into the previous one,
//! arrows move the cursor, and paste fills cells with the digits of the
//! pasted text. Everything else is rejected.

use thiserror::Error;

use crate::api::auth;
use crate::api::models::ApiMessage;
use crate::http::{ApiClient, ClientError};

/// Number of digit cells in the OTP widget.
pub const OTP_LEN: usize = 6;

#[derive(Debug, Error)]
pub enum OtpError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("Please wait {seconds}s before requesting a new code.")]
    CoolingDown { seconds: u32 },
    #[error("Enter the 6-digit code.")]
    Incomplete,
}

// ============================================================================
// Input model
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpInput {
    cells: [Option<char>; OTP_LEN],
    cursor: usize,
}

impl OtpInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cells(&self) -> &[Option<char>; OTP_LEN] {
        &self.cells
    }

    /// Type one character. Non-digits are rejected; a full input (cursor on
    /// an occupied last cell) accepts nothing more. Returns whether the
    /// character was accepted.
    pub fn insert(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() {
            return false;
        }
        if self.cursor == OTP_LEN - 1 && self.cells[self.cursor].is_some() {
            return false;
        }
        self.cells[self.cursor] = Some(c);
        if self.cursor < OTP_LEN - 1 {
            self.cursor += 1;
        }
        true
    }

    /// Clear the current cell, or retreat into the previous cell and clear
    /// it when the current one is already empty.
    pub fn backspace(&mut self) {
        if self.cells[self.cursor].is_some() {
            self.cells[self.cursor] = None;
        } else if self.cursor > 0 {
            self.cursor -= 1;
            self.cells[self.cursor] = None;
        }
    }

    pub fn arrow_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn arrow_right(&mut self) {
        if self.cursor < OTP_LEN - 1 {
            self.cursor += 1;
        }
    }

    /// Fill cells from the cursor with the digits of the pasted text,
    /// skipping anything else and truncating at the last cell.
    pub fn paste(&mut self, text: &str) {
        let mut i = self.cursor;
        for c in text.chars().filter(|c| c.is_ascii_digit()) {
            if i >= OTP_LEN {
                break;
            }
            self.cells[i] = Some(c);
            i += 1;
        }
        self.cursor = i.min(OTP_LEN - 1);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The full code, only once all six cells are filled.
    pub fn code(&self) -> Option<String> {
        self.cells.iter().copied().collect::<Option<String>>()
    }
}

// ============================================================================
// Resend cooldown
// ============================================================================

/// Single-flight countdown gating the "Resend Code" action. Ticks are
/// driven by the caller (one per second in the UI).
#[derive(Debug, Clone)]
pub struct ResendCooldown {
    period: u32,
    remaining: u32,
}

impl ResendCooldown {
    pub fn new(period_seconds: u32) -> Self {
        Self {
            period: period_seconds,
            remaining: 0,
        }
    }

    pub fn ready(&self) -> bool {
        self.remaining == 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Start the countdown. Returns false while one is already running.
    pub fn arm(&mut self) -> bool {
        if self.remaining > 0 {
            return false;
        }
        self.remaining = self.period;
        true
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

// ============================================================================
// Server round-trips
// ============================================================================

/// Submit the code. Rejected client-side unless all six digits are present.
pub async fn submit(
    client: &ApiClient,
    email: &str,
    input: &OtpInput,
) -> Result<ApiMessage, OtpError> {
    let code = input.code().ok_or(OtpError::Incomplete)?;
    let message = auth::confirm_otp(client, email, &code).await?;
    tracing::info!("OTP confirmed");
    Ok(message)
}

/// Request a fresh code. Arms the cooldown before sending; a second request
/// inside the window never reaches the server.
pub async fn resend(
    client: &ApiClient,
    email: &str,
    cooldown: &mut ResendCooldown,
) -> Result<ApiMessage, OtpError> {
    if !cooldown.arm() {
        return Err(OtpError::CoolingDown {
            seconds: cooldown.remaining(),
        });
    }
    Ok(auth::resend_otp(client, email).await?)
}
