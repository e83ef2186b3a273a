use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST backend, e.g. `https://vote.example.org`
    pub api_base_url: String,
    /// Base URL of the blockchain explorer used for transaction links
    pub explorer_base_url: Option<String>,
    pub forms: FormConfig,
    pub poll: PollConfig,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Page size for client-side pagination of admin collections
    pub admin_page_size: usize,
    /// Number of digits in the OTP code
    pub otp_code_length: usize,
    /// Seconds before "Resend Code" becomes available again
    pub otp_cooldown_seconds: u32,
}

#[derive(Debug, Clone)]
pub struct PollConfig {
    /// How often to poll the blockchain status endpoint (seconds)
    pub status_interval_seconds: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            admin_page_size: 10,
            otp_code_length: 6,
            otp_cooldown_seconds: 60,
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            status_interval_seconds: 15,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// `API_BASE_URL` is required; everything else has a default.
    pub fn load() -> Result<Self, ConfigError> {
        let api_base_url = std::env::var("API_BASE_URL").map_err(|_| {
            ConfigError::ValidationError("API_BASE_URL must be set".to_string())
        })?;

        let explorer_base_url = std::env::var("EXPLORER_BASE_URL").ok();

        let request_timeout_seconds = std::env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let admin_page_size = std::env::var("ADMIN_PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let status_interval_seconds = std::env::var("STATUS_POLL_INTERVAL")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(15);

        let config = ClientConfig {
            api_base_url,
            explorer_base_url,
            forms: FormConfig {
                admin_page_size,
                ..Default::default()
            },
            poll: PollConfig {
                status_interval_seconds,
            },
            request_timeout_seconds,
        };

        config.validate()?;
        Ok(config)
    }

    /// Construct a configuration with defaults for the given backend URL.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            explorer_base_url: None,
            forms: FormConfig::default(),
            poll: PollConfig::default(),
            request_timeout_seconds: 10,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "API_BASE_URL cannot be empty".to_string(),
            ));
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "API_BASE_URL must be an http(s) URL, got: {}",
                self.api_base_url
            )));
        }
        if self.forms.otp_code_length == 0 {
            return Err(ConfigError::ValidationError(
                "OTP code length cannot be zero".to_string(),
            ));
        }
        if self.forms.admin_page_size == 0 {
            return Err(ConfigError::ValidationError(
                "Admin page size cannot be zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Explorer link for a blockchain transaction, if an explorer is configured.
    pub fn transaction_url(&self, tx_hash: &str) -> Option<String> {
        self.explorer_base_url
            .as_ref()
            .map(|base| format!("{}/tx/{}", base.trim_end_matches('/'), tx_hash))
    }
}
