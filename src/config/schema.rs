//! Configuration schema types
//!
//! This module defines the configuration structure that maps to `vaxdesk.toml`.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// How patients and slots are narrowed to the selected upstream entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Fetch the full collection and filter locally (O(total) per selection)
    #[default]
    Client,
    /// Ask the server to filter via a query parameter; results are still
    /// filtered locally in case the server ignores it
    Server,
}

/// Main Vaxdesk configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VaxdeskConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// REST API connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Credentials and bearer tokens
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VaxdeskConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate()?;
        self.auth.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Retry configuration for transient API failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_retries == 0 || self.max_retries > 10 {
            return Err(format!(
                "api.retry.max_retries must be between 1 and 10, got {}",
                self.max_retries
            ));
        }

        if self.backoff_multiplier < 1.0 {
            return Err(format!(
                "api.retry.backoff_multiplier must be >= 1.0, got {}",
                self.backoff_multiplier
            ));
        }

        if self.initial_delay_ms > self.max_delay_ms {
            return Err(format!(
                "api.retry.initial_delay_ms ({}) cannot exceed api.retry.max_delay_ms ({})",
                self.initial_delay_ms, self.max_delay_ms
            ));
        }

        Ok(())
    }

    /// Backoff delay before the given retry (1-based), capped at `max_delay_ms`
    pub fn delay_for_attempt(&self, attempt: usize) -> u64 {
        let exponent = attempt.saturating_sub(1) as i32;
        let delay = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(exponent);
        (delay as u64).min(self.max_delay_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Vaccination REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the server; API routes (`api/locations/`, ...) are resolved against it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    ///
    /// Only disable this against local development servers.
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Where patients and slots are filtered
    #[serde(default)]
    pub filter_mode: FilterMode,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl ApiConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("api.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("api.base_url must start with http:// or https://".to_string());
        }

        if url::Url::parse(&self.base_url).is_err() {
            return Err(format!("api.base_url '{}' is not a valid URL", self.base_url));
        }

        if self.timeout_seconds == 0 {
            return Err("api.timeout_seconds must be > 0".to_string());
        }

        self.retry.validate()?;
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            tls_verify: true,
            filter_mode: FilterMode::default(),
            retry: RetryConfig::default(),
        }
    }
}

/// Authentication configuration
///
/// Either a pre-issued `access_token` is supplied, or `username`/`password` are
/// exchanged for tokens at startup. With neither, requests go out without an
/// `Authorization` header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Username for the token endpoint
    #[serde(default)]
    pub username: Option<String>,

    /// Password for the token endpoint
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Pre-issued bearer access token
    #[serde(default)]
    pub access_token: Option<SecretString>,

    /// Pre-issued refresh token
    #[serde(default)]
    pub refresh_token: Option<SecretString>,

    /// On a 401, refresh the access token once and replay the request
    #[serde(default = "default_true")]
    pub refresh_on_unauthorized: bool,
}

impl AuthConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        let has_username = self
            .username
            .as_ref()
            .map(|u| !u.trim().is_empty())
            .unwrap_or(false);
        let has_password = self
            .password
            .as_ref()
            .map(|p| !p.expose_secret().is_blank())
            .unwrap_or(false);

        if has_username != has_password {
            return Err(
                "auth.username and auth.password must be provided together".to_string()
            );
        }

        Ok(())
    }

    /// Whether credentials are configured for the token endpoint
    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            access_token: None,
            refresh_token: None,
            refresh_on_unauthorized: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8000/".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    10000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
