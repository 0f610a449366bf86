//! Configuration management for Vaxdesk.
//!
//! Vaxdesk uses a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `VAXDESK_<SECTION>_<KEY>` overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ApiConfig`] - REST API base URL, timeouts, filter mode and retries
//! - [`AuthConfig`] - Credentials and bearer tokens
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [api]
//! base_url = "https://vaccination.example.com/"
//! filter_mode = "client"
//!
//! [api.retry]
//! max_retries = 3
//!
//! [auth]
//! username = "nurse"
//! password = "${VAXDESK_PASSWORD}"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vaxdesk::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("vaxdesk.toml")?;
//! println!("API: {}", config.api.base_url);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str};
pub use schema::{
    ApiConfig, ApplicationConfig, AuthConfig, FilterMode, LoggingConfig, RetryConfig,
    VaxdeskConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
