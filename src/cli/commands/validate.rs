//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Vaxdesk configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading also runs validation
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  API Base URL: {}", config.api.base_url);
        println!("  Timeout: {}s", config.api.timeout_seconds);
        println!("  TLS Verify: {}", config.api.tls_verify);
        println!("  Filter Mode: {:?}", config.api.filter_mode);
        println!("  Max Retries: {}", config.api.retry.max_retries);

        let auth = if config.auth.access_token.is_some() {
            "access token"
        } else if config.auth.has_credentials() {
            "username/password"
        } else {
            "none"
        };
        println!("  Authentication: {auth}");
        println!(
            "  Refresh On 401: {}",
            config.auth.refresh_on_unauthorized
        );

        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        } else {
            println!("  File Logging: disabled");
        }
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://localhost:8000/\"").unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_validate_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"ftp://example.com\"").unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
