//! Login command implementation
//!
//! Verifies credentials against the token endpoint.

use super::{exit_code_for, load_or_report};
use crate::adapters::api::ApiClient;
use clap::Args;

/// Arguments for the login command
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username (defaults to auth.username from the configuration)
    #[arg(short, long)]
    pub username: Option<String>,
}

impl LoginArgs {
    /// Execute the login command
    ///
    /// The password always comes from configuration (`auth.password` or
    /// `VAXDESK_AUTH_PASSWORD`), never from the command line.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_report(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };

        let Some(username) = self.username.as_ref().or(config.auth.username.as_ref()) else {
            println!("❌ No username given");
            println!("   Use --username or set auth.username");
            return Ok(2); // Configuration error exit code
        };

        let Some(password) = config.auth.password.as_ref() else {
            println!("❌ No password configured");
            println!("   Set auth.password or VAXDESK_AUTH_PASSWORD");
            return Ok(2); // Configuration error exit code
        };

        println!("🔐 Logging in to {} as {username}", config.api.base_url);

        let client = match ApiClient::new(&config.api, &config.auth) {
            Ok(client) => client,
            Err(e) => {
                println!("❌ {e}");
                return Ok(exit_code_for(&e));
            }
        };

        match client.login(username, password).await {
            Ok(()) => {
                println!("✅ Login successful");
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, username = %username, "Login failed");
                println!("❌ Login failed");
                println!("   Error: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}
