//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "vaxdesk.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Vaxdesk configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} and set api.base_url", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set VAXDESK_AUTH_USERNAME and VAXDESK_AUTH_PASSWORD");
                println!("  3. Validate configuration: vaxdesk validate-config");
                println!("  4. Check credentials: vaxdesk login");
                println!("  5. Browse options: vaxdesk options --location <ID>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# Vaxdesk Configuration File

[application]
log_level = "info"

[api]
base_url = "http://localhost:8000/"
timeout_seconds = 30
filter_mode = "client"

[auth]
username = "${VAXDESK_AUTH_USERNAME}"
password = "${VAXDESK_AUTH_PASSWORD}"

[logging]
local_enabled = false
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# Vaxdesk Configuration File
#
# Values of the form ${VAR} are substituted from the environment, and any
# setting can be overridden with VAXDESK_<SECTION>_<KEY>, for example
# VAXDESK_API_BASE_URL.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Vaccination API
# ============================================================================
[api]
# Base URL of the API server; routes live under api/
base_url = "http://localhost:8000/"

# Request timeout in seconds
timeout_seconds = 30

# TLS certificate verification (disable only for development servers)
tls_verify = true

# Where patients and slots are narrowed to the selected centre/patient:
# - client: fetch the full collections and filter locally
# - server: send ?centre= / ?patient= and still filter locally
filter_mode = "client"

# Retries for connection failures, timeouts and 5xx responses
[api.retry]
max_retries = 3
initial_delay_ms = 500
max_delay_ms = 10000
backoff_multiplier = 2.0

# ============================================================================
# Authentication
# ============================================================================
[auth]
# Credentials exchanged for a token pair at api/token/
username = "${VAXDESK_AUTH_USERNAME}"
password = "${VAXDESK_AUTH_PASSWORD}"

# Or a pre-issued token pair
# access_token = "${VAXDESK_AUTH_ACCESS_TOKEN}"
# refresh_token = "${VAXDESK_AUTH_REFRESH_TOKEN}"

# On 401, refresh the access token once and replay the request
refresh_on_unauthorized = true

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = false

# Local log directory
local_path = "./logs"

# Log rotation (daily, hourly or never)
local_rotation = "daily"
"#
        .to_string()
    }
}
