//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX`.

use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;
use vaxdesk::config::{load_config, FilterMode};
use vaxdesk::domain::VaxdeskError;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    std::env::remove_var("VAXDESK_APPLICATION_LOG_LEVEL");
    std::env::remove_var("VAXDESK_API_BASE_URL");
    std::env::remove_var("VAXDESK_API_FILTER_MODE");
    std::env::remove_var("VAXDESK_AUTH_REFRESH_ON_UNAUTHORIZED");
    std::env::remove_var("TEST_VAXDESK_PASSWORD");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[api]
base_url = "https://vaccination.example.com/desk"
timeout_seconds = 15
tls_verify = false
filter_mode = "server"

[api.retry]
max_retries = 5
initial_delay_ms = 100
max_delay_ms = 2000
backoff_multiplier = 3.0

[auth]
username = "nurse"
password = "pass"
refresh_on_unauthorized = false

[logging]
local_enabled = true
local_path = "/tmp/vaxdesk"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.api.base_url, "https://vaccination.example.com/desk");
    assert_eq!(config.api.timeout_seconds, 15);
    assert!(!config.api.tls_verify);
    assert_eq!(config.api.filter_mode, FilterMode::Server);
    assert_eq!(config.api.retry.max_retries, 5);
    assert_eq!(config.api.retry.delay_for_attempt(2), 300);
    assert_eq!(config.auth.username.as_deref(), Some("nurse"));
    assert!(!config.auth.refresh_on_unauthorized);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_empty_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.api.base_url, "http://localhost:8000/");
    assert_eq!(config.api.filter_mode, FilterMode::Client);
    assert!(config.auth.refresh_on_unauthorized);
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_password_substituted_from_environment() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_VAXDESK_PASSWORD", "s3cret");

    let file = write_config(
        r#"
[auth]
username = "nurse"
password = "${TEST_VAXDESK_PASSWORD}"
"#,
    );
    let config = load_config(file.path()).unwrap();

    let password = config.auth.password.clone().unwrap();
    assert_eq!(password.expose_secret().as_str(), "s3cret");
    // Secrets never show up in debug output
    assert!(!format!("{:?}", config.auth).contains("s3cret"));

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable_fails() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[auth]
username = "nurse"
password = "${TEST_VAXDESK_PASSWORD}"
"#,
    );
    let err = load_config(file.path()).unwrap_err();

    assert!(matches!(err, VaxdeskError::Configuration(_)));
    assert!(err.to_string().contains("TEST_VAXDESK_PASSWORD"));
}

#[test]
fn test_env_overrides_take_precedence() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("VAXDESK_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("VAXDESK_API_BASE_URL", "https://override.example.com/");
    std::env::set_var("VAXDESK_API_FILTER_MODE", "server");
    std::env::set_var("VAXDESK_AUTH_REFRESH_ON_UNAUTHORIZED", "false");

    let file = write_config(
        r#"
[application]
log_level = "warn"

[api]
base_url = "http://localhost:8000/"
"#,
    );
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.api.base_url, "https://override.example.com/");
    assert_eq!(config.api.filter_mode, FilterMode::Server);
    assert!(!config.auth.refresh_on_unauthorized);

    cleanup_env_vars();
}

#[test]
fn test_invalid_values_fail_validation() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    for content in [
        "[application]\nlog_level = \"loud\"\n",
        "[api]\nbase_url = \"ftp://example.com\"\n",
        "[api]\ntimeout_seconds = 0\n",
        "[api.retry]\nmax_retries = 0\n",
        "[auth]\nusername = \"nurse\"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
    ] {
        let file = write_config(content);
        let result = load_config(file.path());
        assert!(
            matches!(result, Err(VaxdeskError::Configuration(_))),
            "expected validation failure for {content:?}"
        );
    }
}

#[test]
fn test_missing_file() {
    let err = load_config("/nonexistent/vaxdesk.toml").unwrap_err();
    assert!(err.to_string().contains("Configuration file not found"));
}
