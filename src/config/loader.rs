//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{FilterMode, VaxdeskConfig};
use super::secret::secret_string;
use crate::domain::errors::VaxdeskError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into VaxdeskConfig
/// 4. Applies environment variable overrides (VAXDESK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`VaxdeskError::Configuration`] if the file is missing or unreadable,
/// the TOML is malformed, a referenced variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use vaxdesk::config::loader::load_config;
///
/// let config = load_config("vaxdesk.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<VaxdeskConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(VaxdeskError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        VaxdeskError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Parses configuration from TOML text, applying substitution, overrides and validation
///
/// # Errors
///
/// Same as [`load_config`], minus the file access failures.
pub fn load_config_from_str(contents: &str) -> Result<VaxdeskConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: VaxdeskConfig = toml::from_str(&contents)
        .map_err(|e| VaxdeskError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        VaxdeskError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied verbatim.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| VaxdeskError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(VaxdeskError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the VAXDESK_* prefix
///
/// Variables follow the pattern `VAXDESK_<SECTION>_<KEY>`, for example
/// `VAXDESK_API_BASE_URL` or `VAXDESK_AUTH_ACCESS_TOKEN`.
fn apply_env_overrides(config: &mut VaxdeskConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("VAXDESK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // API overrides
    if let Ok(val) = std::env::var("VAXDESK_API_BASE_URL") {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("VAXDESK_API_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.api.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("VAXDESK_API_TLS_VERIFY") {
        config.api.tls_verify = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("VAXDESK_API_FILTER_MODE") {
        config.api.filter_mode = match val.to_lowercase().as_str() {
            "client" => FilterMode::Client,
            "server" => FilterMode::Server,
            other => {
                return Err(VaxdeskError::Configuration(format!(
                    "Invalid VAXDESK_API_FILTER_MODE '{other}'. Must be one of: client, server"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("VAXDESK_API_RETRY_MAX_RETRIES") {
        if let Ok(retries) = val.parse() {
            config.api.retry.max_retries = retries;
        }
    }

    // Auth overrides
    if let Ok(val) = std::env::var("VAXDESK_AUTH_USERNAME") {
        config.auth.username = Some(val);
    }
    if let Ok(val) = std::env::var("VAXDESK_AUTH_PASSWORD") {
        config.auth.password = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("VAXDESK_AUTH_ACCESS_TOKEN") {
        config.auth.access_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("VAXDESK_AUTH_REFRESH_TOKEN") {
        config.auth.refresh_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("VAXDESK_AUTH_REFRESH_ON_UNAUTHORIZED") {
        config.auth.refresh_on_unauthorized = val.parse().unwrap_or(true);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("VAXDESK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("VAXDESK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("VAXDESK_LOADER_TEST_VAR", "test_value");
        let input = "password = \"${VAXDESK_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"\n");
        std::env::remove_var("VAXDESK_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("VAXDESK_LOADER_MISSING_VAR");
        let input = "password = \"${VAXDESK_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("VAXDESK_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let input = "# token = \"${VAXDESK_LOADER_COMMENTED_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${VAXDESK_LOADER_COMMENTED_VAR}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(VaxdeskError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[api]
base_url = "https://vaccination.example.com/"
filter_mode = "server"

[auth]
username = "nurse"
password = "secret"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.api.base_url, "https://vaccination.example.com/");
        assert_eq!(config.api.filter_mode, FilterMode::Server);
        assert!(config.auth.has_credentials());
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let toml_content = r#"
[api]
base_url = "vaccination.example.com"
"#;
        let err = load_config_from_str(toml_content).unwrap_err();
        assert!(err.to_string().contains("Configuration validation failed"));
    }
}
