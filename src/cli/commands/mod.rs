//! CLI command implementations
//!
//! Every command returns a process exit code:
//! 0 success, 2 configuration error, 3 validation error,
//! 4 connection or API error, 5 fatal error.

pub mod add;
pub mod init;
pub mod login;
pub mod options;
pub mod records;
pub mod validate;

use crate::adapters::api::ApiClient;
use crate::cli::output::ConsoleSurface;
use crate::config::{load_config, VaxdeskConfig};
use crate::core::selection::SelectionController;
use crate::domain::VaxdeskError;

/// Console-backed controller used by the interactive commands
pub type ConsoleController = SelectionController<ApiClient, ConsoleSurface>;

/// Maps an error to the exit code reported for it
pub fn exit_code_for(error: &VaxdeskError) -> i32 {
    match error {
        VaxdeskError::Configuration(_) => 2,
        VaxdeskError::Validation(_) => 3,
        VaxdeskError::Fetch { .. } | VaxdeskError::Submission(_) | VaxdeskError::Api(_) => 4,
        VaxdeskError::Serialization(_) | VaxdeskError::Io(_) => 5,
    }
}

/// Loads the configuration, printing the failure
fn load_or_report(config_path: &str) -> Result<VaxdeskConfig, i32> {
    load_config(config_path).map_err(|e| {
        println!("❌ Failed to load configuration file: {config_path}");
        println!("   Error: {e}");
        exit_code_for(&e)
    })
}

/// Loads the configuration and connects a console controller to the API
async fn connect(config_path: &str) -> Result<ConsoleController, i32> {
    let config = load_or_report(config_path)?;

    match ApiClient::connect(&config).await {
        Ok(client) => Ok(SelectionController::with_surface(client, ConsoleSurface)),
        Err(e) => {
            tracing::error!(error = %e, base_url = %config.api.base_url, "Failed to connect");
            println!("❌ Failed to connect to {}", config.api.base_url);
            println!("   Error: {e}");
            Err(exit_code_for(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApiError, Resource, ValidationError};
    use test_case::test_case;

    #[test_case(VaxdeskError::Configuration("bad".into()), 2; "configuration")]
    #[test_case(ValidationError::IncompleteSelection { missing: vec![] }.into(), 3; "validation")]
    #[test_case(VaxdeskError::fetch(Resource::Centres, ApiError::Timeout("t".into())), 4; "fetch")]
    #[test_case(VaxdeskError::Submission(ApiError::ServerError { status: 500, message: String::new() }), 4; "submission")]
    #[test_case(VaxdeskError::Api(ApiError::Unauthorized("no".into())), 4; "api")]
    #[test_case(VaxdeskError::Io("disk".into()), 5; "io")]
    fn test_exit_code_for(error: VaxdeskError, expected: i32) {
        assert_eq!(exit_code_for(&error), expected);
    }
}
