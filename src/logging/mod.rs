//! Logging and observability
//!
//! Structured logging through `tracing`, with:
//! - Console output on stderr
//! - Optional JSON file output with rotation
//! - Shared macros for the events every layer emits the same way
//!
//! # Example
//!
//! ```no_run
//! use vaxdesk::logging::init_logging;
//! use vaxdesk::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a failed reference data fetch
///
/// # Example
///
/// ```no_run
/// use vaxdesk::log_fetch_failure;
/// use vaxdesk::domain::{ApiError, Resource, VaxdeskError};
///
/// let error = VaxdeskError::fetch(Resource::Centres, ApiError::Timeout("30s".into()));
/// log_fetch_failure!(Resource::Centres, &error);
/// ```
#[macro_export]
macro_rules! log_fetch_failure {
    ($resource:expr, $error:expr) => {
        tracing::error!(
            resource = %$resource,
            error = %$error,
            "Failed to fetch reference data"
        );
    };
}

/// Log a fetch result that arrived after a newer selection superseded it
///
/// # Example
///
/// ```no_run
/// use vaxdesk::log_stale_result;
/// use vaxdesk::domain::SelectionLevel;
///
/// log_stale_result!(SelectionLevel::Patient, 3u64, 4u64);
/// ```
#[macro_export]
macro_rules! log_stale_result {
    ($level:expr, $ticket:expr, $latest:expr) => {
        tracing::debug!(
            level = %$level,
            ticket = $ticket,
            latest = $latest,
            "Discarding stale fetch result"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use vaxdesk::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, 1000u64, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $delay_ms:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            delay_ms = $delay_ms,
            reason = %$reason,
            "Retrying request"
        );
    };
}
