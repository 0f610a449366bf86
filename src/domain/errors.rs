//! Domain error types
//!
//! Errors are domain-specific and never expose the HTTP client's types. The
//! taxonomy follows the three failure paths of the selection form:
//!
//! - [`VaxdeskError::Fetch`] - a read endpoint failed (network, status or decode)
//! - [`VaxdeskError::Submission`] - record creation failed
//! - [`ValidationError::IncompleteSelection`] - local precondition failure, nothing sent

use std::fmt;
use thiserror::Error;

/// Main Vaxdesk error type
#[derive(Debug, Error)]
pub enum VaxdeskError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A read against the reference data source failed
    #[error("Failed to fetch {resource}: {source}")]
    Fetch {
        resource: Resource,
        #[source]
        source: ApiError,
    },

    /// Creating a record on the server failed
    #[error("Failed to submit record: {0}")]
    Submission(#[source] ApiError),

    /// Other API errors (login, token refresh)
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Local validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl VaxdeskError {
    /// Wraps an API error raised while reading `resource`
    pub fn fetch(resource: Resource, source: ApiError) -> Self {
        VaxdeskError::Fetch { resource, source }
    }

    /// Returns true when the server rejected the bearer token
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            VaxdeskError::Fetch {
                source: ApiError::Unauthorized(_),
                ..
            } | VaxdeskError::Submission(ApiError::Unauthorized(_))
                | VaxdeskError::Api(ApiError::Unauthorized(_))
        )
    }
}

/// Collections exposed by the reference data source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Locations,
    Centres,
    Patients,
    VaccinationSlots,
    Records,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Locations => "locations",
            Resource::Centres => "centres",
            Resource::Patients => "patients",
            Resource::VaccinationSlots => "vaccination slots",
            Resource::Records => "records",
        };
        f.write_str(name)
    }
}

/// Errors raised talking to the vaccination REST API
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Failed to reach the server
    #[error("Failed to connect to API server: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Server answered 401
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Response body could not be decoded
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Client error (4xx other than 401)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },
}

impl ApiError {
    /// Whether retrying the same request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::ConnectionFailed(_) | ApiError::Timeout(_) | ApiError::ServerError { .. }
        )
    }
}

/// The four levels of the cascading selection, upstream first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionLevel {
    Location,
    Centre,
    Patient,
    Slot,
}

impl fmt::Display for SelectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectionLevel::Location => "location",
            SelectionLevel::Centre => "centre",
            SelectionLevel::Patient => "patient",
            SelectionLevel::Slot => "slot",
        };
        f.write_str(name)
    }
}

/// Local precondition failures; these never reach the network
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more of the four selections is empty
    #[error("All fields must be selected (missing: {})", join_levels(.missing))]
    IncompleteSelection { missing: Vec<SelectionLevel> },

    /// A level was selected while the level it depends on is empty
    #[error("Cannot select a {level} before a {requires} is selected")]
    UpstreamNotSelected {
        level: SelectionLevel,
        requires: SelectionLevel,
    },

    /// `submit` was called while an earlier submission is still in flight
    #[error("A submission is already in progress")]
    SubmissionInProgress,
}

fn join_levels(levels: &[SelectionLevel]) -> String {
    levels
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// Conversion from std::io::Error
impl From<std::io::Error> for VaxdeskError {
    fn from(err: std::io::Error) -> Self {
        VaxdeskError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for VaxdeskError {
    fn from(err: serde_json::Error) -> Self {
        VaxdeskError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for VaxdeskError {
    fn from(err: toml::de::Error) -> Self {
        VaxdeskError::Configuration(format!("TOML parse error: {err}"))
    }
}
