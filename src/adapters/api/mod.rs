//! Vaccination REST API adapter
//!
//! - [`ReferenceDataSource`]: the async seam the selection controller uses
//! - [`ApiClient`]: reqwest implementation with bearer auth and retries
//! - [`Routes`]: endpoint URLs relative to the configured base URL
//! - [`Session`]: access/refresh token state

pub mod client;
pub mod routes;
pub mod session;
pub mod source;

pub use client::ApiClient;
pub use routes::Routes;
pub use session::{Session, TokenPair};
pub use source::ReferenceDataSource;
