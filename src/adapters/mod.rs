//! External system integrations for Vaxdesk.
//!
//! - [`api`] - Vaccination REST API (reference data, records, bearer auth)
//!
//! # Design Pattern
//!
//! The selection controller depends on the [`api::ReferenceDataSource`] trait
//! rather than on the HTTP client, so tests drive it with in-memory sources.
//!
//! ```rust,no_run
//! use vaxdesk::adapters::api::{ApiClient, ReferenceDataSource};
//! use vaxdesk::config::VaxdeskConfig;
//! use vaxdesk::domain::LocationId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::connect(&VaxdeskConfig::default()).await?;
//! let centres = client.fetch_centres(LocationId::new(1)).await?;
//! # let _ = centres;
//! # Ok(())
//! # }
//! ```

pub mod api;
