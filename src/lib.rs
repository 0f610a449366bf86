// Vaxdesk - Vaccination Appointment Desk
// Copyright (c) 2025 Vaxdesk Contributors
// Licensed under the MIT License

//! # Vaxdesk - Vaccination Appointment Desk
//!
//! Vaxdesk records vaccination appointments by walking a cascading selection
//! of Location → Centre → Patient → Slot served by a REST API, composing a
//! flat record from the four selections and submitting it.
//!
//! ## Architecture
//!
//! Vaxdesk follows a layered architecture:
//!
//! - [`cli`] - Command-line interface; the terminal is the display surface
//! - [`core`] - Selection state, detail resolution, record composition
//! - [`adapters`] - The vaccination REST API client
//! - [`domain`] - Identifiers, entities, records and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vaxdesk::adapters::api::ApiClient;
//! use vaxdesk::config::load_config;
//! use vaxdesk::core::selection::SelectionController;
//! use vaxdesk::domain::{CentreId, LocationId, PatientId, SlotId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("vaxdesk.toml")?;
//!     let controller = SelectionController::new(ApiClient::connect(&config).await?);
//!
//!     controller.load_locations().await?;
//!     controller.select_location(Some(LocationId::new(1))).await?;
//!     controller.select_centre(Some(CentreId::new(10))).await?;
//!     controller.select_patient(Some(PatientId::new(100))).await?;
//!     controller.select_slot(Some(SlotId::new(1000)))?;
//!
//!     let record = controller.submit().await?;
//!     println!("Created record {}", record.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Last Selection Wins
//!
//! Every fetch triggered by a selection carries a ticket. When results arrive
//! out of order, only the result for the latest ticket of a level is applied,
//! and only while the upstream id it was fetched for is still selected.
//!
//! ## Error Handling
//!
//! Library code returns [`domain::Result`] with [`domain::VaxdeskError`]:
//!
//! ```rust,no_run
//! use vaxdesk::domain::VaxdeskError;
//!
//! fn example() -> Result<(), VaxdeskError> {
//!     let config = vaxdesk::config::load_config("vaxdesk.toml")?;
//!     println!("{}", config.api.base_url);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
