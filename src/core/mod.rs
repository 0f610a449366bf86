//! Core logic for Vaxdesk.
//!
//! # Modules
//!
//! - [`selection`] - Cascading selection state, detail resolution, record
//!   composition and submission
//!
//! # Workflow
//!
//! 1. **Load Locations**: fetched once when the controller starts
//! 2. **Select**: each upstream selection clears everything below it and
//!    fetches the next collection
//! 3. **Compose**: a complete selection becomes a flat record snapshot
//! 4. **Submit**: the record is posted, the record list reloaded and the
//!    selection reset
//!
//! # Example
//!
//! ```rust,no_run
//! use vaxdesk::adapters::api::ApiClient;
//! use vaxdesk::config::load_config;
//! use vaxdesk::core::selection::SelectionController;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("vaxdesk.toml")?;
//! let controller = SelectionController::new(ApiClient::connect(&config).await?);
//!
//! controller.load_locations().await?;
//! for location in controller.view().locations() {
//!     println!("{}: {}", location.id, location.city);
//! }
//! # Ok(())
//! # }
//! ```

pub mod selection;
