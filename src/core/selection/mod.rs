//! Cascading selection of Location → Centre → Patient → Slot
//!
//! - [`state`] - selected ids, loaded collections and fetch tickets
//! - [`detail`] - resolves selected ids to display fields
//! - [`composer`] - builds a [`ComposedRecord`](crate::domain::ComposedRecord)
//!   from a complete selection
//! - [`controller`] - async controller tying the state to a data source
//! - [`surface`] - the display collaborator receiving records and errors

pub mod composer;
pub mod controller;
pub mod detail;
pub mod state;
pub mod surface;

pub use composer::compose;
pub use controller::SelectionController;
pub use detail::{CentreDetail, LocationDetail, PatientDetail, SelectionDetails, SlotDetail};
pub use state::{FetchTicket, LevelStatus, SelectionState};
pub use surface::{DisplaySurface, NullSurface};
