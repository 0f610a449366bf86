//! Domain models and types for Vaxdesk.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`LocationId`], [`CentreId`], [`PatientId`], [`SlotId`])
//! - **Reference entities** ([`Location`], [`Centre`], [`Patient`], [`VaccinationSlot`])
//! - **Composed records** ([`ComposedRecord`], [`PersistedRecord`])
//! - **Error types** ([`VaxdeskError`], [`ApiError`], [`ValidationError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Each entity kind has its own identifier newtype:
//!
//! ```rust
//! use vaxdesk::domain::{CentreId, PatientId};
//!
//! let centre = CentreId::new(10);
//! let patient = PatientId::new(100);
//!
//! // This won't compile - ids of different levels cannot be mixed
//! // let wrong: CentreId = patient;
//! # let _ = (centre, patient);
//! ```

pub mod entities;
pub mod errors;
pub mod ids;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use entities::{Centre, Entity, Location, Patient, VaccinationSlot};
pub use errors::{ApiError, Resource, SelectionLevel, ValidationError, VaxdeskError};
pub use ids::{CentreId, LocationId, PatientId, RecordId, SlotId};
pub use record::{
    ComposedRecord, ComposedRecordBuilder, PersistedRecord, FALLBACK_FIELD, RECORD_COLUMNS,
};
pub use result::Result;
