//! Record composer
//!
//! Builds a [`ComposedRecord`] snapshot from the four resolved details.

use super::detail::SelectionDetails;
use super::state::SelectionState;
use crate::domain::{ComposedRecord, ValidationError};

/// Composes a record from a complete selection
///
/// Fields whose detail is empty (for example because a collection was still
/// loading) become [`FALLBACK_FIELD`](crate::domain::FALLBACK_FIELD).
///
/// # Errors
///
/// [`ValidationError::IncompleteSelection`] naming every empty level.
pub fn compose(state: &SelectionState) -> Result<ComposedRecord, ValidationError> {
    let missing = state.missing();
    if !missing.is_empty() {
        return Err(ValidationError::IncompleteSelection { missing });
    }

    Ok(record_from(SelectionDetails::resolve(state)))
}

fn record_from(details: SelectionDetails) -> ComposedRecord {
    let SelectionDetails {
        location,
        centre,
        patient,
        slot,
    } = details;

    ComposedRecord::builder()
        .location(location.city, location.state, location.country)
        .centre(centre.name, centre.address)
        .patient(patient.name, patient.age, patient.gender)
        .slot(slot.slot_type, slot.date, slot.time, slot.available_slots)
        .build()
}
