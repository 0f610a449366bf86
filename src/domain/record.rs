//! Composed appointment records
//!
//! A [`ComposedRecord`] is a flattened, display-ready snapshot of one full
//! location → centre → patient → slot selection. Every field is a string copied
//! at composition time; the record is never updated afterwards.

use super::ids::RecordId;
use serde::{Deserialize, Serialize};

/// Literal substituted for any field that is empty when a record is composed
pub const FALLBACK_FIELD: &str = "Unknown";

/// Column headers in display order, matching [`ComposedRecord::cells`]
pub const RECORD_COLUMNS: [&str; 12] = [
    "Location",
    "Location State",
    "Location Country",
    "Centre",
    "Centre Address",
    "Patient",
    "Patient Age",
    "Patient Contact",
    "Slot",
    "Slot Date",
    "Slot Time",
    "Available Slots",
];

/// Flattened appointment record as sent to `POST added-records`
///
/// # Examples
///
/// ```
/// use vaxdesk::domain::record::{ComposedRecord, FALLBACK_FIELD};
///
/// let record = ComposedRecord::builder()
///     .location("Delhi", "DL", "IN")
///     .centre("C1", "Addr1")
///     .patient("Amit", "30", "M")
///     .slot("Dose1", "2024-01-01", "09:00", "")
///     .build();
///
/// assert_eq!(record.location, "Delhi");
/// assert_eq!(record.available_slots, FALLBACK_FIELD);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedRecord {
    /// Location city
    pub location: String,
    pub location_state: String,
    pub location_country: String,
    /// Centre name
    pub centre: String,
    pub centre_address: String,
    /// Patient name
    pub patient: String,
    pub patient_age: String,
    /// Patient gender, labelled "contact" by the API
    pub patient_contact: String,
    /// Slot type
    pub slot: String,
    pub slot_date: String,
    pub slot_time: String,
    pub available_slots: String,
}

impl ComposedRecord {
    /// Creates a new builder for constructing a ComposedRecord
    pub fn builder() -> ComposedRecordBuilder {
        ComposedRecordBuilder::default()
    }

    /// Returns the twelve fields in [`RECORD_COLUMNS`] order
    pub fn cells(&self) -> [&str; 12] {
        [
            self.location.as_str(),
            self.location_state.as_str(),
            self.location_country.as_str(),
            self.centre.as_str(),
            self.centre_address.as_str(),
            self.patient.as_str(),
            self.patient_age.as_str(),
            self.patient_contact.as_str(),
            self.slot.as_str(),
            self.slot_date.as_str(),
            self.slot_time.as_str(),
            self.available_slots.as_str(),
        ]
    }
}

/// A record as returned by `GET added-records`, with its server-assigned id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub id: RecordId,

    #[serde(flatten)]
    pub record: ComposedRecord,
}

/// Builder for [`ComposedRecord`]
///
/// Unset or empty fields become [`FALLBACK_FIELD`] on [`build`](Self::build),
/// so building never fails.
#[derive(Debug, Default)]
pub struct ComposedRecordBuilder {
    location: Option<String>,
    location_state: Option<String>,
    location_country: Option<String>,
    centre: Option<String>,
    centre_address: Option<String>,
    patient: Option<String>,
    patient_age: Option<String>,
    patient_contact: Option<String>,
    slot: Option<String>,
    slot_date: Option<String>,
    slot_time: Option<String>,
    available_slots: Option<String>,
}

impl ComposedRecordBuilder {
    /// Creates a new ComposedRecordBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the location fields
    pub fn location(
        mut self,
        city: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        self.location = Some(city.into());
        self.location_state = Some(state.into());
        self.location_country = Some(country.into());
        self
    }

    /// Sets the centre fields
    pub fn centre(mut self, name: impl Into<String>, address: impl Into<String>) -> Self {
        self.centre = Some(name.into());
        self.centre_address = Some(address.into());
        self
    }

    /// Sets the patient fields
    pub fn patient(
        mut self,
        name: impl Into<String>,
        age: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        self.patient = Some(name.into());
        self.patient_age = Some(age.into());
        self.patient_contact = Some(contact.into());
        self
    }

    /// Sets the slot fields
    pub fn slot(
        mut self,
        slot_type: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        available: impl Into<String>,
    ) -> Self {
        self.slot = Some(slot_type.into());
        self.slot_date = Some(date.into());
        self.slot_time = Some(time.into());
        self.available_slots = Some(available.into());
        self
    }

    /// Builds the record, substituting the fallback for empty fields
    pub fn build(self) -> ComposedRecord {
        ComposedRecord {
            location: or_fallback(self.location),
            location_state: or_fallback(self.location_state),
            location_country: or_fallback(self.location_country),
            centre: or_fallback(self.centre),
            centre_address: or_fallback(self.centre_address),
            patient: or_fallback(self.patient),
            patient_age: or_fallback(self.patient_age),
            patient_contact: or_fallback(self.patient_contact),
            slot: or_fallback(self.slot),
            slot_date: or_fallback(self.slot_date),
            slot_time: or_fallback(self.slot_time),
            available_slots: or_fallback(self.available_slots),
        }
    }
}

fn or_fallback(value: Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => FALLBACK_FIELD.to_string(),
    }
}
