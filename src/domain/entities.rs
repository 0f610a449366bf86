//! Reference entities served by the vaccination API
//!
//! These mirror the JSON payloads of the read endpoints. Ownership between
//! levels is expressed by id (`location_id`, `centre`, `patient`); nested arrays
//! the server may embed are ignored.

use super::ids::{CentreId, LocationId, PatientId, SlotId};
use serde::{Deserialize, Serialize};

/// An entity that can be looked up by id within a loaded collection
pub trait Entity {
    /// Identifier type for this entity kind
    type Id: Copy + Eq;

    /// Returns this entity's identifier
    fn id(&self) -> Self::Id;
}

/// A geographic location that owns zero or more centres
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub country: String,
    pub state: String,
    pub city: String,
}

/// A vaccination centre belonging to a location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Centre {
    pub id: CentreId,
    pub name: String,
    pub address: String,
    /// Owning location
    pub location_id: LocationId,
}

/// A patient registered at a centre
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub patient_name: String,
    pub age: u32,
    pub gender: String,
    /// Owning centre
    pub centre: CentreId,
}

/// A bookable vaccination slot for a patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccinationSlot {
    pub id: SlotId,
    /// Dose or vaccine type, e.g. "Dose1"
    #[serde(rename = "type")]
    pub slot_type: String,
    /// Date as sent by the server ("YYYY-MM-DD")
    pub date: String,
    /// Time as sent by the server ("HH:MM" or "HH:MM:SS")
    pub time: String,
    pub available_slots: u32,
    /// Owning patient
    pub patient: PatientId,
}

impl Entity for Location {
    type Id = LocationId;

    fn id(&self) -> LocationId {
        self.id
    }
}

impl Entity for Centre {
    type Id = CentreId;

    fn id(&self) -> CentreId {
        self.id
    }
}

impl Entity for Patient {
    type Id = PatientId;

    fn id(&self) -> PatientId {
        self.id
    }
}

impl Entity for VaccinationSlot {
    type Id = SlotId;

    fn id(&self) -> SlotId {
        self.id
    }
}
