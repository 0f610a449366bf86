//! Derived detail resolver
//!
//! Maps a selected id and its loaded collection to the read-only fields shown
//! for that selection. An empty id or an id that is not (yet) in the
//! collection resolves to an empty detail; that is the normal state while a
//! collection is loading.

use super::state::SelectionState;
use crate::domain::{Centre, Entity, Location, Patient, VaccinationSlot};

/// Finds the entity with `id` in `collection`
pub fn resolve<E: Entity>(collection: &[E], id: Option<E::Id>) -> Option<&E> {
    let id = id?;
    collection.iter().find(|entity| entity.id() == id)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationDetail {
    pub city: String,
    pub state: String,
    pub country: String,
}

impl From<&Location> for LocationDetail {
    fn from(location: &Location) -> Self {
        Self {
            city: location.city.clone(),
            state: location.state.clone(),
            country: location.country.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CentreDetail {
    pub name: String,
    pub address: String,
}

impl From<&Centre> for CentreDetail {
    fn from(centre: &Centre) -> Self {
        Self {
            name: centre.name.clone(),
            address: centre.address.clone(),
        }
    }
}

/// Patient fields as display strings; `age` is empty when unresolved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientDetail {
    pub name: String,
    pub age: String,
    pub gender: String,
}

impl From<&Patient> for PatientDetail {
    fn from(patient: &Patient) -> Self {
        Self {
            name: patient.patient_name.clone(),
            age: patient.age.to_string(),
            gender: patient.gender.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotDetail {
    pub slot_type: String,
    pub date: String,
    pub time: String,
    pub available_slots: String,
}

impl From<&VaccinationSlot> for SlotDetail {
    fn from(slot: &VaccinationSlot) -> Self {
        Self {
            slot_type: slot.slot_type.clone(),
            date: slot.date.clone(),
            time: slot.time.clone(),
            available_slots: slot.available_slots.to_string(),
        }
    }
}

/// Details of all four current selections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionDetails {
    pub location: LocationDetail,
    pub centre: CentreDetail,
    pub patient: PatientDetail,
    pub slot: SlotDetail,
}

impl SelectionDetails {
    pub fn resolve(state: &SelectionState) -> Self {
        Self {
            location: detail_of(state.locations(), state.location()),
            centre: detail_of(state.centres(), state.centre()),
            patient: detail_of(state.patients(), state.patient()),
            slot: detail_of(state.slots(), state.slot()),
        }
    }
}

fn detail_of<'a, E, D>(collection: &'a [E], id: Option<E::Id>) -> D
where
    E: Entity,
    D: Default + From<&'a E>,
{
    resolve(collection, id).map(D::from).unwrap_or_default()
}
