//! Selection state and cascading refresh
//!
//! [`SelectionState`] is a synchronous state machine. Selecting an upstream id
//! clears everything below it and, when a fetch is needed, hands out a
//! [`FetchTicket`]. A fetched collection is only applied if its ticket is still
//! the latest for that level and the upstream id it was issued for is still
//! selected, so the most recent selection always wins.

use crate::domain::{
    Centre, CentreId, Location, LocationId, Patient, PatientId, SelectionLevel, SlotId,
    VaccinationSlot, ValidationError,
};
use crate::log_stale_result;

/// Loading status of one selectable level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelStatus {
    /// Upstream not selected; the collection is empty
    #[default]
    Unselected,
    /// A fetch for the current upstream selection is in flight
    Loading,
    /// The collection holds the result of the latest fetch (possibly empty)
    Populated,
}

/// Handle for one in-flight fetch
///
/// `upstream` is the id the fetch was issued for (`()` for locations).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket<U> {
    upstream: U,
    token: u64,
}

impl<U: Copy> FetchTicket<U> {
    pub fn upstream(&self) -> U {
        self.upstream
    }

    pub fn token(&self) -> u64 {
        self.token
    }
}

/// One loaded collection plus the token of the fetch it is waiting for
#[derive(Debug, Clone)]
struct Collection<T> {
    items: Vec<T>,
    status: LevelStatus,
    pending: Option<u64>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: LevelStatus::Unselected,
            pending: None,
        }
    }
}

impl<T> Collection<T> {
    fn clear(&mut self) {
        self.items.clear();
        self.status = LevelStatus::Unselected;
        self.pending = None;
    }

    fn begin(&mut self, token: u64) {
        self.items.clear();
        self.status = LevelStatus::Loading;
        self.pending = Some(token);
    }

    fn accepts(&self, token: u64) -> bool {
        self.pending == Some(token)
    }

    fn fill(&mut self, items: Vec<T>) {
        self.items = items;
        self.status = LevelStatus::Populated;
        self.pending = None;
    }

    fn latest(&self) -> u64 {
        self.pending.unwrap_or_default()
    }
}

/// Selected ids and the collections they index into
///
/// The location collection is loaded once and survives resets. The centre,
/// patient and slot collections always belong to the currently selected
/// location, centre and patient respectively.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    location: Option<LocationId>,
    centre: Option<CentreId>,
    patient: Option<PatientId>,
    slot: Option<SlotId>,

    locations: Collection<Location>,
    centres: Collection<Centre>,
    patients: Collection<Patient>,
    slots: Collection<VaccinationSlot>,

    next_token: u64,
    revision: u64,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    /// Starts (or restarts) the location load
    pub fn begin_locations(&mut self) -> FetchTicket<()> {
        let token = self.issue();
        self.locations.begin(token);
        FetchTicket {
            upstream: (),
            token,
        }
    }

    /// Applies a location load; returns `false` if a newer load superseded it
    pub fn apply_locations(&mut self, ticket: FetchTicket<()>, locations: Vec<Location>) -> bool {
        if !self.locations.accepts(ticket.token) {
            log_stale_result!(SelectionLevel::Location, ticket.token, self.locations.latest());
            return false;
        }
        self.locations.fill(locations);
        true
    }

    /// Sets or clears the location
    ///
    /// Clears the centre, patient and slot ids and their collections. Returns a
    /// ticket for the centre fetch when a location was selected.
    pub fn select_location(&mut self, id: Option<LocationId>) -> Option<FetchTicket<LocationId>> {
        self.revision += 1;
        self.location = id;
        self.centre = None;
        self.patient = None;
        self.slot = None;
        self.patients.clear();
        self.slots.clear();

        match id {
            Some(location) => {
                let token = self.issue();
                self.centres.begin(token);
                Some(FetchTicket {
                    upstream: location,
                    token,
                })
            }
            None => {
                self.centres.clear();
                None
            }
        }
    }

    /// Applies fetched centres, keeping only those owned by the ticket's location
    pub fn apply_centres(&mut self, ticket: FetchTicket<LocationId>, centres: Vec<Centre>) -> bool {
        if !self.centres.accepts(ticket.token) || self.location != Some(ticket.upstream) {
            log_stale_result!(SelectionLevel::Centre, ticket.token, self.centres.latest());
            return false;
        }
        let owned = centres
            .into_iter()
            .filter(|centre| centre.location_id == ticket.upstream)
            .collect();
        self.centres.fill(owned);
        true
    }

    /// Sets or clears the centre
    ///
    /// Clears the patient and slot ids and their collections.
    ///
    /// # Errors
    ///
    /// [`ValidationError::UpstreamNotSelected`] when selecting a centre with no
    /// location selected; the state is left unchanged.
    pub fn select_centre(
        &mut self,
        id: Option<CentreId>,
    ) -> Result<Option<FetchTicket<CentreId>>, ValidationError> {
        if id.is_some() && self.location.is_none() {
            return Err(ValidationError::UpstreamNotSelected {
                level: SelectionLevel::Centre,
                requires: SelectionLevel::Location,
            });
        }

        self.revision += 1;
        self.centre = id;
        self.patient = None;
        self.slot = None;
        self.slots.clear();

        Ok(match id {
            Some(centre) => {
                let token = self.issue();
                self.patients.begin(token);
                Some(FetchTicket {
                    upstream: centre,
                    token,
                })
            }
            None => {
                self.patients.clear();
                None
            }
        })
    }

    /// Applies fetched patients, keeping only those registered at the ticket's centre
    pub fn apply_patients(&mut self, ticket: FetchTicket<CentreId>, patients: Vec<Patient>) -> bool {
        if !self.patients.accepts(ticket.token) || self.centre != Some(ticket.upstream) {
            log_stale_result!(SelectionLevel::Patient, ticket.token, self.patients.latest());
            return false;
        }
        let owned = patients
            .into_iter()
            .filter(|patient| patient.centre == ticket.upstream)
            .collect();
        self.patients.fill(owned);
        true
    }

    /// Sets or clears the patient
    ///
    /// Clears the slot id and the slot collection.
    ///
    /// # Errors
    ///
    /// [`ValidationError::UpstreamNotSelected`] when no centre is selected.
    pub fn select_patient(
        &mut self,
        id: Option<PatientId>,
    ) -> Result<Option<FetchTicket<PatientId>>, ValidationError> {
        if id.is_some() && self.centre.is_none() {
            return Err(ValidationError::UpstreamNotSelected {
                level: SelectionLevel::Patient,
                requires: SelectionLevel::Centre,
            });
        }

        self.revision += 1;
        self.patient = id;
        self.slot = None;

        Ok(match id {
            Some(patient) => {
                let token = self.issue();
                self.slots.begin(token);
                Some(FetchTicket {
                    upstream: patient,
                    token,
                })
            }
            None => {
                self.slots.clear();
                None
            }
        })
    }

    /// Applies fetched slots, keeping only those belonging to the ticket's patient
    pub fn apply_slots(
        &mut self,
        ticket: FetchTicket<PatientId>,
        slots: Vec<VaccinationSlot>,
    ) -> bool {
        if !self.slots.accepts(ticket.token) || self.patient != Some(ticket.upstream) {
            log_stale_result!(SelectionLevel::Slot, ticket.token, self.slots.latest());
            return false;
        }
        let owned = slots
            .into_iter()
            .filter(|slot| slot.patient == ticket.upstream)
            .collect();
        self.slots.fill(owned);
        true
    }

    /// Sets or clears the slot; nothing depends on it, so no fetch is needed
    ///
    /// # Errors
    ///
    /// [`ValidationError::UpstreamNotSelected`] when no patient is selected.
    pub fn select_slot(&mut self, id: Option<SlotId>) -> Result<(), ValidationError> {
        if id.is_some() && self.patient.is_none() {
            return Err(ValidationError::UpstreamNotSelected {
                level: SelectionLevel::Slot,
                requires: SelectionLevel::Patient,
            });
        }
        self.revision += 1;
        self.slot = id;
        Ok(())
    }

    /// Clears all four selections and the dependent collections
    ///
    /// Pending fetches become stale. The location collection is kept.
    pub fn reset(&mut self) {
        self.select_location(None);
    }

    /// Counter bumped by every selection change, including resets
    ///
    /// Loading results does not change it.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn location(&self) -> Option<LocationId> {
        self.location
    }

    pub fn centre(&self) -> Option<CentreId> {
        self.centre
    }

    pub fn patient(&self) -> Option<PatientId> {
        self.patient
    }

    pub fn slot(&self) -> Option<SlotId> {
        self.slot
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations.items
    }

    pub fn centres(&self) -> &[Centre] {
        &self.centres.items
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients.items
    }

    pub fn slots(&self) -> &[VaccinationSlot] {
        &self.slots.items
    }

    /// Loading status of the collection offered at `level`
    pub fn status(&self, level: SelectionLevel) -> LevelStatus {
        match level {
            SelectionLevel::Location => self.locations.status,
            SelectionLevel::Centre => self.centres.status,
            SelectionLevel::Patient => self.patients.status,
            SelectionLevel::Slot => self.slots.status,
        }
    }

    /// Levels with no selection, upstream first
    pub fn missing(&self) -> Vec<SelectionLevel> {
        [
            (SelectionLevel::Location, self.location.is_none()),
            (SelectionLevel::Centre, self.centre.is_none()),
            (SelectionLevel::Patient, self.patient.is_none()),
            (SelectionLevel::Slot, self.slot.is_none()),
        ]
        .into_iter()
        .filter_map(|(level, empty)| empty.then_some(level))
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.missing().len() == 4
    }
}
