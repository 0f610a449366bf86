//! Selection controller
//!
//! Async façade over [`SelectionState`] and a [`ReferenceDataSource`]. The state
//! lock is only ever held between awaits, never across one. Overlapping
//! selections interleave and the ticket check in the state decides which fetch
//! result survives. Only one submission runs at a time, and it resets the
//! selection only if nothing was selected while its POST was in flight.

use super::composer;
use super::detail::SelectionDetails;
use super::state::SelectionState;
use super::surface::{DisplaySurface, NullSurface};
use crate::adapters::api::ReferenceDataSource;
use crate::domain::{
    CentreId, ComposedRecord, LocationId, PatientId, PersistedRecord, Resource, Result, SlotId,
    ValidationError, VaxdeskError,
};
use crate::log_fetch_failure;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Cascading Location → Centre → Patient → Slot selection backed by a data source
///
/// # Example
///
/// ```rust,no_run
/// use vaxdesk::adapters::api::ApiClient;
/// use vaxdesk::config::VaxdeskConfig;
/// use vaxdesk::core::selection::SelectionController;
/// use vaxdesk::domain::{CentreId, LocationId, PatientId, SlotId};
///
/// # async fn example() -> vaxdesk::domain::Result<()> {
/// let client = ApiClient::connect(&VaxdeskConfig::default()).await?;
/// let controller = SelectionController::new(client);
///
/// controller.load_locations().await?;
/// controller.select_location(Some(LocationId::new(1))).await?;
/// controller.select_centre(Some(CentreId::new(10))).await?;
/// controller.select_patient(Some(PatientId::new(100))).await?;
/// controller.select_slot(Some(SlotId::new(1000)))?;
///
/// let record = controller.submit().await?;
/// println!("Created record {}", record.id);
/// # Ok(())
/// # }
/// ```
pub struct SelectionController<S, D = NullSurface> {
    source: S,
    surface: D,
    state: Mutex<SelectionState>,
    records: Mutex<Vec<PersistedRecord>>,
    submitting: AtomicBool,
}

/// Holds the submission flag; released on drop
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: ReferenceDataSource> SelectionController<S, NullSurface> {
    pub fn new(source: S) -> Self {
        Self::with_surface(source, NullSurface)
    }
}

impl<S: ReferenceDataSource, D: DisplaySurface> SelectionController<S, D> {
    pub fn with_surface(source: S, surface: D) -> Self {
        Self {
            source,
            surface,
            state: Mutex::new(SelectionState::new()),
            records: Mutex::new(Vec::new()),
            submitting: AtomicBool::new(false),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    fn state(&self) -> MutexGuard<'_, SelectionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads (or reloads) the location collection
    ///
    /// # Errors
    ///
    /// Returns the fetch error after emptying the collection and reporting it.
    pub async fn load_locations(&self) -> Result<()> {
        let ticket = self.state().begin_locations();
        tracing::debug!("Fetching locations");

        let fetched = self.source.fetch_locations().await;
        self.settle(Resource::Locations, fetched, |state, items| {
            state.apply_locations(ticket, items)
        })
    }

    /// Sets or clears the location and refreshes the centres for it
    ///
    /// # Errors
    ///
    /// Returns the fetch error if the centre fetch fails and is still current.
    pub async fn select_location(&self, id: Option<LocationId>) -> Result<()> {
        let ticket = self.state().select_location(id);
        let Some(ticket) = ticket else {
            tracing::debug!("Location cleared");
            return Ok(());
        };

        tracing::debug!(location_id = %ticket.upstream(), "Location selected, fetching centres");
        let fetched = self.source.fetch_centres(ticket.upstream()).await;
        self.settle(Resource::Centres, fetched, |state, items| {
            state.apply_centres(ticket, items)
        })
    }

    /// Sets or clears the centre and refreshes the patients registered there
    ///
    /// # Errors
    ///
    /// [`VaxdeskError::Validation`] if no location is selected, or the fetch error.
    pub async fn select_centre(&self, id: Option<CentreId>) -> Result<()> {
        let selected = self.state().select_centre(id);
        let Some(ticket) = self.validated(selected)? else {
            tracing::debug!("Centre cleared");
            return Ok(());
        };

        tracing::debug!(centre_id = %ticket.upstream(), "Centre selected, fetching patients");
        let fetched = self.source.fetch_patients(ticket.upstream()).await;
        self.settle(Resource::Patients, fetched, |state, items| {
            state.apply_patients(ticket, items)
        })
    }

    /// Sets or clears the patient and refreshes that patient's slots
    ///
    /// # Errors
    ///
    /// [`VaxdeskError::Validation`] if no centre is selected, or the fetch error.
    pub async fn select_patient(&self, id: Option<PatientId>) -> Result<()> {
        let selected = self.state().select_patient(id);
        let Some(ticket) = self.validated(selected)? else {
            tracing::debug!("Patient cleared");
            return Ok(());
        };

        tracing::debug!(patient_id = %ticket.upstream(), "Patient selected, fetching slots");
        let fetched = self.source.fetch_slots(ticket.upstream()).await;
        self.settle(Resource::VaccinationSlots, fetched, |state, items| {
            state.apply_slots(ticket, items)
        })
    }

    /// Sets or clears the slot
    ///
    /// # Errors
    ///
    /// [`VaxdeskError::Validation`] if no patient is selected.
    pub fn select_slot(&self, id: Option<SlotId>) -> Result<()> {
        let selected = self.state().select_slot(id);
        self.validated(selected)
    }

    /// Details of the current selections
    pub fn details(&self) -> SelectionDetails {
        SelectionDetails::resolve(&self.state())
    }

    /// Snapshot of ids, collections and level statuses
    pub fn view(&self) -> SelectionState {
        self.state().clone()
    }

    /// Composes a record from the current selections without submitting it
    ///
    /// # Errors
    ///
    /// [`ValidationError::IncompleteSelection`] if any level is empty.
    pub fn compose(&self) -> std::result::Result<ComposedRecord, ValidationError> {
        composer::compose(&self.state())
    }

    /// Composes and submits a record, then reloads records and resets the selection
    ///
    /// Nothing is sent when the selection is incomplete or another submission
    /// is in flight. On a failed POST the selection is kept so the caller can
    /// retry. A failed record reload after a successful POST is reported but
    /// does not fail the submission. The reset is skipped when the selection
    /// changed while the POST was in flight.
    ///
    /// # Errors
    ///
    /// [`VaxdeskError::Validation`] or [`VaxdeskError::Submission`].
    pub async fn submit(&self) -> Result<PersistedRecord> {
        let (composed, revision) = {
            let state = self.state();
            (composer::compose(&state), state.revision())
        };

        let record = match composed {
            Ok(record) => record,
            Err(e) => return Err(self.blocked(e)),
        };

        let Some(_in_flight) = InFlight::acquire(&self.submitting) else {
            return Err(self.blocked(ValidationError::SubmissionInProgress));
        };

        let persisted = match self.source.submit_record(&record).await {
            Ok(persisted) => persisted,
            Err(error) => {
                tracing::error!(error = %error, "Failed to submit record, selection kept for retry");
                self.surface.report_error(&error);
                return Err(error);
            }
        };

        tracing::info!(
            record_id = persisted.id,
            location = %persisted.record.location,
            patient = %persisted.record.patient,
            "Record submitted"
        );
        self.surface.record_added(&persisted);

        if let Err(e) = self.load_records().await {
            tracing::warn!(error = %e, "Record list not refreshed after submission");
        }

        {
            let mut state = self.state();
            if state.revision() == revision {
                state.reset();
            } else {
                tracing::debug!("Selection changed during submission, keeping it");
            }
        }

        Ok(persisted)
    }

    fn blocked(&self, reason: ValidationError) -> VaxdeskError {
        tracing::warn!(error = %reason, "Submission blocked");
        let error = VaxdeskError::from(reason);
        self.surface.report_error(&error);
        error
    }

    /// Clears all four selections without any network call
    pub fn discard(&self) {
        self.state().reset();
        tracing::debug!("Selection discarded");
    }

    /// Reloads the record list from the server
    ///
    /// On failure the previously loaded records are kept.
    ///
    /// # Errors
    ///
    /// Returns the fetch error after reporting it.
    pub async fn load_records(&self) -> Result<()> {
        match self.source.fetch_records().await {
            Ok(records) => {
                tracing::debug!(count = records.len(), "Records loaded");
                self.surface.records_changed(&records);
                *self.records.lock().unwrap_or_else(PoisonError::into_inner) = records;
                Ok(())
            }
            Err(error) => {
                log_fetch_failure!(Resource::Records, &error);
                self.surface.report_error(&error);
                Err(error)
            }
        }
    }

    /// Records as last loaded from the server
    pub fn records(&self) -> Vec<PersistedRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn validated<T>(&self, selected: std::result::Result<T, ValidationError>) -> Result<T> {
        selected.map_err(|e| {
            tracing::warn!(error = %e, "Selection rejected");
            let error = VaxdeskError::from(e);
            self.surface.report_error(&error);
            error
        })
    }

    /// Applies a fetch outcome; a failure that is still current empties the
    /// collection and is reported, a stale one is dropped
    fn settle<T>(
        &self,
        resource: Resource,
        fetched: Result<Vec<T>>,
        apply: impl FnOnce(&mut SelectionState, Vec<T>) -> bool,
    ) -> Result<()> {
        match fetched {
            Ok(items) => {
                let mut state = self.state();
                apply(&mut state, items);
                Ok(())
            }
            Err(error) => {
                let applied = {
                    let mut state = self.state();
                    apply(&mut state, Vec::new())
                };
                if !applied {
                    tracing::debug!(resource = %resource, error = %error, "Ignoring failure of superseded fetch");
                    return Ok(());
                }
                log_fetch_failure!(resource, &error);
                self.surface.report_error(&error);
                Err(error)
            }
        }
    }
}
