//! Display surface collaborator
//!
//! The controller pushes record and error events to a [`DisplaySurface`];
//! collections and details are pulled through
//! [`SelectionController::view`](super::SelectionController::view).

use crate::domain::{PersistedRecord, VaxdeskError};

/// Receives controller events for rendering
pub trait DisplaySurface: Send + Sync {
    /// A record was created by a successful submission
    fn record_added(&self, record: &PersistedRecord);

    /// The full record list was (re)loaded from the server
    fn records_changed(&self, records: &[PersistedRecord]);

    /// Error channel for fetch, submission and validation failures
    fn report_error(&self, error: &VaxdeskError);
}

/// Surface that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl DisplaySurface for NullSurface {
    fn record_added(&self, _record: &PersistedRecord) {}

    fn records_changed(&self, _records: &[PersistedRecord]) {}

    fn report_error(&self, _error: &VaxdeskError) {}
}
