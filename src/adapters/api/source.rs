//! Reference data source trait
//!
//! [`ReferenceDataSource`] is the seam between the selection controller and the
//! vaccination REST API. [`ApiClient`](super::ApiClient) is the production
//! implementation; tests supply in-memory doubles.

use crate::domain::{
    Centre, CentreId, ComposedRecord, Location, LocationId, Patient, PatientId, PersistedRecord,
    Result, VaccinationSlot,
};
use async_trait::async_trait;

/// Read and record operations the selection controller depends on
///
/// Read failures are reported as [`VaxdeskError::Fetch`](crate::domain::VaxdeskError::Fetch)
/// and record creation failures as
/// [`VaxdeskError::Submission`](crate::domain::VaxdeskError::Submission).
///
/// Implementations may return more patients or slots than requested (for
/// example when the server does not filter); callers narrow by owner id.
#[async_trait]
pub trait ReferenceDataSource: Send + Sync {
    /// `GET locations`
    async fn fetch_locations(&self) -> Result<Vec<Location>>;

    /// `GET centres?location={id}`
    async fn fetch_centres(&self, location: LocationId) -> Result<Vec<Centre>>;

    /// `GET patients`, possibly narrowed to `centre`
    async fn fetch_patients(&self, centre: CentreId) -> Result<Vec<Patient>>;

    /// `GET vaccination-slots`, possibly narrowed to `patient`
    async fn fetch_slots(&self, patient: PatientId) -> Result<Vec<VaccinationSlot>>;

    /// `POST added-records`
    async fn submit_record(&self, record: &ComposedRecord) -> Result<PersistedRecord>;

    /// `GET added-records`
    async fn fetch_records(&self) -> Result<Vec<PersistedRecord>>;
}
