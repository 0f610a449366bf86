//! Ownership filtering over generated collections

use async_trait::async_trait;
use fake::faker::address::en::{CityName, StreetName};
use fake::faker::name::en::Name;
use fake::Fake;
use vaxdesk::adapters::api::ReferenceDataSource;
use vaxdesk::core::selection::SelectionController;
use vaxdesk::domain::{
    Centre, CentreId, ComposedRecord, Location, LocationId, Patient, PatientId, PersistedRecord,
    Result, SlotId, VaccinationSlot,
};

/// Source that ignores filters and returns every generated entity
#[derive(Clone)]
struct GeneratedSource {
    locations: Vec<Location>,
    centres: Vec<Centre>,
    patients: Vec<Patient>,
    slots: Vec<VaccinationSlot>,
}

impl GeneratedSource {
    fn generate(locations: u64, centres: u64, patients: u64, slots: u64) -> Self {
        let locations: Vec<Location> = (1..=locations)
            .map(|id| Location {
                id: LocationId::new(id),
                country: "IN".to_string(),
                state: "DL".to_string(),
                city: CityName().fake(),
            })
            .collect();

        let centres = (1..=centres)
            .map(|id| Centre {
                id: CentreId::new(id),
                name: format!("Centre {id}"),
                address: StreetName().fake(),
                location_id: LocationId::new((1..=locations.len() as u64).fake()),
            })
            .collect::<Vec<_>>();

        let patients = (1..=patients)
            .map(|id| Patient {
                id: PatientId::new(id),
                patient_name: Name().fake(),
                age: (1..100).fake(),
                gender: if id % 2 == 0 { "F" } else { "M" }.to_string(),
                centre: CentreId::new((1..=centres.len() as u64).fake()),
            })
            .collect::<Vec<_>>();

        let slots = (1..=slots)
            .map(|id| VaccinationSlot {
                id: SlotId::new(id),
                slot_type: format!("Dose{}", (1..4u32).fake::<u32>()),
                date: "2024-01-01".to_string(),
                time: "09:00".to_string(),
                available_slots: (0..20).fake(),
                patient: PatientId::new((1..=patients.len() as u64).fake()),
            })
            .collect();

        Self {
            locations,
            centres,
            patients,
            slots,
        }
    }
}

#[async_trait]
impl ReferenceDataSource for GeneratedSource {
    async fn fetch_locations(&self) -> Result<Vec<Location>> {
        Ok(self.locations.clone())
    }

    async fn fetch_centres(&self, _location: LocationId) -> Result<Vec<Centre>> {
        Ok(self.centres.clone())
    }

    async fn fetch_patients(&self, _centre: CentreId) -> Result<Vec<Patient>> {
        Ok(self.patients.clone())
    }

    async fn fetch_slots(&self, _patient: PatientId) -> Result<Vec<VaccinationSlot>> {
        Ok(self.slots.clone())
    }

    async fn submit_record(&self, record: &ComposedRecord) -> Result<PersistedRecord> {
        Ok(PersistedRecord {
            id: 1,
            record: record.clone(),
        })
    }

    async fn fetch_records(&self) -> Result<Vec<PersistedRecord>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_every_level_holds_exactly_the_owned_subset() {
    for _ in 0..10 {
        let expected_source = GeneratedSource::generate(3, 12, 60, 150);
        let controller = SelectionController::new(expected_source.clone());
        controller.load_locations().await.unwrap();

        for location in &expected_source.locations {
            controller.select_location(Some(location.id)).await.unwrap();
            let expected: Vec<_> = expected_source
                .centres
                .iter()
                .filter(|c| c.location_id == location.id)
                .cloned()
                .collect();
            assert_eq!(controller.view().centres(), expected.as_slice());

            for centre in &expected {
                controller.select_centre(Some(centre.id)).await.unwrap();
                let patients: Vec<_> = expected_source
                    .patients
                    .iter()
                    .filter(|p| p.centre == centre.id)
                    .cloned()
                    .collect();
                assert_eq!(controller.view().patients(), patients.as_slice());

                if let Some(patient) = patients.first() {
                    controller.select_patient(Some(patient.id)).await.unwrap();
                    let view = controller.view();
                    assert!(view.slots().iter().all(|s| s.patient == patient.id));
                    let count = expected_source
                        .slots
                        .iter()
                        .filter(|s| s.patient == patient.id)
                        .count();
                    assert_eq!(view.slots().len(), count);
                }
            }
        }
    }
}

#[tokio::test]
async fn test_centre_without_patients_is_empty_not_an_error() {
    let mut source = GeneratedSource::generate(1, 2, 10, 0);
    for patient in &mut source.patients {
        patient.centre = CentreId::new(1);
    }
    let controller = SelectionController::new(source);
    controller.load_locations().await.unwrap();
    controller.select_location(Some(LocationId::new(1))).await.unwrap();

    controller.select_centre(Some(CentreId::new(2))).await.unwrap();

    assert!(controller.view().patients().is_empty());
}
