//! End-to-end selection flow against a mock API server

use mockito::{Matcher, Mock, Server};
use serde_json::json;
use std::sync::{Arc, Mutex};
use vaxdesk::adapters::api::ApiClient;
use vaxdesk::config::{secret_string, ApiConfig, AuthConfig, RetryConfig};
use vaxdesk::core::selection::{DisplaySurface, LevelStatus, SelectionController};
use vaxdesk::domain::{
    CentreId, LocationId, PatientId, PersistedRecord, SelectionLevel, SlotId, VaxdeskError,
};

#[derive(Default)]
struct Events {
    added: Mutex<Vec<u64>>,
    refreshed: Mutex<Vec<usize>>,
    errors: Mutex<Vec<String>>,
}

#[derive(Clone, Default)]
struct RecordingSurface(Arc<Events>);

impl DisplaySurface for RecordingSurface {
    fn record_added(&self, record: &PersistedRecord) {
        self.0.added.lock().unwrap().push(record.id);
    }

    fn records_changed(&self, records: &[PersistedRecord]) {
        self.0.refreshed.lock().unwrap().push(records.len());
    }

    fn report_error(&self, error: &VaxdeskError) {
        self.0.errors.lock().unwrap().push(error.to_string());
    }
}

fn client(server: &Server) -> ApiClient {
    let api = ApiConfig {
        base_url: server.url(),
        retry: RetryConfig {
            max_retries: 1,
            initial_delay_ms: 1,
            max_delay_ms: 1,
            backoff_multiplier: 1.0,
        },
        ..Default::default()
    };
    let auth = AuthConfig {
        access_token: Some(secret_string("token".to_string())),
        ..Default::default()
    };
    ApiClient::new(&api, &auth).unwrap()
}

const EXPECTED_RECORD: &str = r#"{
    "location": "Delhi", "locationState": "DL", "locationCountry": "IN",
    "centre": "C1", "centreAddress": "Addr1",
    "patient": "Amit", "patientAge": "30", "patientContact": "M",
    "slot": "Dose1", "slotDate": "2024-01-01", "slotTime": "09:00",
    "availableSlots": "5"
}"#;

/// Reference data mocks for the Delhi scenario; patients and slots are unfiltered
async fn reference_mocks(server: &mut Server) -> Vec<Mock> {
    vec![
        server
            .mock("GET", "/api/locations/")
            .with_body(r#"[{"id": 1, "country": "IN", "state": "DL", "city": "Delhi"}]"#)
            .create_async()
            .await,
        server
            .mock("GET", "/api/centres/")
            .match_query(Matcher::UrlEncoded("location".into(), "1".into()))
            .with_body(r#"[{"id": 10, "name": "C1", "address": "Addr1", "location_id": 1}]"#)
            .create_async()
            .await,
        server
            .mock("GET", "/api/patients/")
            .with_body(
                r#"[
                    {"id": 100, "patient_name": "Amit", "age": 30, "gender": "M", "centre": 10},
                    {"id": 101, "patient_name": "Sara", "age": 25, "gender": "F", "centre": 11}
                ]"#,
            )
            .create_async()
            .await,
        server
            .mock("GET", "/api/vaccination-slots/")
            .with_body(
                r#"[
                    {"id": 1000, "type": "Dose1", "date": "2024-01-01", "time": "09:00", "available_slots": 5, "patient": 100},
                    {"id": 1001, "type": "Dose2", "date": "2024-02-01", "time": "10:00", "available_slots": 3, "patient": 101}
                ]"#,
            )
            .create_async()
            .await,
    ]
}

async fn select_delhi_scenario<D: DisplaySurface>(controller: &SelectionController<ApiClient, D>) {
    controller.load_locations().await.unwrap();
    controller.select_location(Some(LocationId::new(1))).await.unwrap();
    controller.select_centre(Some(CentreId::new(10))).await.unwrap();
    controller.select_patient(Some(PatientId::new(100))).await.unwrap();
    controller.select_slot(Some(SlotId::new(1000))).unwrap();
}

#[tokio::test]
async fn test_delhi_scenario_submits_expected_record() {
    let mut server = Server::new_async().await;
    let _reference = reference_mocks(&mut server).await;

    let mut persisted: serde_json::Value = serde_json::from_str(EXPECTED_RECORD).unwrap();
    persisted["id"] = json!(1);

    let submit = server
        .mock("POST", "/api/added-records/")
        .match_body(Matcher::JsonString(EXPECTED_RECORD.to_string()))
        .with_status(201)
        .with_body(persisted.to_string())
        .expect(1)
        .create_async()
        .await;
    let list = server
        .mock("GET", "/api/added-records/")
        .with_body(json!([persisted]).to_string())
        .expect(1)
        .create_async()
        .await;

    let surface = RecordingSurface::default();
    let controller = SelectionController::with_surface(client(&server), surface.clone());
    select_delhi_scenario(&controller).await;

    let view = controller.view();
    assert_eq!(view.patients().len(), 1);
    assert_eq!(view.slots().len(), 1);

    let record = controller.submit().await.unwrap();

    submit.assert_async().await;
    list.assert_async().await;
    assert_eq!(record.id, 1);
    assert_eq!(record.record.patient_contact, "M");
    assert_eq!(*surface.0.added.lock().unwrap(), vec![1]);
    assert_eq!(*surface.0.refreshed.lock().unwrap(), vec![1]);
    assert_eq!(controller.records().len(), 1);

    let view = controller.view();
    assert!(view.is_empty());
    assert_eq!(view.status(SelectionLevel::Centre), LevelStatus::Unselected);
    assert!(surface.0.errors.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_incomplete_selection_never_posts() {
    let mut server = Server::new_async().await;
    let _reference = reference_mocks(&mut server).await;
    let submit = server
        .mock("POST", "/api/added-records/")
        .expect(0)
        .create_async()
        .await;

    let controller = SelectionController::new(client(&server));
    controller.load_locations().await.unwrap();
    controller.select_location(Some(LocationId::new(1))).await.unwrap();
    controller.select_centre(Some(CentreId::new(10))).await.unwrap();

    let err = controller.submit().await.unwrap_err();

    submit.assert_async().await;
    assert!(matches!(err, VaxdeskError::Validation(_)));
    assert_eq!(
        err.to_string(),
        "Validation error: All fields must be selected (missing: patient, slot)"
    );
    assert_eq!(controller.view().centre(), Some(CentreId::new(10)));
}

#[tokio::test]
async fn test_failed_submission_keeps_selection_for_retry() {
    let mut server = Server::new_async().await;
    let _reference = reference_mocks(&mut server).await;
    let submit = server
        .mock("POST", "/api/added-records/")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let surface = RecordingSurface::default();
    let controller = SelectionController::with_surface(client(&server), surface.clone());
    select_delhi_scenario(&controller).await;

    let err = controller.submit().await.unwrap_err();

    submit.assert_async().await;
    assert!(matches!(err, VaxdeskError::Submission(_)));
    assert!(controller.view().is_complete());
    assert_eq!(surface.0.errors.lock().unwrap().len(), 1);
    assert!(surface.0.added.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_centre_fetch_failure_shows_empty_list() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/locations/")
        .with_body(r#"[{"id": 1, "country": "IN", "state": "DL", "city": "Delhi"}]"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/centres/")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let surface = RecordingSurface::default();
    let controller = SelectionController::with_surface(client(&server), surface.clone());
    controller.load_locations().await.unwrap();

    let err = controller
        .select_location(Some(LocationId::new(1)))
        .await
        .unwrap_err();

    assert!(matches!(err, VaxdeskError::Fetch { .. }));
    let view = controller.view();
    assert_eq!(view.location(), Some(LocationId::new(1)));
    assert!(view.centres().is_empty());
    assert_eq!(view.status(SelectionLevel::Centre), LevelStatus::Populated);
    assert_eq!(surface.0.errors.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_discard_after_partial_selection_makes_no_calls() {
    let mut server = Server::new_async().await;
    let locations = server
        .mock("GET", "/api/locations/")
        .with_body(r#"[{"id": 1, "country": "IN", "state": "DL", "city": "Delhi"}]"#)
        .expect(1)
        .create_async()
        .await;
    let centres = server
        .mock("GET", "/api/centres/")
        .match_query(Matcher::Any)
        .with_body(r#"[{"id": 10, "name": "C1", "address": "Addr1", "location_id": 1}]"#)
        .expect(1)
        .create_async()
        .await;

    let controller = SelectionController::new(client(&server));
    controller.load_locations().await.unwrap();
    controller.select_location(Some(LocationId::new(1))).await.unwrap();

    controller.discard();

    // Still exactly one call each: discard touched nothing remote
    locations.assert_async().await;
    centres.assert_async().await;
    let view = controller.view();
    assert!(view.is_empty());
    assert!(view.centres().is_empty());
}
