//! Vaccination REST API client
//!
//! [`ApiClient`] wraps a reqwest client with the route table, a bearer token
//! session, retry with exponential backoff for transient failures, and a single
//! refresh-and-replay when the server rejects the access token. Record creation
//! is never retried on transient failures.

use super::routes::Routes;
use super::session::{LoginRequest, RefreshRequest, Session, TokenPair};
use super::source::ReferenceDataSource;
use crate::config::{ApiConfig, AuthConfig, FilterMode, RetryConfig, SecretString, VaxdeskConfig};
use crate::domain::{
    ApiError, Centre, CentreId, ComposedRecord, Location, LocationId, Patient, PatientId,
    PersistedRecord, Resource, Result, VaccinationSlot, VaxdeskError,
};
use crate::log_retry_attempt;
use async_trait::async_trait;
use reqwest::{header, Client, ClientBuilder, Method, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use url::Url;

/// HTTP implementation of [`ReferenceDataSource`]
///
/// # Example
///
/// ```no_run
/// use vaxdesk::adapters::api::{ApiClient, ReferenceDataSource};
/// use vaxdesk::config::VaxdeskConfig;
///
/// # async fn example() -> vaxdesk::domain::Result<()> {
/// let config = VaxdeskConfig::default();
/// let client = ApiClient::connect(&config).await?;
///
/// let locations = client.fetch_locations().await?;
/// println!("{} locations", locations.len());
/// # Ok(())
/// # }
/// ```
pub struct ApiClient {
    /// HTTP client for making requests
    client: Client,

    routes: Routes,

    /// Token state (protected by mutex for interior mutability)
    session: Mutex<Session>,

    filter_mode: FilterMode,

    retry: RetryConfig,

    refresh_on_unauthorized: bool,
}

impl ApiClient {
    /// Create a client from configuration without contacting the server
    ///
    /// Pre-issued tokens from `auth` seed the session.
    ///
    /// # Errors
    ///
    /// Returns [`VaxdeskError::Configuration`] if the base URL is invalid or the
    /// HTTP client cannot be built.
    pub fn new(api: &ApiConfig, auth: &AuthConfig) -> Result<Self> {
        let routes = Routes::new(&api.base_url)?;

        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(api.timeout_seconds))
            .connect_timeout(Duration::from_secs(api.timeout_seconds.min(30)));

        if !api.tls_verify {
            tracing::warn!(
                base_url = %api.base_url,
                "TLS certificate verification is DISABLED; only use this against development servers"
            );
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            VaxdeskError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            routes,
            session: Mutex::new(Session::from_config(auth)),
            filter_mode: api.filter_mode,
            retry: api.retry.clone(),
            refresh_on_unauthorized: auth.refresh_on_unauthorized,
        })
    }

    /// Create a client and log in when credentials are configured but no
    /// access token is
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built or the login is rejected.
    pub async fn connect(config: &VaxdeskConfig) -> Result<Self> {
        let client = Self::new(&config.api, &config.auth)?;

        if !client.is_authenticated().await {
            match (&config.auth.username, &config.auth.password) {
                (Some(username), Some(password)) => client.login(username, password).await?,
                _ => tracing::warn!(
                    "No access token or credentials configured, requests might be unauthorized"
                ),
            }
        }

        Ok(client)
    }

    /// Exchange username and password for an access/refresh token pair
    ///
    /// # Errors
    ///
    /// Returns [`VaxdeskError::Api`] if the token endpoint rejects the
    /// credentials or cannot be reached.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<()> {
        let url = self.routes.token();
        let body = LoginRequest {
            username,
            password: password.expose_secret().as_str(),
        };

        tracing::debug!(url = %url, username = %username, "Requesting access token");

        let tokens: TokenPair = self
            .retry_request(|| self.execute(Method::POST, &url, Some(&body), None))
            .await?;

        let has_refresh_token = tokens.refresh.is_some();
        self.session.lock().await.store(tokens);

        tracing::info!(
            username = %username,
            has_refresh_token = has_refresh_token,
            "Successfully obtained access token"
        );

        Ok(())
    }

    /// Exchange the held refresh token for a new access token
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] (wrapped) when no refresh token is held
    /// or the server rejects it.
    pub async fn refresh(&self) -> Result<()> {
        let refresh = self.session.lock().await.refresh_token().ok_or_else(|| {
            ApiError::Unauthorized("No refresh token available for token refresh".to_string())
        })?;

        let url = self.routes.token_refresh();
        let body = RefreshRequest { refresh };

        tracing::debug!(url = %url, "Refreshing access token");

        let tokens: TokenPair = self
            .retry_request(|| self.execute(Method::POST, &url, Some(&body), None))
            .await?;

        self.session.lock().await.store_refreshed(tokens);
        tracing::info!("Successfully refreshed access token");

        Ok(())
    }

    /// Whether the session currently holds an access token
    pub async fn is_authenticated(&self) -> bool {
        self.session.lock().await.has_access_token()
    }

    /// The normalized base URL of the API server
    pub fn base_url(&self) -> &str {
        self.routes.base().as_str()
    }

    async fn bearer(&self) -> Option<String> {
        let bearer = self.session.lock().await.bearer();
        if bearer.is_none() {
            tracing::warn!("No token found, request might be unauthorized");
        }
        bearer
    }

    /// Authenticated request with retries and at most one refresh-and-replay
    async fn request<T, B>(
        &self,
        method: Method,
        url: &Url,
        body: Option<&B>,
    ) -> std::result::Result<T, ApiError>
    where
        T: DeserializeOwned + Send,
        B: Serialize + ?Sized + Sync,
    {
        self.authorized(method, url, body, true).await
    }

    /// Authenticated request without transient-failure retries
    ///
    /// Used for requests that create data: a timeout or 5xx may come after the
    /// server stored the data, so resending could store it twice. A 401 still
    /// gets the refresh-and-replay since the server rejected the request.
    async fn request_once<T, B>(
        &self,
        method: Method,
        url: &Url,
        body: Option<&B>,
    ) -> std::result::Result<T, ApiError>
    where
        T: DeserializeOwned + Send,
        B: Serialize + ?Sized + Sync,
    {
        self.authorized(method, url, body, false).await
    }

    async fn authorized<T, B>(
        &self,
        method: Method,
        url: &Url,
        body: Option<&B>,
        retry_transient: bool,
    ) -> std::result::Result<T, ApiError>
    where
        T: DeserializeOwned + Send,
        B: Serialize + ?Sized + Sync,
    {
        let bearer = self.bearer().await;
        let first = self
            .dispatch(&method, url, body, bearer.as_deref(), retry_transient)
            .await;

        match first {
            Err(ApiError::Unauthorized(message)) if self.refresh_on_unauthorized => {
                if self.session.lock().await.refresh_token().is_none() {
                    return Err(ApiError::Unauthorized(message));
                }

                tracing::info!(url = %url, "Access token rejected, refreshing and replaying request");

                if let Err(e) = self.refresh().await {
                    tracing::error!(error = %e, "Token refresh failed");
                    return Err(ApiError::Unauthorized(message));
                }

                let bearer = self.bearer().await;
                self.dispatch(&method, url, body, bearer.as_deref(), retry_transient)
                    .await
            }
            other => other,
        }
    }

    async fn dispatch<T, B>(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&B>,
        bearer: Option<&str>,
        retry_transient: bool,
    ) -> std::result::Result<T, ApiError>
    where
        T: DeserializeOwned + Send,
        B: Serialize + ?Sized + Sync,
    {
        if retry_transient {
            self.retry_request(|| self.execute(method.clone(), url, body, bearer))
                .await
        } else {
            self.execute(method.clone(), url, body, bearer).await
        }
    }

    /// Send one request and decode the JSON response
    async fn execute<T, B>(
        &self,
        method: Method,
        url: &Url,
        body: Option<&B>,
        bearer: Option<&str>,
    ) -> std::result::Result<T, ApiError>
    where
        T: DeserializeOwned + Send,
        B: Serialize + ?Sized + Sync,
    {
        let mut request = self.client.request(method, url.clone());

        if let Some(body) = body {
            request = request.json(body);
        }

        if let Some(auth) = bearer {
            request = request.header(header::AUTHORIZATION, auth);
        }

        let resp = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(e.to_string())
            } else {
                ApiError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = resp.status();
        if status.is_success() {
            return resp
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(e.to_string()));
        }

        let message = resp.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED => {
                tracing::error!(url = %url, "Unauthorized: token may be invalid or expired");
                ApiError::Unauthorized(message)
            }
            s if s.is_server_error() => ApiError::ServerError {
                status: s.as_u16(),
                message,
            },
            s => ApiError::ClientError {
                status: s.as_u16(),
                message,
            },
        })
    }

    /// Retry a request with exponential backoff
    ///
    /// Only connection failures, timeouts and 5xx responses are retried.
    async fn retry_request<F, T, Fut>(&self, operation: F) -> std::result::Result<T, ApiError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = std::result::Result<T, ApiError>>,
    {
        let max_attempts = self.retry.max_retries.max(1);
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() => {
                    attempt += 1;
                    if attempt >= max_attempts {
                        return Err(e);
                    }

                    let delay_ms = self.retry.delay_for_attempt(attempt);
                    log_retry_attempt!(attempt, max_attempts, delay_ms, &e);

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn patient_filter(&self, centre: CentreId) -> Option<CentreId> {
        match self.filter_mode {
            FilterMode::Server => Some(centre),
            FilterMode::Client => None,
        }
    }

    fn slot_filter(&self, patient: PatientId) -> Option<PatientId> {
        match self.filter_mode {
            FilterMode::Server => Some(patient),
            FilterMode::Client => None,
        }
    }
}

#[async_trait]
impl ReferenceDataSource for ApiClient {
    async fn fetch_locations(&self) -> Result<Vec<Location>> {
        let url = self.routes.locations();
        tracing::debug!(url = %url, "Fetching locations");

        let locations: Vec<Location> = self
            .request(Method::GET, &url, None::<&()>)
            .await
            .map_err(|e| VaxdeskError::fetch(Resource::Locations, e))?;

        tracing::debug!(count = locations.len(), "Fetched locations");
        Ok(locations)
    }

    async fn fetch_centres(&self, location: LocationId) -> Result<Vec<Centre>> {
        let url = self.routes.centres(location);
        tracing::debug!(url = %url, location_id = %location, "Fetching centres");

        let centres: Vec<Centre> = self
            .request(Method::GET, &url, None::<&()>)
            .await
            .map_err(|e| VaxdeskError::fetch(Resource::Centres, e))?;

        tracing::debug!(count = centres.len(), location_id = %location, "Fetched centres");
        Ok(centres)
    }

    async fn fetch_patients(&self, centre: CentreId) -> Result<Vec<Patient>> {
        let url = self.routes.patients(self.patient_filter(centre));
        tracing::debug!(url = %url, centre_id = %centre, "Fetching patients");

        let patients: Vec<Patient> = self
            .request(Method::GET, &url, None::<&()>)
            .await
            .map_err(|e| VaxdeskError::fetch(Resource::Patients, e))?;

        tracing::debug!(count = patients.len(), centre_id = %centre, "Fetched patients");
        Ok(patients)
    }

    async fn fetch_slots(&self, patient: PatientId) -> Result<Vec<VaccinationSlot>> {
        let url = self.routes.vaccination_slots(self.slot_filter(patient));
        tracing::debug!(url = %url, patient_id = %patient, "Fetching vaccination slots");

        let slots: Vec<VaccinationSlot> = self
            .request(Method::GET, &url, None::<&()>)
            .await
            .map_err(|e| VaxdeskError::fetch(Resource::VaccinationSlots, e))?;

        tracing::debug!(count = slots.len(), patient_id = %patient, "Fetched vaccination slots");
        Ok(slots)
    }

    async fn submit_record(&self, record: &ComposedRecord) -> Result<PersistedRecord> {
        let url = self.routes.added_records();
        tracing::debug!(url = %url, patient = %record.patient, "Submitting record");

        let persisted: PersistedRecord = self
            .request_once(Method::POST, &url, Some(record))
            .await
            .map_err(VaxdeskError::Submission)?;

        tracing::info!(record_id = persisted.id, "Record created");
        Ok(persisted)
    }

    async fn fetch_records(&self) -> Result<Vec<PersistedRecord>> {
        let url = self.routes.added_records();
        tracing::debug!(url = %url, "Fetching records");

        let records: Vec<PersistedRecord> = self
            .request(Method::GET, &url, None::<&()>)
            .await
            .map_err(|e| VaxdeskError::fetch(Resource::Records, e))?;

        tracing::debug!(count = records.len(), "Fetched records");
        Ok(records)
    }
}
