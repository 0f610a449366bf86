//! API route table
//!
//! All endpoints live under `api/` relative to the configured base URL and use
//! trailing slashes, as the server expects.

use crate::domain::{CentreId, LocationId, PatientId, Result, VaxdeskError};
use url::Url;

const TOKEN: &str = "api/token/";
const TOKEN_REFRESH: &str = "api/token/refresh/";
const LOCATIONS: &str = "api/locations/";
const CENTRES: &str = "api/centres/";
const PATIENTS: &str = "api/patients/";
const VACCINATION_SLOTS: &str = "api/vaccination-slots/";
const ADDED_RECORDS: &str = "api/added-records/";

/// Resolved endpoint URLs for one server
#[derive(Debug, Clone)]
pub struct Routes {
    base: Url,
}

impl Routes {
    /// Builds the route table for `base_url`
    ///
    /// A missing trailing slash is added so that a path prefix such as
    /// `https://host/vaccination` is kept when routes are joined.
    ///
    /// # Errors
    ///
    /// Returns [`VaxdeskError::Configuration`] if `base_url` is not a valid URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base = Url::parse(&normalized).map_err(|e| {
            VaxdeskError::Configuration(format!("Invalid API base URL '{base_url}': {e}"))
        })?;

        Ok(Self { base })
    }

    /// The normalized base URL
    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn token(&self) -> Url {
        self.join(TOKEN)
    }

    pub fn token_refresh(&self) -> Url {
        self.join(TOKEN_REFRESH)
    }

    pub fn locations(&self) -> Url {
        self.join(LOCATIONS)
    }

    /// `centres/?location={id}`; the server always filters centres by location
    pub fn centres(&self, location: LocationId) -> Url {
        let mut url = self.join(CENTRES);
        url.query_pairs_mut()
            .append_pair("location", &location.to_string());
        url
    }

    /// `patients/`, or `patients/?centre={id}` when server-side filtering is requested
    pub fn patients(&self, centre: Option<CentreId>) -> Url {
        let mut url = self.join(PATIENTS);
        if let Some(centre) = centre {
            url.query_pairs_mut()
                .append_pair("centre", &centre.to_string());
        }
        url
    }

    /// `vaccination-slots/`, or `vaccination-slots/?patient={id}`
    pub fn vaccination_slots(&self, patient: Option<PatientId>) -> Url {
        let mut url = self.join(VACCINATION_SLOTS);
        if let Some(patient) = patient {
            url.query_pairs_mut()
                .append_pair("patient", &patient.to_string());
        }
        url
    }

    pub fn added_records(&self) -> Url {
        self.join(ADDED_RECORDS)
    }

    fn join(&self, path: &str) -> Url {
        // Route constants are relative paths, so joining onto a parsed base cannot fail
        self.base.join(path).unwrap_or_else(|_| self.base.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_join_base_url() {
        let routes = Routes::new("http://localhost:8000/").unwrap();
        assert_eq!(
            routes.locations().as_str(),
            "http://localhost:8000/api/locations/"
        );
        assert_eq!(
            routes.token_refresh().as_str(),
            "http://localhost:8000/api/token/refresh/"
        );
    }

    #[test]
    fn test_routes_keep_path_prefix_without_trailing_slash() {
        let routes = Routes::new("https://example.com/vaccination").unwrap();
        assert_eq!(
            routes.added_records().as_str(),
            "https://example.com/vaccination/api/added-records/"
        );
    }

    #[test]
    fn test_centres_query() {
        let routes = Routes::new("http://localhost:8000/").unwrap();
        assert_eq!(
            routes.centres(LocationId::new(1)).as_str(),
            "http://localhost:8000/api/centres/?location=1"
        );
    }

    #[test]
    fn test_optional_filters() {
        let routes = Routes::new("http://localhost:8000/").unwrap();
        assert_eq!(
            routes.patients(None).as_str(),
            "http://localhost:8000/api/patients/"
        );
        assert_eq!(
            routes.patients(Some(CentreId::new(10))).as_str(),
            "http://localhost:8000/api/patients/?centre=10"
        );
        assert_eq!(
            routes.vaccination_slots(Some(PatientId::new(100))).as_str(),
            "http://localhost:8000/api/vaccination-slots/?patient=100"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            Routes::new("not a url"),
            Err(VaxdeskError::Configuration(_))
        ));
    }
}
