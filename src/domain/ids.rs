//! Domain identifier types with validation
//!
//! The REST API identifies every entity with a positive integer. Each entity kind
//! gets its own newtype so a centre id can never be passed where a patient id is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw identifier value
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw identifier value
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(format!("{} ID cannot be empty", $label));
                }
                trimmed
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| format!("Invalid {} ID '{}': expected a number", $label, s))
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(
    /// Location identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use vaxdesk::domain::ids::LocationId;
    /// use std::str::FromStr;
    ///
    /// let id = LocationId::from_str("7").unwrap();
    /// assert_eq!(id.get(), 7);
    /// ```
    LocationId,
    "Location"
);

numeric_id!(
    /// Vaccination centre identifier
    CentreId,
    "Centre"
);

numeric_id!(
    /// Patient identifier
    PatientId,
    "Patient"
);

numeric_id!(
    /// Vaccination slot identifier
    SlotId,
    "Slot"
);

/// Identifier assigned by the server to a persisted record
pub type RecordId = u64;
