//! Domain models and typed operations
//!
//! Each resource module holds the serde model structs plus thin typed
//! operations over [`ApiClient`](crate::api::ApiClient). Field shapes follow
//! the backend serializers; the gateway client beneath handles caching,
//! invalidation, and fallback uniformly.

pub mod admin;
pub mod appointments;
pub mod auth;
pub mod doctors;
pub mod patients;
pub mod receptionists;
pub mod schedules;

pub use appointments::Appointment;
pub use doctors::Doctor;
pub use lab_tests::LabTestOrder;
pub use patients::Patient;
pub use receptionists::Receptionist;
pub use schedules::Schedule;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::api::ApiError;

/// The role granted to a logged-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Doctor,
    Patient,
    Receptionist,
}

impl Role {
    /// Parses a role name as given on the command line (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "doctor" => Some(Role::Doctor),
            "patient" => Some(Role::Patient),
            "receptionist" => Some(Role::Receptionist),
            _ => None,
        }
    }

    /// All selectable roles, in login-screen order
    pub fn all() -> &'static [Role] {
        &[Role::Admin, Role::Doctor, Role::Patient, Role::Receptionist]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admin => "Admin",
            Role::Doctor => "Doctor",
            Role::Patient => "Patient",
            Role::Receptionist => "Receptionist",
        };
        write!(f, "{name}")
    }
}

/// The authenticated user as reported by `/current-user/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Backend user id
    #[serde(default)]
    pub id: Option<i64>,
    /// Login name
    pub username: String,
    /// Granted role
    #[serde(rename = "userType")]
    pub role: Role,
    /// Display name, when the backend provides one
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
}

/// Deserializes a gateway payload into a typed model.
///
/// A shape mismatch is a `Decode` error, same as a malformed body.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_from_str_accepts_any_case() {
        assert_eq!(Role::from_str("admin"), Some(Role::Admin));
        assert_eq!(Role::from_str("Doctor"), Some(Role::Doctor));
        assert_eq!(Role::from_str("PATIENT"), Some(Role::Patient));
        assert_eq!(Role::from_str("receptionist"), Some(Role::Receptionist));
    }

    #[test]
    fn test_role_from_str_rejects_unknown() {
        assert_eq!(Role::from_str("nurse"), None);
        assert_eq!(Role::from_str(""), None);
    }

    #[test]
    fn test_role_serializes_as_capitalized_name() {
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), json!("Admin"));
        assert_eq!(serde_json::to_value(Role::Doctor).unwrap(), json!("Doctor"));
    }

    #[test]
    fn test_user_deserializes_backend_field_names() {
        let user: User = serde_json::from_value(json!({
            "id": 7,
            "username": "asha",
            "userType": "Doctor",
            "fullName": "Asha Rao"
        }))
        .unwrap();

        assert_eq!(user.id, Some(7));
        assert_eq!(user.role, Role::Doctor);
        assert_eq!(user.full_name.as_deref(), Some("Asha Rao"));
    }

    #[test]
    fn test_user_tolerates_missing_optional_fields() {
        let user: User =
            serde_json::from_value(json!({"username": "admin", "userType": "Admin"})).unwrap();
        assert!(user.id.is_none());
        assert!(user.full_name.is_none());
    }

    #[test]
    fn test_decode_shape_mismatch_is_decode_error() {
        let result: Result<Vec<Doctor>, _> = decode(json!({"not": "a list"}));
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
