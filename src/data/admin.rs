//! Admin-only operations: logs, statistics, role registration, diagnostics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{ApiClient, ApiError};

use super::{decode, Role, User};

/// One entry from the `/logs/` feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub level: Option<String>,
    pub message: String,
    #[serde(default)]
    pub user: Option<String>,
}

impl LogEntry {
    /// Table row for the admin dashboard
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
            self.level.clone().unwrap_or_else(|| "INFO".to_string()),
            self.user.clone().unwrap_or_default(),
            self.message.clone(),
        ]
    }
}

/// System statistics from `/statistics/`.
///
/// The headline counts are typed; the nested breakdowns (departments, status
/// distributions, trends) stay as raw JSON since the dashboard renders them
/// generically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub total_doctors: u64,
    #[serde(default)]
    pub total_patients: u64,
    #[serde(default)]
    pub total_appointments: u64,
    #[serde(default)]
    pub total_lab_tests: u64,
    #[serde(default)]
    pub departments: Vec<Value>,
    #[serde(default)]
    pub appointments: Option<Value>,
    #[serde(default)]
    pub patient_gender_distribution: Vec<Value>,
}

impl Statistics {
    /// Headline rows for the admin dashboard
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        vec![
            vec!["Doctors".to_string(), self.total_doctors.to_string()],
            vec!["Patients".to_string(), self.total_patients.to_string()],
            vec![
                "Appointments".to_string(),
                self.total_appointments.to_string(),
            ],
            vec!["Lab tests".to_string(), self.total_lab_tests.to_string()],
        ]
    }
}

/// Fields for registering a staff or patient account
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Fetches the system log feed.
///
/// Under demo fallback a missing feed resolves to an empty list, so the
/// dashboard shows "no logs" rather than fabricated operational data.
pub async fn fetch_logs(client: &ApiClient) -> Result<Vec<LogEntry>, ApiError> {
    decode(client.get("/logs/").await?)
}

/// Fetches system statistics
pub async fn fetch_statistics(client: &ApiClient) -> Result<Statistics, ApiError> {
    decode(client.get("/statistics/").await?)
}

/// Registers an account under the given role via the admin routes
pub async fn register_user(
    client: &ApiClient,
    role: Role,
    registration: &Registration,
) -> Result<User, ApiError> {
    let path = match role {
        Role::Doctor => "/admin/register/doctor/",
        Role::Patient => "/admin/register/patient/",
        Role::Receptionist => "/admin/register/receptionist/",
        Role::Admin => "/admin/register/admin/",
    };
    let body =
        serde_json::to_value(registration).map_err(|err| ApiError::Decode(err.to_string()))?;
    decode(client.post(path, body).await?)
}

/// Probes the backend's diagnostics endpoint, returning the raw report.
///
/// Diagnostics are deliberately outside the fallback tables: substituting a
/// canned report would defeat the probe.
pub async fn run_diagnostics(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/diagnostics/").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_log_entry_tolerates_sparse_records() {
        let entry: LogEntry =
            serde_json::from_value(json!({"message": "backend started"})).unwrap();
        let row = entry.to_row();
        assert_eq!(row[1], "INFO");
        assert_eq!(row[3], "backend started");
    }

    #[test]
    fn test_statistics_headline_counts() {
        let stats: Statistics = serde_json::from_value(json!({
            "total_doctors": 3,
            "total_patients": 12,
            "total_appointments": 40,
            "total_lab_tests": 7,
            "departments": [{"department": "Cardiology", "count": 2}]
        }))
        .unwrap();

        let rows = stats.to_rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1], vec!["Patients".to_string(), "12".to_string()]);
    }

    #[test]
    fn test_statistics_tolerates_empty_payload() {
        let stats: Statistics = serde_json::from_value(json!({})).unwrap();
        assert_eq!(stats.total_doctors, 0);
        assert!(stats.departments.is_empty());
    }

    #[test]
    fn test_empty_list_fallback_decodes_into_no_logs() {
        // The gateway substitutes [] for a missing log feed; that payload must
        // decode cleanly rather than surface an error.
        let logs: Vec<LogEntry> = serde_json::from_value(json!([])).unwrap();
        assert!(logs.is_empty());
    }

    #[test]
    fn test_registration_serializes_all_account_fields() {
        let registration = Registration {
            username: "nina".to_string(),
            password: "secret".to_string(),
            email: "nina@hospital.example".to_string(),
            first_name: "Nina".to_string(),
            last_name: "Hall".to_string(),
        };
        let body = serde_json::to_value(&registration).unwrap();
        for field in ["username", "password", "email", "first_name", "last_name"] {
            assert!(body.get(field).is_some());
        }
    }
}
