//! Appointment booking and management

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::{ApiClient, ApiError};

use super::decode;

/// An appointment as served by `/appointments/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub appointment_id: i64,
    pub doctor: i64,
    #[serde(default)]
    pub doctor_name: Option<String>,
    pub patient: i64,
    #[serde(default)]
    pub patient_name: Option<String>,
    pub appointment_date: DateTime<Utc>,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: String,
}

/// Fields for booking an appointment
#[derive(Debug, Clone, Serialize)]
pub struct NewAppointment {
    pub doctor: i64,
    pub patient: i64,
    pub appointment_date: DateTime<Utc>,
    pub reason: String,
}

impl Appointment {
    /// Table row for the dashboard
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.appointment_id.to_string(),
            self.patient_name
                .clone()
                .unwrap_or_else(|| self.patient.to_string()),
            self.doctor_name
                .clone()
                .unwrap_or_else(|| self.doctor.to_string()),
            self.appointment_date.format("%Y-%m-%d %H:%M").to_string(),
            self.reason.clone().unwrap_or_default(),
            self.status.clone(),
        ]
    }
}

/// Lists appointments visible to the current role
pub async fn list_appointments(client: &ApiClient) -> Result<Vec<Appointment>, ApiError> {
    decode(client.get("/appointments/").await?)
}

/// Books an appointment
pub async fn book_appointment(
    client: &ApiClient,
    appointment: &NewAppointment,
) -> Result<Appointment, ApiError> {
    let body =
        serde_json::to_value(appointment).map_err(|err| ApiError::Decode(err.to_string()))?;
    decode(client.post("/appointments/", body).await?)
}

/// Cancels an appointment via its dedicated action route
pub async fn cancel_appointment(
    client: &ApiClient,
    appointment_id: i64,
) -> Result<Appointment, ApiError> {
    decode(
        client
            .patch(&format!("/appointments/{appointment_id}/cancel/"), json!({}))
            .await?,
    )
}

/// Updates an appointment's status (confirm, complete)
pub async fn update_status(
    client: &ApiClient,
    appointment_id: i64,
    status: &str,
) -> Result<Appointment, ApiError> {
    decode(
        client
            .patch(
                &format!("/appointments/{appointment_id}/"),
                json!({ "status": status }),
            )
            .await?,
    )
}
