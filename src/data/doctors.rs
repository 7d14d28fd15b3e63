//! Doctor directory operations

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{ApiClient, ApiError};

use super::decode;

/// A doctor record as served by `/doctors/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub doctor_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub department: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Fields for creating a doctor record
#[derive(Debug, Clone, Serialize)]
pub struct NewDoctor {
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub department: String,
    pub email: String,
}

impl Doctor {
    /// Display name for tables and appointment forms
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Table row for the dashboard
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.doctor_id.to_string(),
            self.full_name(),
            self.specialization.clone(),
            self.department.clone(),
            self.email.clone().unwrap_or_default(),
        ]
    }
}

/// Lists all doctors
pub async fn list_doctors(client: &ApiClient) -> Result<Vec<Doctor>, ApiError> {
    decode(client.get("/doctors/").await?)
}

/// Creates a doctor record
pub async fn create_doctor(client: &ApiClient, doctor: &NewDoctor) -> Result<Doctor, ApiError> {
    let body = serde_json::to_value(doctor).map_err(|err| ApiError::Decode(err.to_string()))?;
    decode(client.post("/doctors/", body).await?)
}

/// Applies a partial update to a doctor record
pub async fn update_doctor(client: &ApiClient, doctor_id: i64, changes: Value) -> Result<Doctor, ApiError> {
    decode(client.patch(&format!("/doctors/{doctor_id}/"), changes).await?)
}

/// Deletes a doctor record
pub async fn delete_doctor(client: &ApiClient, doctor_id: i64) -> Result<(), ApiError> {
    client.delete(&format!("/doctors/{doctor_id}/")).await?;
    Ok(())
}
