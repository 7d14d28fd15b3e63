//! Patient registry operations

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{ApiClient, ApiError};

use super::decode;

/// A patient record as served by `/patients/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub patient_id: i64,
    #[serde(default)]
    pub reg_num: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Patient {
    /// Display name for tables and appointment forms
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Table row for the dashboard
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.reg_num
                .clone()
                .unwrap_or_else(|| self.patient_id.to_string()),
            self.full_name(),
            self.gender.clone().unwrap_or_default(),
            self.date_of_birth
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            self.contact_number.clone().unwrap_or_default(),
        ]
    }
}

/// Lists all patients visible to the current role
pub async fn list_patients(client: &ApiClient) -> Result<Vec<Patient>, ApiError> {
    decode(client.get("/patients/").await?)
}

/// Applies a partial update to a patient record
pub async fn update_patient(
    client: &ApiClient,
    patient_id: i64,
    changes: Value,
) -> Result<Patient, ApiError> {
    decode(client.patch(&format!("/patients/{patient_id}/"), changes).await?)
}

/// Deletes a patient record
pub async fn delete_patient(client: &ApiClient, patient_id: i64) -> Result<(), ApiError> {
    client.delete(&format!("/patients/{patient_id}/")).await?;
    Ok(())
}

/// Finds the profile belonging to the given backend user id.
///
/// The backend lists every profile the role may see; the patient dashboard
/// narrows to its own by user id, same as the original console.
pub async fn find_own_profile(
    client: &ApiClient,
    user_id: i64,
) -> Result<Option<Patient>, ApiError> {
    let patients = list_patients(client).await?;
    Ok(patients.into_iter().find(|p| p.patient_id == user_id))
}
