//! Doctor schedule operations

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{ApiClient, ApiError};

use super::decode;

/// A weekly schedule slot as served by `/schedules/` and `/doctor-schedules/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub schedule_id: i64,
    pub doctor: i64,
    #[serde(default)]
    pub doctor_name: Option<String>,
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
}

impl Schedule {
    /// Table row for the dashboard
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.schedule_id.to_string(),
            self.doctor_name
                .clone()
                .unwrap_or_else(|| self.doctor.to_string()),
            self.day_of_week.clone(),
            format!("{} - {}", self.start_time, self.end_time),
        ]
    }
}

/// Lists schedule slots, optionally narrowed to one doctor
pub async fn list_schedules(
    client: &ApiClient,
    doctor_id: Option<i64>,
) -> Result<Vec<Schedule>, ApiError> {
    let path = match doctor_id {
        Some(id) => format!("/schedules/?doctor={id}"),
        None => "/schedules/".to_string(),
    };
    decode(client.get(&path).await?)
}

/// Lists the joined doctor-schedule view
pub async fn list_doctor_schedules(client: &ApiClient) -> Result<Vec<Schedule>, ApiError> {
    decode(client.get("/doctor-schedules/").await?)
}

/// Creates a schedule slot
pub async fn create_schedule(client: &ApiClient, slot: Value) -> Result<Schedule, ApiError> {
    decode(client.post("/schedules/", slot).await?)
}

/// Deletes a slot from the joined doctor-schedule view
pub async fn delete_doctor_schedule(client: &ApiClient, schedule_id: i64) -> Result<(), ApiError> {
    client
        .delete(&format!("/doctor-schedules/{schedule_id}/"))
        .await?;
    Ok(())
}
