//! Receptionist roster operations

use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiError};

use super::decode;

/// A receptionist record as served by `/receptionists/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receptionist {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Receptionist {
    /// Table row for the admin dashboard
    pub fn to_row(&self) -> Vec<String> {
        let name = match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            _ => self.username.clone(),
        };
        vec![
            self.id.to_string(),
            self.username.clone(),
            name,
            self.email.clone().unwrap_or_default(),
        ]
    }
}

/// Lists the receptionist roster
pub async fn list_receptionists(client: &ApiClient) -> Result<Vec<Receptionist>, ApiError> {
    decode(client.get("/receptionists/").await?)
}

/// Removes a receptionist account
pub async fn delete_receptionist(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.delete(&format!("/receptionists/{id}/")).await?;
    Ok(())
}
