//! Record and page types for the emergency-call collection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};

/// Category of a reported incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IncidentType {
    Fire,
    Crime,
    Accident,
}

impl fmt::Display for IncidentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IncidentType::Fire => "FIRE",
            IncidentType::Crime => "CRIME",
            IncidentType::Accident => "ACCIDENT",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for IncidentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FIRE" => Ok(IncidentType::Fire),
            "CRIME" => Ok(IncidentType::Crime),
            "ACCIDENT" => Ok(IncidentType::Accident),
            _ => Err(InvalidInputError::IncidentType {
                value: s.to_string(),
            }
            .into()),
        }
    }
}

/// Lifecycle status of an emergency call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CallStatus {
    Open,
    Closed,
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CallStatus::Open => "OPEN",
            CallStatus::Closed => "CLOSED",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for CallStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OPEN" => Ok(CallStatus::Open),
            "CLOSED" => Ok(CallStatus::Closed),
            _ => Err(InvalidInputError::CallStatus {
                value: s.to_string(),
            }
            .into()),
        }
    }
}

/// A single emergency-call record.
///
/// The id is assigned by the server; a record without one is a local draft
/// that has not been accepted yet. Drafts serialize without the `id` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub caller_name: String,

    pub position: String,

    pub incident_type: IncidentType,

    pub status: CallStatus,
}

impl Default for EmergencyCall {
    /// The empty new-call draft: no id, blank text fields, FIRE / OPEN.
    fn default() -> Self {
        Self {
            id: None,
            caller_name: String::new(),
            position: String::new(),
            incident_type: IncidentType::Fire,
            status: CallStatus::Open,
        }
    }
}

/// One page of the remote collection, as reported by the server.
///
/// Mirrors the server's page body (`content`, `totalPages`, `number`);
/// any further pagination metadata the server includes is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallPage {
    #[serde(default)]
    pub content: Vec<EmergencyCall>,

    #[serde(default)]
    pub total_pages: u32,

    /// Zero-based index of this page.
    #[serde(default)]
    pub number: u32,
}
