//! Emergency-call records and page views.

mod types;

pub use types::{CallPage, CallStatus, EmergencyCall, IncidentType};
