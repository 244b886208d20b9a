//! siren-core - Core types and traits for the siren dispatch console.

pub mod calls;
pub mod credentials;
pub mod error;
pub mod header;
pub mod traits;
pub mod types;

pub use calls::{CallPage, CallStatus, EmergencyCall, IncidentType};
pub use credentials::Credentials;
pub use error::Error;
pub use header::AuthHeader;
pub use traits::CallService;
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
