//! Call-collection service trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::calls::{CallPage, EmergencyCall, IncidentType};

/// Access to the remote emergency-call collection.
///
/// The server owns the collection; every method reflects one HTTP call and
/// the returned data is authoritative. Implemented by the REST transport.
#[async_trait]
pub trait CallService: Send + Sync {
    /// Fetch one page of the collection, optionally restricted to a single
    /// incident type. `page` is zero-based.
    async fn list_calls(
        &self,
        page: u32,
        size: u32,
        incident_type: Option<IncidentType>,
    ) -> Result<CallPage>;

    /// Fetch a single record by id.
    async fn get_call(&self, id: i64) -> Result<EmergencyCall>;

    /// Create a new record. The server assigns the id.
    async fn create_call(&self, call: &EmergencyCall) -> Result<EmergencyCall>;

    /// Replace the record with the given id.
    async fn update_call(&self, id: i64, call: &EmergencyCall) -> Result<EmergencyCall>;

    /// Delete the record with the given id.
    async fn delete_call(&self, id: i64) -> Result<()>;
}

/// Shared ownership of a service is itself a service: every call is
/// forwarded to the inner implementation unchanged.
#[async_trait]
impl<T: CallService + ?Sized> CallService for Arc<T> {
    async fn list_calls(
        &self,
        page: u32,
        size: u32,
        incident_type: Option<IncidentType>,
    ) -> Result<CallPage> {
        (**self).list_calls(page, size, incident_type).await
    }

    async fn get_call(&self, id: i64) -> Result<EmergencyCall> {
        (**self).get_call(id).await
    }

    async fn create_call(&self, call: &EmergencyCall) -> Result<EmergencyCall> {
        (**self).create_call(call).await
    }

    async fn update_call(&self, id: i64, call: &EmergencyCall) -> Result<EmergencyCall> {
        (**self).update_call(id, call).await
    }

    async fn delete_call(&self, id: i64) -> Result<()> {
        (**self).delete_call(id).await
    }
}
