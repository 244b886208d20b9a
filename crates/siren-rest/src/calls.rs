//! Wire operations for the emergency-call API.

use tracing::{debug, instrument};

use siren_core::calls::{CallPage, EmergencyCall, IncidentType};
use siren_core::{AuthHeader, Result};

use crate::client::RestClient;

/// Query parameters for the paginated list endpoint.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ListCallsQuery {
    page: u32,
    size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    incident_type: Option<IncidentType>,
}

/// Request body for registration.
#[derive(Debug, serde::Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    password: &'a str,
}

impl RestClient {
    /// Fetch one page of the collection.
    #[instrument(skip(self, auth))]
    pub async fn list_calls(
        &self,
        page: u32,
        size: u32,
        incident_type: Option<IncidentType>,
        auth: Option<&AuthHeader>,
    ) -> Result<CallPage> {
        debug!(page, size, "listing emergency calls");

        let query = ListCallsQuery {
            page,
            size,
            incident_type,
        };

        self.get_json_query(&self.api().calls_url(), &query, auth)
            .await
    }

    /// Fetch a single record by id.
    #[instrument(skip(self, auth))]
    pub async fn get_call(&self, id: i64, auth: Option<&AuthHeader>) -> Result<EmergencyCall> {
        debug!(id, "fetching emergency call");

        self.get_json(&self.api().call_url(id), auth).await
    }

    /// Create a new record. The draft is sent without an id; the server
    /// returns the record it stored, id included.
    #[instrument(skip(self, call, auth))]
    pub async fn create_call(
        &self,
        call: &EmergencyCall,
        auth: Option<&AuthHeader>,
    ) -> Result<EmergencyCall> {
        debug!("creating emergency call");

        self.post_json(&self.api().calls_url(), call, auth).await
    }

    /// Replace the record with the given id.
    #[instrument(skip(self, call, auth))]
    pub async fn update_call(
        &self,
        id: i64,
        call: &EmergencyCall,
        auth: Option<&AuthHeader>,
    ) -> Result<EmergencyCall> {
        debug!(id, "updating emergency call");

        self.put_json(&self.api().call_url(id), call, auth).await
    }

    /// Delete the record with the given id.
    #[instrument(skip(self, auth))]
    pub async fn delete_call(&self, id: i64, auth: Option<&AuthHeader>) -> Result<()> {
        debug!(id, "deleting emergency call");

        self.delete_no_content(&self.api().call_url(id), auth).await
    }

    /// Register a new account. Sent without any credential.
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> Result<()> {
        debug!(username, "registering account");

        let request = RegisterRequest { username, password };

        self.post_no_content(&self.api().register_url(), &request, None)
            .await
    }
}
