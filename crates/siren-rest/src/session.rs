//! In-memory session store.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use siren_core::calls::{CallPage, EmergencyCall, IncidentType};
use siren_core::traits::CallService;
use siren_core::{AuthHeader, Credentials, Result};

use crate::client::RestClient;

/// Holds the active credential for the lifetime of the process.
///
/// The store starts unauthenticated. [`login`](SessionStore::login) is the
/// only way in and [`logout`](SessionStore::logout) the only way out; the
/// credential is never written to disk and dies with the process. Clones
/// share the same underlying state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    client: RestClient,
    header: RwLock<Option<AuthHeader>>,
}

impl SessionStore {
    /// Create an unauthenticated store over the given client.
    pub fn new(client: RestClient) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                header: RwLock::new(None),
            }),
        }
    }

    /// Attempt to authenticate against the API.
    ///
    /// Derives the candidate header from the credentials and validates it
    /// with a minimal read of the collection (page 0, size 1). On success
    /// the candidate becomes the active credential. Any failure, whether a
    /// rejected credential or an unreachable server, yields `false` and
    /// leaves the store unauthenticated.
    #[instrument(skip(self, credentials), fields(username = credentials.username()))]
    pub async fn login(&self, credentials: &Credentials) -> bool {
        let candidate = credentials.basic_header();

        match self.inner.client.list_calls(0, 1, None, Some(&candidate)).await {
            Ok(_) => {
                *self.inner.header.write().unwrap() = Some(candidate);
                info!("session established");
                true
            }
            Err(e) => {
                debug!(error = %e, "login probe failed");
                false
            }
        }
    }

    /// Drop the active credential. Safe to call when already logged out.
    pub fn logout(&self) {
        let mut header = self.inner.header.write().unwrap();
        if header.take().is_some() {
            info!("session cleared");
        }
    }

    /// Whether a credential is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.inner.header.read().unwrap().is_some()
    }

    /// Snapshot of the current credential, taken at call time.
    ///
    /// Each outgoing request reads the store at the moment it is issued,
    /// so a logout does not retroactively unauthorize a request already in
    /// flight.
    pub fn auth_header(&self) -> Option<AuthHeader> {
        self.inner.header.read().unwrap().clone()
    }
}

#[async_trait]
impl CallService for SessionStore {
    async fn list_calls(
        &self,
        page: u32,
        size: u32,
        incident_type: Option<IncidentType>,
    ) -> Result<CallPage> {
        let header = self.auth_header();
        self.inner
            .client
            .list_calls(page, size, incident_type, header.as_ref())
            .await
    }

    async fn get_call(&self, id: i64) -> Result<EmergencyCall> {
        let header = self.auth_header();
        self.inner.client.get_call(id, header.as_ref()).await
    }

    async fn create_call(&self, call: &EmergencyCall) -> Result<EmergencyCall> {
        let header = self.auth_header();
        self.inner.client.create_call(call, header.as_ref()).await
    }

    async fn update_call(&self, id: i64, call: &EmergencyCall) -> Result<EmergencyCall> {
        let header = self.auth_header();
        self.inner
            .client
            .update_call(id, call, header.as_ref())
            .await
    }

    async fn delete_call(&self, id: i64) -> Result<()> {
        let header = self.auth_header();
        self.inner.client.delete_call(id, header.as_ref()).await
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("api", &self.inner.client.api())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
