//! Dashboard state synchronization against the remote collection.

use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use siren_core::calls::{EmergencyCall, IncidentType};
use siren_core::traits::CallService;

/// Records fetched per page. The dashboard always requests full pages.
pub const PAGE_SIZE: u32 = 10;

/// Client-side view over one page of the remote collection.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub calls: Vec<EmergencyCall>,
    /// Zero-based index of the cached page, as reported by the server.
    pub current_page: u32,
    pub total_pages: u32,
}

/// Synchronizes local page and draft state with the remote collection.
///
/// The server is the source of truth: every successful mutation is
/// followed by a re-fetch of the current page, and a fetch response
/// replaces the cached page wholesale. A failed call leaves local state
/// exactly as it was and is logged, not surfaced.
pub struct Dashboard<S> {
    service: S,
    state: RwLock<State>,
    /// Sequence number of the most recently issued fetch. A response is
    /// applied only while it is still the latest, so a slow fetch cannot
    /// overwrite a newer page.
    fetch_seq: AtomicU64,
}

#[derive(Debug, Default)]
struct State {
    page: PageState,
    requested_page: u32,
    filter: Option<IncidentType>,
    new_draft: EmergencyCall,
    edit_draft: Option<EmergencyCall>,
}

impl<S: CallService> Dashboard<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: RwLock::new(State::default()),
            fetch_seq: AtomicU64::new(0),
        }
    }

    /// Snapshot of the cached page.
    pub fn page(&self) -> PageState {
        self.state.read().unwrap().page.clone()
    }

    /// Snapshot of the new-call draft.
    pub fn new_draft(&self) -> EmergencyCall {
        self.state.read().unwrap().new_draft.clone()
    }

    /// Snapshot of the edit draft, if an edit is in progress.
    pub fn edit_draft(&self) -> Option<EmergencyCall> {
        self.state.read().unwrap().edit_draft.clone()
    }

    /// Fetch the requested page and replace the cached view.
    ///
    /// On failure the previous page is kept and the error is logged only.
    pub async fn refresh(&self) {
        let (page, filter) = {
            let state = self.state.read().unwrap();
            (state.requested_page, state.filter)
        };
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;

        match self.service.list_calls(page, PAGE_SIZE, filter).await {
            Ok(fetched) => {
                let mut state = self.state.write().unwrap();
                if seq != self.fetch_seq.load(Ordering::SeqCst) {
                    debug!(page, "discarding stale page response");
                    return;
                }
                state.page = PageState {
                    calls: fetched.content,
                    current_page: fetched.number,
                    total_pages: fetched.total_pages,
                };
            }
            Err(e) => warn!(page, error = %e, "failed to fetch emergency calls"),
        }
    }

    /// Request a page by zero-based index and fetch it.
    ///
    /// No clamping: an out-of-range index is the server's to reject or
    /// clamp, and its response is displayed as-is.
    pub async fn set_page(&self, index: u32) {
        self.state.write().unwrap().requested_page = index;
        self.refresh().await;
    }

    /// Restrict the list to one incident type (or clear the restriction)
    /// and fetch from the first page.
    pub async fn set_filter(&self, filter: Option<IncidentType>) {
        {
            let mut state = self.state.write().unwrap();
            state.filter = filter;
            state.requested_page = 0;
        }
        self.refresh().await;
    }

    /// Replace the new-call draft.
    pub fn set_new_draft(&self, draft: EmergencyCall) {
        self.state.write().unwrap().new_draft = draft;
    }

    /// Submit the new-call draft.
    ///
    /// On success the draft resets to its defaults and the current page is
    /// re-fetched, so the new record appears wherever the server orders
    /// it. On failure the draft is kept for retry; the local list is never
    /// updated optimistically.
    pub async fn create(&self) {
        let draft = self.new_draft();

        match self.service.create_call(&draft).await {
            Ok(created) => {
                debug!(id = ?created.id, "created emergency call");
                self.state.write().unwrap().new_draft = EmergencyCall::default();
                self.refresh().await;
            }
            Err(e) => warn!(error = %e, "failed to create emergency call"),
        }
    }

    /// Copy the cached record with this id into the edit draft.
    ///
    /// Returns false when the record is not on the current page. The draft
    /// is a copy; editing it leaves the cached list untouched until
    /// [`update`](Dashboard::update) succeeds.
    pub fn begin_edit(&self, id: i64) -> bool {
        let mut state = self.state.write().unwrap();
        let found = state
            .page
            .calls
            .iter()
            .find(|call| call.id == Some(id))
            .cloned();
        match found {
            Some(call) => {
                state.edit_draft = Some(call);
                true
            }
            None => false,
        }
    }

    /// Replace the edit draft.
    pub fn set_edit_draft(&self, draft: EmergencyCall) {
        self.state.write().unwrap().edit_draft = Some(draft);
    }

    /// Discard the edit draft without touching the server.
    pub fn cancel_edit(&self) {
        self.state.write().unwrap().edit_draft = None;
    }

    /// Submit the edit draft.
    ///
    /// A missing draft, or a draft without an id, is a no-op. On success
    /// the draft is cleared and the page re-fetched; on failure it stays
    /// active for retry.
    pub async fn update(&self) {
        let Some(draft) = self.edit_draft() else {
            return;
        };
        let Some(id) = draft.id else {
            return;
        };

        match self.service.update_call(id, &draft).await {
            Ok(_) => {
                self.state.write().unwrap().edit_draft = None;
                self.refresh().await;
            }
            Err(e) => warn!(id, error = %e, "failed to update emergency call"),
        }
    }

    /// Delete a record by id. A missing id is a no-op.
    ///
    /// Deleting the last record on a page can shrink the page count; the
    /// re-fetch displays whatever the server returns for the now possibly
    /// out-of-range index.
    pub async fn delete(&self, id: Option<i64>) {
        let Some(id) = id else {
            return;
        };

        match self.service.delete_call(id).await {
            Ok(()) => self.refresh().await,
            Err(e) => warn!(id, error = %e, "failed to delete emergency call"),
        }
    }

    /// Fetch a single record. Failures are logged and yield `None`.
    pub async fn get(&self, id: i64) -> Option<EmergencyCall> {
        match self.service.get_call(id).await {
            Ok(call) => Some(call),
            Err(e) => {
                warn!(id, error = %e, "failed to fetch emergency call");
                None
            }
        }
    }
}
