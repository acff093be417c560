//! Per-kind CRUD synchronization: the canonical local list and the remote
//! calls that keep it in step with the backend.

pub mod active;

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::api::CollectionApi;
use crate::errors::{Result, SyncError};
use crate::form::Draft;
use crate::models::Resource;
use crate::notify::{Notice, Notifier, Operation, failure_message, success_message};

struct StoreState<R> {
    records: Vec<R>,
    loading: bool,
    loaded: bool,
    error: Option<String>,
}

/// Sets `loading` on creation and clears it on drop, so every exit path
/// (including a dropped future) returns the store to non-loading.
struct LoadingGuard<'a, R> {
    state: &'a Mutex<StoreState<R>>,
}

impl<'a, R> LoadingGuard<'a, R> {
    fn start(state: &'a Mutex<StoreState<R>>) -> Self {
        lock(state).loading = true;
        Self { state }
    }
}

impl<R> Drop for LoadingGuard<'_, R> {
    fn drop(&mut self) {
        lock(self.state).loading = false;
    }
}

fn lock<R>(state: &Mutex<StoreState<R>>) -> MutexGuard<'_, StoreState<R>> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

/// Owns the in-memory list for one resource kind. Only the store's own
/// operations mutate it; callers get clones.
pub struct ResourceStore<R: Resource> {
    api: Arc<dyn CollectionApi<R>>,
    notifier: Arc<dyn Notifier>,
    timeout: Duration,
    state: Mutex<StoreState<R>>,
}

impl<R: Resource> ResourceStore<R> {
    pub fn new(api: Arc<dyn CollectionApi<R>>, notifier: Arc<dyn Notifier>, timeout: Duration) -> Self {
        Self {
            api,
            notifier,
            timeout,
            state: Mutex::new(StoreState {
                records: Vec::new(),
                loading: false,
                loaded: false,
                error: None,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, StoreState<R>> {
        lock(&self.state)
    }

    // ---------------------------------------------------------------------
    // Read access
    // ---------------------------------------------------------------------

    /// Snapshot of the list in insertion order.
    pub fn records(&self) -> Vec<R> {
        self.state().records.clone()
    }

    pub fn len(&self) -> usize {
        self.state().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<R> {
        self.state().records.iter().find(|r| r.id() == id).cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    /// Whether a fetch has ever succeeded.
    pub fn is_loaded(&self) -> bool {
        self.state().loaded
    }

    pub fn last_error(&self) -> Option<String> {
        self.state().error.clone()
    }

    pub fn clear_error(&self) {
        self.state().error = None;
    }

    /// Ordered by `displayOrder`; ties keep insertion order. Kinds without
    /// the key come back unchanged.
    pub fn sorted(&self) -> Vec<R> {
        let mut records = self.records();
        if !R::KIND.has_display_order() {
            return records;
        }
        records.sort_by_key(|r| r.display_order().unwrap_or(0));
        records
    }

    /// The record currently shown on the public site, if the kind has one.
    pub fn active(&self) -> Option<R> {
        self.state().records.iter().find(|r| r.is_active() == Some(true)).cloned()
    }

    // ---------------------------------------------------------------------
    // Remote operations
    // ---------------------------------------------------------------------

    /// Load the whole collection, replacing the local list. On failure the
    /// previous list (empty on first mount) stays.
    pub async fn fetch_all(&self) -> Result<Vec<R>> {
        let _loading = LoadingGuard::start(&self.state);
        match self.bounded(self.api.list()).await {
            Ok(records) => {
                let mut state = self.state();
                state.records = records.clone();
                state.loaded = true;
                state.error = None;
                log::debug!("Fetched {} {}", records.len(), R::KIND.plural());
                Ok(records)
            }
            Err(e) => {
                self.report_failure(Operation::Fetch, &e);
                Err(e)
            }
        }
    }

    /// Alias kept for call sites that re-sync rather than mount.
    pub async fn refresh(&self) -> Result<Vec<R>> {
        self.fetch_all().await
    }

    /// Validate, send, and append the server's record at the end of the list.
    pub async fn create(&self, draft: &R::Draft) -> Result<R> {
        self.check_draft(draft)?;

        let _loading = LoadingGuard::start(&self.state);
        let record = match self.bounded(self.api.create(draft)).await {
            Ok(record) => record,
            Err(e) => {
                self.report_failure(Operation::Create, &e);
                return Err(e);
            }
        };

        {
            let mut state = self.state();
            match state.records.iter().position(|r| r.id() == record.id()) {
                Some(idx) => state.records[idx] = record.clone(),
                None => state.records.push(record.clone()),
            }
            state.error = None;
        }

        if active::requires_resync(None, &record) {
            self.resync().await;
        }
        self.report_success(Operation::Create, &record);
        Ok(record)
    }

    /// Replace the entry matching `id` with the server's representation.
    pub async fn update(&self, id: &str, draft: &R::Draft) -> Result<R> {
        self.check_draft(draft)?;

        let _loading = LoadingGuard::start(&self.state);
        let previous = self.get(id);
        let record = match self.bounded(self.api.update(id, draft)).await {
            Ok(record) => record,
            Err(e) => {
                self.report_failure(Operation::Update, &e);
                return Err(e);
            }
        };

        {
            let mut state = self.state();
            match state.records.iter().position(|r| r.id() == id) {
                Some(idx) => state.records[idx] = record.clone(),
                None => {
                    log::warn!("Updated {} {id} was not in the local list; appending", R::KIND.label());
                    state.records.push(record.clone());
                }
            }
            state.error = None;
        }

        if active::requires_resync(previous.as_ref(), &record) {
            self.resync().await;
        }
        self.report_success(Operation::Update, &record);
        Ok(record)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let _loading = LoadingGuard::start(&self.state);
        if let Err(e) = self.bounded(self.api.delete(id)).await {
            self.report_failure(Operation::Delete, &e);
            return Err(e);
        }

        {
            let mut state = self.state();
            state.records.retain(|r| r.id() != id);
            state.error = None;
        }
        log::info!("{} deleted ({id})", R::KIND.label());
        self.notifier.notify(Notice::success(success_message(R::KIND, Operation::Delete)));
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------------

    async fn bounded<T>(&self, call: impl Future<Output = Result<T>>) -> Result<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(SyncError::Timeout(self.timeout)),
        }
    }

    /// Blocks invalid drafts before any network call.
    fn check_draft(&self, draft: &R::Draft) -> Result<()> {
        let errors = draft.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let e = SyncError::Validation(errors.to_field_errors());
        log::debug!("{} draft rejected locally: {e}", R::KIND.label());
        self.state().error = Some(e.user_message());
        Err(e)
    }

    /// Re-read the list after a mutation that may have moved the active
    /// flag. The server's answer replaces the local list wholesale.
    async fn resync(&self) {
        match self.bounded(self.api.list()).await {
            Ok(records) => {
                active::report_conflict(&records);
                self.state().records = records;
            }
            Err(e) => {
                log::warn!("Could not re-sync {} after saving: {e}", R::KIND.plural());
                self.state().error =
                    Some(format!("Saved, but the list could not be refreshed: {}", e.user_message()));
            }
        }
    }

    fn report_success(&self, op: Operation, record: &R) {
        log::info!("{} {:?} succeeded ({})", R::KIND.label(), op, record.id());
        self.notifier.notify(Notice::success(success_message(R::KIND, op)));
    }

    fn report_failure(&self, op: Operation, e: &SyncError) {
        log::warn!("{} {:?} failed: {e}", R::KIND.label(), op);
        self.state().error = Some(e.user_message());
        self.notifier.notify(Notice::error(failure_message(R::KIND, op, e)));
    }
}
