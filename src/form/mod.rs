//! Create/edit flows: drafts, field-keyed errors and the session that ties
//! them to a store and an upload coordinator.

pub mod field_array;

use std::collections::BTreeMap;
use std::fmt::Debug;

use serde::Serialize;

use crate::errors::{FieldErrors, Result, SyncError};
use crate::models::Resource;
use crate::store::ResourceStore;
use crate::upload::{FileDescriptor, UploadCoordinator, UploadTicket, UploadedFile};

pub use field_array::{ArrayEdit, BlankEntry, FieldArray};

/// Closed set of field names for one resource kind.
pub trait FieldName: Copy + Ord + Debug + Send + Sync + 'static {
    /// camelCase wire name, also the key used in [`FieldErrors`].
    fn name(self) -> &'static str;
}

/// Mutable value bag for one resource's fields.
pub trait Draft: Clone + Default + Debug + Serialize + Send + Sync + 'static {
    type Record: Resource<Draft = Self>;
    type Field: FieldName;
    /// Tagged union of "set this field to this value".
    type Update: Debug + Send;

    fn from_record(record: &Self::Record) -> Self;

    fn field_of(update: &Self::Update) -> Self::Field;

    /// Returns whether the draft changed (array removals can be refused).
    fn apply(&mut self, update: Self::Update) -> bool;

    fn validate(&self) -> ErrorMap<Self::Field>;

    /// Merge an upload result into the draft and return the fields it filled.
    fn merge_upload(&mut self, _file: &UploadedFile) -> Vec<Self::Field> {
        Vec::new()
    }
}

/// Field-keyed validation messages. Non-empty means the draft is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMap<F: FieldName> {
    entries: BTreeMap<F, String>,
}

impl<F: FieldName> Default for ErrorMap<F> {
    fn default() -> Self {
        Self { entries: BTreeMap::new() }
    }
}

impl<F: FieldName> ErrorMap<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a validation helper. The first message for a
    /// field wins.
    pub fn check(&mut self, field: F, outcome: Option<String>) {
        if let Some(msg) = outcome {
            self.entries.entry(field).or_insert(msg);
        }
    }

    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.entries.insert(field, message.into());
    }

    pub fn clear(&mut self, field: F) {
        self.entries.remove(&field);
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: F) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.entries.keys().copied()
    }

    pub fn to_field_errors(&self) -> FieldErrors {
        FieldErrors(self.entries.iter().map(|(f, m)| (f.name(), m.clone())).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

pub type FieldOf<R> = <<R as Resource>::Draft as Draft>::Field;
pub type UpdateOf<R> = <<R as Resource>::Draft as Draft>::Update;

/// One open create/edit form. Discard it on cancel or after a successful
/// submit.
pub struct FormSession<R: Resource> {
    mode: FormMode,
    draft: R::Draft,
    errors: ErrorMap<FieldOf<R>>,
    ticket: Option<UploadTicket>,
    error_message: Option<String>,
}

impl<R: Resource> FormSession<R> {
    pub fn for_create() -> Self {
        Self::with_draft(FormMode::Create, R::Draft::default())
    }

    /// Start from an explicit draft instead of the blank default.
    pub fn for_create_with(draft: R::Draft) -> Self {
        Self::with_draft(FormMode::Create, draft)
    }

    pub fn for_edit(record: &R) -> Self {
        Self::with_draft(
            FormMode::Edit(record.id().to_string()),
            R::Draft::from_record(record),
        )
    }

    fn with_draft(mode: FormMode, draft: R::Draft) -> Self {
        Self { mode, draft, errors: ErrorMap::new(), ticket: None, error_message: None }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &R::Draft {
        &self.draft
    }

    pub fn errors(&self) -> &ErrorMap<FieldOf<R>> {
        &self.errors
    }

    /// Last non-field error (network, server, upload).
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn upload_ticket(&self) -> Option<&UploadTicket> {
        self.ticket.as_ref()
    }

    /// Apply one field edit. Clears that field's error only, and only when
    /// the draft actually changed (a refused removal keeps it).
    pub fn apply(&mut self, update: UpdateOf<R>) -> bool {
        let field = R::Draft::field_of(&update);
        let changed = self.draft.apply(update);
        if changed {
            self.errors.clear(field);
        }
        changed
    }

    /// Re-run validation; returns whether the draft is submittable.
    pub fn validate(&mut self) -> bool {
        self.errors = self.draft.validate();
        self.errors.is_empty()
    }

    pub fn attach_upload(&mut self, file: &UploadedFile) {
        for field in self.draft.merge_upload(file) {
            self.errors.clear(field);
        }
    }

    /// Validate, transfer and merge a file. On failure the draft keeps
    /// whatever file fields it had before.
    pub async fn upload(
        &mut self,
        coordinator: &UploadCoordinator,
        file: FileDescriptor,
        folder: &str,
    ) -> Result<UploadedFile> {
        let ticket = match coordinator.select_file(file) {
            Ok(ticket) => self.ticket.insert(ticket),
            Err(e) => {
                self.error_message = Some(e.user_message());
                return Err(e);
            }
        };

        match coordinator.upload(ticket, folder).await {
            Ok(uploaded) => {
                self.attach_upload(&uploaded);
                self.error_message = None;
                Ok(uploaded)
            }
            Err(e) => {
                self.error_message = Some(e.user_message());
                Err(e)
            }
        }
    }

    pub fn can_submit(&self, store: &ResourceStore<R>) -> bool {
        !store.is_loading()
    }

    /// Validate locally, then create or update through the store. The draft
    /// is left intact on any failure so the user can retry.
    pub async fn submit(&mut self, store: &ResourceStore<R>) -> Result<R> {
        if !self.validate() {
            return Err(SyncError::Validation(self.errors.to_field_errors()));
        }
        if !self.can_submit(store) {
            let e = SyncError::Busy;
            self.error_message = Some(e.user_message());
            return Err(e);
        }

        let outcome = match &self.mode {
            FormMode::Create => store.create(&self.draft).await,
            FormMode::Edit(id) => store.update(id, &self.draft).await,
        };

        match outcome {
            Ok(record) => {
                self.error_message = None;
                self.ticket = None;
                Ok(record)
            }
            Err(e) => {
                if let SyncError::Validation(_) = e {
                    self.errors = self.draft.validate();
                }
                self.error_message = Some(e.user_message());
                Err(e)
            }
        }
    }
}
