//! Client-side synchronization layer for the portfolio admin back office.
//!
//! A page constructs a [`ResourceStore`] per resource kind (or the
//! [`AdminClient`] bundle), fetches on mount, and opens a [`FormSession`]
//! for create/edit flows. The session validates locally, routes array-field
//! edits through [`FieldArray`], feeds upload results back into the draft,
//! and submits through the store, which reconciles its list with what the
//! server returns.

pub mod api;
pub mod client;
pub mod config;
pub mod errors;
pub mod form;
pub mod models;
pub mod notify;
pub mod store;
pub mod upload;
pub mod validate;

pub use client::AdminClient;
pub use config::ClientConfig;
pub use errors::{ErrorKind, FieldErrors, Result, SyncError};
pub use form::{ArrayEdit, Draft, ErrorMap, FieldArray, FieldName, FormMode, FormSession};
pub use models::{Resource, ResourceKind};
pub use notify::{LogNotifier, Notice, NoticeLevel, Notifier, NoopNotifier};
pub use store::ResourceStore;
pub use upload::{FileDescriptor, UploadCoordinator, UploadPolicy, UploadTicket, UploadedFile};
