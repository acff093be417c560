//! File selection checks and the single-shot upload that feeds a URL back
//! into an open draft.

use std::sync::Arc;
use std::time::Duration;

use crate::api::UploadApi;
use crate::errors::{Result, SyncError, format_bytes};
use crate::notify::{Notice, Notifier};

pub const IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

pub const DOCUMENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Allow-list and size cap for one usage (images vs. CV documents).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub allowed_types: Vec<String>,
    pub max_bytes: u64,
}

impl UploadPolicy {
    pub fn new<S: Into<String>>(allowed_types: impl IntoIterator<Item = S>, max_bytes: u64) -> Self {
        Self {
            allowed_types: allowed_types.into_iter().map(Into::into).collect(),
            max_bytes,
        }
    }

    pub fn images(max_bytes: u64) -> Self {
        Self::new(IMAGE_TYPES.iter().copied(), max_bytes)
    }

    pub fn documents(max_bytes: u64) -> Self {
        Self::new(DOCUMENT_TYPES.iter().copied(), max_bytes)
    }

    pub fn allows_type(&self, mime_type: &str) -> bool {
        let essence = essence(mime_type);
        self.allowed_types.iter().any(|t| t.eq_ignore_ascii_case(&essence))
    }

    /// Type first, then size.
    pub fn check(&self, file: &FileDescriptor) -> Result<()> {
        if !self.allows_type(file.mime_type()) {
            return Err(SyncError::InvalidType(file.mime_type().to_string()));
        }
        if file.size() > self.max_bytes {
            return Err(SyncError::TooLarge { size: file.size(), max: self.max_bytes });
        }
        Ok(())
    }
}

/// `image/PNG; charset=binary` → `image/png`
fn essence(mime_type: &str) -> String {
    mime_type.split(';').next().unwrap_or("").trim().to_ascii_lowercase()
}

/// A file the user picked, with its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), mime_type: mime_type.into(), bytes }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Result of a finished upload, ready to merge into a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub url: String,
    pub public_id: Option<String>,
    pub file_name: String,
    pub file_size: u64,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Selected,
    Uploading,
    Completed(UploadedFile),
    Failed(String),
}

/// Transient state for one upload, from selection to completion or failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    file: FileDescriptor,
    status: UploadStatus,
}

impl UploadTicket {
    pub fn file(&self) -> &FileDescriptor {
        &self.file
    }

    pub fn status(&self) -> &UploadStatus {
        &self.status
    }

    pub fn is_uploading(&self) -> bool {
        self.status == UploadStatus::Uploading
    }

    pub fn uploaded(&self) -> Option<&UploadedFile> {
        match &self.status {
            UploadStatus::Completed(file) => Some(file),
            _ => None,
        }
    }
}

pub struct UploadCoordinator {
    api: Arc<dyn UploadApi>,
    policy: UploadPolicy,
    notifier: Arc<dyn Notifier>,
    timeout: Duration,
}

impl UploadCoordinator {
    pub fn new(
        api: Arc<dyn UploadApi>,
        policy: UploadPolicy,
        notifier: Arc<dyn Notifier>,
        timeout: Duration,
    ) -> Self {
        Self { api, policy, notifier, timeout }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Check type and size before anything touches the network.
    pub fn select_file(&self, file: FileDescriptor) -> Result<UploadTicket> {
        if let Err(e) = self.policy.check(&file) {
            log::warn!("Rejected '{}' ({}, {}): {e}", file.name(), file.mime_type(), format_bytes(file.size()));
            self.notifier.notify(Notice::error(e.user_message()));
            return Err(e);
        }
        Ok(UploadTicket { file, status: UploadStatus::Selected })
    }

    /// Transfer the ticket's file into `folder`. Never retried.
    pub async fn upload(&self, ticket: &mut UploadTicket, folder: &str) -> Result<UploadedFile> {
        if ticket.is_uploading() {
            return Err(SyncError::Busy);
        }
        ticket.status = UploadStatus::Uploading;

        let outcome = match tokio::time::timeout(self.timeout, self.api.upload(&ticket.file, folder)).await {
            Ok(result) => result,
            Err(_) => Err(SyncError::Timeout(self.timeout)),
        };

        match outcome {
            Ok(receipt) => {
                let uploaded = UploadedFile {
                    url: receipt.url,
                    public_id: receipt.public_id,
                    file_name: ticket.file.name.clone(),
                    file_size: ticket.file.size(),
                    mime_type: ticket.file.mime_type.clone(),
                };
                log::info!("Uploaded '{}' to {}", uploaded.file_name, uploaded.url);
                self.notifier.notify(Notice::success("File uploaded successfully"));
                ticket.status = UploadStatus::Completed(uploaded.clone());
                Ok(uploaded)
            }
            Err(e) => {
                let message = match &e {
                    SyncError::Timeout(_) => "Upload timed out. Try a smaller file or a faster connection".to_string(),
                    SyncError::Network(_) => "Upload failed: the server could not be reached".to_string(),
                    other => format!("Upload rejected: {}", other.user_message()),
                };
                log::warn!("Upload of '{}' failed: {e}", ticket.file.name);
                self.notifier.notify(Notice::error(message.clone()));
                ticket.status = UploadStatus::Failed(message);
                Err(e)
            }
        }
    }
}
