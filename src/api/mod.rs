//! Ports to the backend. The store and upload coordinator only see these
//! traits; [`http`] holds the production implementations.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SyncError};
use crate::models::Resource;
use crate::upload::FileDescriptor;

pub use http::{HttpCollection, HttpUploader};

/// Collection endpoints for one resource kind.
#[async_trait]
pub trait CollectionApi<R: Resource>: Send + Sync {
    async fn list(&self) -> Result<Vec<R>>;

    async fn create(&self, body: &R::Draft) -> Result<R>;

    async fn update(&self, id: &str, body: &R::Draft) -> Result<R>;

    async fn delete(&self, id: &str) -> Result<()>;
}

/// What the upload endpoint hands back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub url: String,
    /// Opaque storage identifier; images only.
    #[serde(default)]
    pub public_id: Option<String>,
}

#[async_trait]
pub trait UploadApi: Send + Sync {
    async fn upload(&self, file: &FileDescriptor, folder: &str) -> Result<UploadReceipt>;
}

/// `{ "success": bool, "data": …, "error": "…" }` as returned by the
/// collection endpoints.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, alias = "message")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Discriminate success from failure. A success without data is a
    /// malformed response.
    pub fn into_result(self) -> Result<T> {
        if !self.success {
            return Err(SyncError::server(
                self.error.unwrap_or_else(|| "Request failed".to_string()),
            ));
        }
        self.data.ok_or_else(|| SyncError::server("Response is missing data"))
    }

    /// For endpoints whose success carries no payload (delete).
    pub fn into_unit(self) -> Result<()> {
        if self.success {
            return Ok(());
        }
        Err(SyncError::server(self.error.unwrap_or_else(|| "Request failed".to_string())))
    }
}
