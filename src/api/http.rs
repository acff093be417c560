//! `reqwest` implementations of the backend ports.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::{CollectionApi, Envelope, UploadApi, UploadReceipt};
use crate::errors::{Result, SyncError};
use crate::models::Resource;
use crate::upload::FileDescriptor;

pub const UPLOAD_PATH: &str = "/api/upload";

/// Collection endpoints for `R` under `{api_url}{R::KIND.path()}`.
pub struct HttpCollection<R> {
    client: Client,
    collection_url: Url,
    timeout: Duration,
    _kind: PhantomData<fn() -> R>,
}

impl<R: Resource> HttpCollection<R> {
    pub fn new(client: Client, api_url: &str, timeout: Duration) -> Result<Self> {
        let raw = format!("{}{}", api_url.trim_end_matches('/'), R::KIND.path());
        let collection_url = Url::parse(&raw)
            .map_err(|e| SyncError::Network(format!("Invalid API URL '{api_url}': {e}")))?;
        Ok(Self { client, collection_url, timeout, _kind: PhantomData })
    }

    pub fn collection_url(&self) -> &str {
        self.collection_url.as_str()
    }

    /// `{collection_url}/{id}` with `id` percent-encoded as one path segment.
    fn item_url(&self, id: &str) -> Result<Url> {
        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|_| SyncError::Network(format!("Invalid API URL '{}'", self.collection_url)))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Envelope<T>> {
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout))?;
        let body = read_body(response, self.timeout).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl<R: Resource> CollectionApi<R> for HttpCollection<R> {
    async fn list(&self) -> Result<Vec<R>> {
        log::debug!("GET {}", self.collection_url);
        self.send(self.client.get(self.collection_url.clone())).await?.into_result()
    }

    async fn create(&self, body: &R::Draft) -> Result<R> {
        log::debug!("POST {}", self.collection_url);
        self.send(self.client.post(self.collection_url.clone()).json(body)).await?.into_result()
    }

    async fn update(&self, id: &str, body: &R::Draft) -> Result<R> {
        let url = self.item_url(id)?;
        log::debug!("PUT {url}");
        self.send(self.client.put(url).json(body)).await?.into_result()
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.item_url(id)?;
        log::debug!("DELETE {url}");
        self.send::<serde_json::Value>(self.client.delete(url)).await?.into_unit()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    success: bool,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    public_id: Option<String>,
    #[serde(default, alias = "message")]
    error: Option<String>,
}

/// Multipart `POST {api_url}/api/upload` with `file` and `folder` parts.
pub struct HttpUploader {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpUploader {
    pub fn new(client: Client, api_url: &str, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", api_url.trim_end_matches('/'), UPLOAD_PATH),
            timeout,
        }
    }
}

#[async_trait]
impl UploadApi for HttpUploader {
    async fn upload(&self, file: &FileDescriptor, folder: &str) -> Result<UploadReceipt> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime_type())
            .map_err(|_| SyncError::InvalidType(file.mime_type().to_string()))?;
        let form = Form::new().part("file", part).text("folder", folder.to_string());

        log::debug!("POST {} ({} bytes, folder {folder})", self.endpoint, file.size());
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout))?;
        let body = read_body(response, self.timeout).await?;
        let parsed: UploadResponse = serde_json::from_str(&body)?;

        if !parsed.success {
            return Err(SyncError::server(
                parsed.error.unwrap_or_else(|| "Upload failed".to_string()),
            ));
        }
        match parsed.url {
            Some(url) if !url.trim().is_empty() => {
                Ok(UploadReceipt { url, public_id: parsed.public_id })
            }
            _ => Err(SyncError::server("Upload response is missing the file URL")),
        }
    }
}

fn transport_error(e: reqwest::Error, timeout: Duration) -> SyncError {
    if e.is_timeout() {
        SyncError::Timeout(timeout)
    } else {
        SyncError::from(e)
    }
}

/// Read the body, turning non-2xx statuses into `Server` errors that carry
/// the backend's message when it sent one.
async fn read_body(response: Response, timeout: Duration) -> Result<String> {
    let status = response.status();
    let body = response.text().await.map_err(|e| transport_error(e, timeout))?;
    if status.is_success() {
        return Ok(body);
    }

    let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
        .ok()
        .and_then(|env| env.error)
        .unwrap_or_else(|| body.trim().to_string());
    let message = if message.is_empty() {
        status.canonical_reason().unwrap_or("Request failed").to_string()
    } else {
        message
    };
    log::warn!("Backend responded {status}: {message}");
    Err(SyncError::Server { status: Some(status.as_u16()), message })
}
