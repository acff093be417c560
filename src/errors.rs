use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Field-keyed validation messages, flattened to wire names so they can
/// travel inside [`SyncError`] regardless of the resource kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(pub BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Every failure the sync layer can surface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    /// Draft rejected locally; nothing was sent.
    #[error("validation failed ({0})")]
    Validation(FieldErrors),

    /// Transport failure: connection refused, DNS, broken body.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response or an error envelope from the backend.
    #[error("server error: {message}")]
    Server { status: Option<u16>, message: String },

    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("unsupported file type: {0}")]
    InvalidType(String),

    #[error("file too large: {size} bytes exceeds the {max} byte limit")]
    TooLarge { size: u64, max: u64 },

    /// A submission was attempted while the store still had a call in flight.
    #[error("another request is still in progress")]
    Busy,
}

/// Discriminant of [`SyncError`] for callers that only branch on the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    Server,
    Timeout,
    InvalidType,
    TooLarge,
    Busy,
}

impl SyncError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::Validation(_) => ErrorKind::Validation,
            SyncError::Network(_) => ErrorKind::Network,
            SyncError::Server { .. } => ErrorKind::Server,
            SyncError::Timeout(_) => ErrorKind::Timeout,
            SyncError::InvalidType(_) => ErrorKind::InvalidType,
            SyncError::TooLarge { .. } => ErrorKind::TooLarge,
            SyncError::Busy => ErrorKind::Busy,
        }
    }

    pub fn server(message: impl Into<String>) -> Self {
        SyncError::Server { status: None, message: message.into() }
    }

    /// Text suitable for a toast or an inline error slot.
    pub fn user_message(&self) -> String {
        match self {
            SyncError::Validation(_) => "Please fix the highlighted fields".to_string(),
            SyncError::Network(_) => {
                "Could not reach the server. Check your connection and try again".to_string()
            }
            SyncError::Server { message, .. } if message.trim().is_empty() => {
                "The server rejected the request".to_string()
            }
            SyncError::Server { message, .. } => message.clone(),
            SyncError::Timeout(_) => "The request took too long. Please try again".to_string(),
            SyncError::InvalidType(mime) => format!("Files of type '{mime}' are not allowed"),
            SyncError::TooLarge { max, .. } => {
                format!("File is too large (max {})", format_bytes(*max))
            }
            SyncError::Busy => "Please wait for the current request to finish".to_string(),
        }
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return SyncError::server(format!("Malformed response: {e}"));
        }
        if let Some(status) = e.status() {
            return SyncError::Server { status: Some(status.as_u16()), message: e.to_string() };
        }
        SyncError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(e: serde_json::Error) -> Self {
        SyncError::server(format!("Malformed response: {e}"))
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;

/// Human readable byte count, e.g. `5MB`, `512KB`.
pub fn format_bytes(bytes: u64) -> String {
    const MB: u64 = 1024 * 1024;
    const KB: u64 = 1024;
    if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else if bytes >= MB {
        format!("{:.1}MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{}KB", bytes / KB)
    } else {
        format!("{bytes}B")
    }
}
