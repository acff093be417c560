use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_IMAGE_MAX_BYTES: u64 = 5 * 1024 * 1024;
pub const DEFAULT_DOCUMENT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Runtime settings for the admin client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin, without trailing slash.
    pub api_url: String,
    /// Bound for ordinary CRUD calls.
    pub request_timeout: Duration,
    /// Bound for uploads; materially longer than CRUD.
    pub upload_timeout: Duration,
    pub image_max_bytes: u64,
    pub document_max_bytes: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            upload_timeout: Duration::from_secs(DEFAULT_UPLOAD_TIMEOUT_SECS),
            image_max_bytes: DEFAULT_IMAGE_MAX_BYTES,
            document_max_bytes: DEFAULT_DOCUMENT_MAX_BYTES,
        }
    }
}

impl ClientConfig {
    /// Load `.env` (if present) and read `PORTFOLIO_*` variables, keeping the
    /// default for anything missing or unparsable.
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                log::warn!("Ignoring unreadable .env file: {e}");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. `from_env` delegates here; tests
    /// pass a map so they never touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = match lookup("PORTFOLIO_API_URL") {
            Some(val) if !val.trim().is_empty() => val.trim().trim_end_matches('/').to_string(),
            Some(_) => {
                log::warn!("PORTFOLIO_API_URL is blank, using {DEFAULT_API_URL}");
                defaults.api_url
            }
            None => defaults.api_url,
        };

        Self {
            api_url,
            request_timeout: Duration::from_secs(read_u64(
                &lookup,
                "PORTFOLIO_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
            upload_timeout: Duration::from_secs(read_u64(
                &lookup,
                "PORTFOLIO_UPLOAD_TIMEOUT_SECS",
                DEFAULT_UPLOAD_TIMEOUT_SECS,
            )),
            image_max_bytes: read_u64(&lookup, "PORTFOLIO_IMAGE_MAX_BYTES", DEFAULT_IMAGE_MAX_BYTES),
            document_max_bytes: read_u64(
                &lookup,
                "PORTFOLIO_DOCUMENT_MAX_BYTES",
                DEFAULT_DOCUMENT_MAX_BYTES,
            ),
        }
    }
}

fn read_u64<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => match val.trim().parse::<u64>() {
            Ok(n) if n > 0 => n,
            _ => {
                log::warn!("{key}={val:?} is not a positive integer, using {default}");
                default
            }
        },
        None => default,
    }
}
