//! Field-level validation primitives shared by every resource kind.
//!
//! Each helper returns `Some(message)` on failure and `None` when the value
//! is acceptable, so kind-specific rules can be written as a flat list of
//! checks feeding an [`ErrorMap`](crate::form::ErrorMap).

use url::Url;

/// Validate a required text field: non-empty after trimming.
pub fn validate_required(value: &str, label: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("{label} is required"));
    }
    None
}

/// Validate a required text field with a max length.
pub fn validate_required_max(value: &str, label: &str, max_len: usize) -> Option<String> {
    validate_required(value, label).or_else(|| validate_max_len(value, label, max_len))
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_max_len(value: &str, label: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.chars().count() > max_len {
        return Some(format!("{label} must be at most {max_len} characters"));
    }
    None
}

/// Strict absolute URL check. Only http(s) with a host passes.
pub fn is_valid_url(value: &str) -> bool {
    match Url::parse(value.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

/// Root-relative local path such as `/images/logo.png`.
pub fn is_local_path(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.starts_with('/') && !trimmed.starts_with("//") && trimmed.len() > 1
}

/// Optional URL field (link, website): empty is OK, otherwise strict URL.
pub fn validate_optional_url(value: &str, label: &str) -> Option<String> {
    if value.trim().is_empty() || is_valid_url(value) {
        return None;
    }
    Some(format!("{label} must be a valid URL"))
}

/// Optional image/logo field: empty, strict URL, or root-relative path.
pub fn validate_optional_asset(value: &str, label: &str) -> Option<String> {
    if value.trim().is_empty() || is_valid_url(value) || is_local_path(value) {
        return None;
    }
    Some(format!("{label} must be a valid URL or a path starting with '/'"))
}

/// Required image/logo field.
pub fn validate_required_asset(value: &str, label: &str) -> Option<String> {
    validate_required(value, label).or_else(|| validate_optional_asset(value, label))
}

/// A string list is valid when at least one entry is non-blank.
pub fn validate_non_blank_list<S: AsRef<str>>(items: &[S], label: &str) -> Option<String> {
    if items.iter().any(|s| !s.as_ref().trim().is_empty()) {
        return None;
    }
    Some(format!("At least one {label} is required"))
}

/// Ordering keys must not be negative.
pub fn validate_display_order(value: i64) -> Option<String> {
    if value < 0 {
        return Some("Display order must be 0 or greater".to_string());
    }
    None
}

/// Hex colour like `#1e293b` or `#fff`.
pub fn validate_color(value: &str, label: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{label} is required"));
    }
    let hex = trimmed.strip_prefix('#').unwrap_or("");
    let ok = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    if !ok {
        return Some(format!("{label} must be a hex colour such as #1e293b"));
    }
    None
}
