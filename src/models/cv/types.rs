use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A downloadable CV. At most one is active (linked from the public site).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cv {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub download_link: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Form data for creating/editing a CV.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvDraft {
    pub title: String,
    pub description: String,
    pub download_link: String,
    pub file_name: String,
    pub file_size: u64,
    pub file_type: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CvField {
    Title,
    Description,
    DownloadLink,
    FileName,
    FileSize,
    FileType,
    IsActive,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CvUpdate {
    Title(String),
    Description(String),
    DownloadLink(String),
    FileName(String),
    FileSize(u64),
    FileType(String),
    IsActive(bool),
}
