use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::form::field_array::serialize_filled;
use crate::form::{ArrayEdit, BlankEntry, FieldArray};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

impl SocialLink {
    pub fn new(platform: impl Into<String>, url: impl Into<String>) -> Self {
        Self { platform: platform.into(), url: url.into() }
    }

}

impl BlankEntry for SocialLink {
    fn is_blank(&self) -> bool {
        self.platform.trim().is_empty() && self.url.trim().is_empty()
    }
}

/// The hero section of the public site. At most one is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub tagline: String,
    #[serde(default)]
    pub headlines: Vec<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    pub name: String,
    pub tagline: String,
    #[serde(serialize_with = "serialize_filled")]
    pub headlines: FieldArray<String>,
    pub bio: String,
    pub image: String,
    #[serde(serialize_with = "serialize_filled")]
    pub social_links: FieldArray<SocialLink>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfileField {
    Name,
    Tagline,
    Headlines,
    Bio,
    Image,
    SocialLinks,
    IsActive,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileUpdate {
    Name(String),
    Tagline(String),
    Headlines(ArrayEdit<String>),
    Bio(String),
    Image(String),
    SocialLinks(ArrayEdit<SocialLink>),
    IsActive(bool),
}
