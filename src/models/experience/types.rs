use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::form::field_array::serialize_filled;
use crate::form::{ArrayEdit, FieldArray};

/// A position held at a company; `descriptions` are the bullet points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(alias = "_id")]
    pub id: String,
    pub company: String,
    pub job_title: String,
    pub period: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub descriptions: Vec<String>,
    #[serde(default)]
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceDraft {
    pub company: String,
    pub job_title: String,
    pub period: String,
    pub location: String,
    pub logo: String,
    pub website: String,
    #[serde(serialize_with = "serialize_filled")]
    pub descriptions: FieldArray<String>,
    pub display_order: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExperienceField {
    Company,
    JobTitle,
    Period,
    Location,
    Logo,
    Website,
    Descriptions,
    DisplayOrder,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExperienceUpdate {
    Company(String),
    JobTitle(String),
    Period(String),
    Location(String),
    Logo(String),
    Website(String),
    Descriptions(ArrayEdit<String>),
    DisplayOrder(i64),
}
