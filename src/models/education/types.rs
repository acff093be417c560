use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::form::field_array::serialize_filled;
use crate::form::{ArrayEdit, FieldArray};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(alias = "_id")]
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub period: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub core_courses: Vec<String>,
    #[serde(default)]
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationDraft {
    pub institution: String,
    pub degree: String,
    pub period: String,
    pub logo: String,
    #[serde(serialize_with = "serialize_filled")]
    pub core_courses: FieldArray<String>,
    pub display_order: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EducationField {
    Institution,
    Degree,
    Period,
    Logo,
    CoreCourses,
    DisplayOrder,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EducationUpdate {
    Institution(String),
    Degree(String),
    Period(String),
    Logo(String),
    CoreCourses(ArrayEdit<String>),
    DisplayOrder(i64),
}
