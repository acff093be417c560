use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::form::{Draft, ErrorMap, FieldName};
use crate::models::{Resource, ResourceKind};
use crate::upload::UploadedFile;
use crate::validate;

/// An award, certification or other distinction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Honor {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub issuer: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HonorDraft {
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub description: String,
    pub image: String,
    pub link: String,
    pub display_order: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HonorField {
    Title,
    Issuer,
    Date,
    Description,
    Image,
    Link,
    DisplayOrder,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HonorUpdate {
    Title(String),
    Issuer(String),
    Date(String),
    Description(String),
    Image(String),
    Link(String),
    DisplayOrder(i64),
}

impl Resource for Honor {
    type Draft = HonorDraft;

    const KIND: ResourceKind = ResourceKind::Honor;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_order(&self) -> Option<i64> {
        Some(self.display_order)
    }
}

impl FieldName for HonorField {
    fn name(self) -> &'static str {
        match self {
            HonorField::Title => "title",
            HonorField::Issuer => "issuer",
            HonorField::Date => "date",
            HonorField::Description => "description",
            HonorField::Image => "image",
            HonorField::Link => "link",
            HonorField::DisplayOrder => "displayOrder",
        }
    }
}

impl Draft for HonorDraft {
    type Record = Honor;
    type Field = HonorField;
    type Update = HonorUpdate;

    fn from_record(h: &Honor) -> Self {
        HonorDraft {
            title: h.title.clone(),
            issuer: h.issuer.clone(),
            date: h.date.clone(),
            description: h.description.clone(),
            image: h.image.clone(),
            link: h.link.clone(),
            display_order: h.display_order,
        }
    }

    fn field_of(update: &HonorUpdate) -> HonorField {
        match update {
            HonorUpdate::Title(_) => HonorField::Title,
            HonorUpdate::Issuer(_) => HonorField::Issuer,
            HonorUpdate::Date(_) => HonorField::Date,
            HonorUpdate::Description(_) => HonorField::Description,
            HonorUpdate::Image(_) => HonorField::Image,
            HonorUpdate::Link(_) => HonorField::Link,
            HonorUpdate::DisplayOrder(_) => HonorField::DisplayOrder,
        }
    }

    fn apply(&mut self, update: HonorUpdate) -> bool {
        match update {
            HonorUpdate::Title(v) => self.title = v,
            HonorUpdate::Issuer(v) => self.issuer = v,
            HonorUpdate::Date(v) => self.date = v,
            HonorUpdate::Description(v) => self.description = v,
            HonorUpdate::Image(v) => self.image = v,
            HonorUpdate::Link(v) => self.link = v,
            HonorUpdate::DisplayOrder(v) => self.display_order = v,
        }
        true
    }

    fn validate(&self) -> ErrorMap<HonorField> {
        let mut errors = ErrorMap::new();
        errors.check(HonorField::Title, validate::validate_required_max(&self.title, "Title", 150));
        errors.check(HonorField::Issuer, validate::validate_required_max(&self.issuer, "Issuer", 150));
        errors.check(HonorField::Image, validate::validate_optional_asset(&self.image, "Image"));
        errors.check(HonorField::Link, validate::validate_optional_url(&self.link, "Link"));
        errors.check(HonorField::DisplayOrder, validate::validate_display_order(self.display_order));
        errors
    }

    fn merge_upload(&mut self, file: &UploadedFile) -> Vec<HonorField> {
        self.image = file.url.clone();
        vec![HonorField::Image]
    }
}
