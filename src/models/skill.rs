use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::form::{Draft, ErrorMap, FieldName};
use crate::models::{Resource, ResourceKind};
use crate::upload::UploadedFile;
use crate::validate;

/// How a skill's icon is rendered. Each variant needs its own companion
/// field: `Custom` an icon URL, `ReactIcon` an icon name, `Text` a colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconType {
    Custom,
    #[default]
    ReactIcon,
    Text,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub icon_type: IconType,
    #[serde(default)]
    pub icon_url: String,
    #[serde(default)]
    pub icon_name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub level: ProficiencyLevel,
    #[serde(default)]
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDraft {
    pub name: String,
    pub category: String,
    pub icon_type: IconType,
    pub icon_url: String,
    pub icon_name: String,
    pub color: String,
    pub level: ProficiencyLevel,
    pub display_order: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkillField {
    Name,
    Category,
    IconType,
    IconUrl,
    IconName,
    Color,
    Level,
    DisplayOrder,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkillUpdate {
    Name(String),
    Category(String),
    IconType(IconType),
    IconUrl(String),
    IconName(String),
    Color(String),
    Level(ProficiencyLevel),
    DisplayOrder(i64),
}

impl Resource for Skill {
    type Draft = SkillDraft;

    const KIND: ResourceKind = ResourceKind::Skill;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_order(&self) -> Option<i64> {
        Some(self.display_order)
    }
}

impl FieldName for SkillField {
    fn name(self) -> &'static str {
        match self {
            SkillField::Name => "name",
            SkillField::Category => "category",
            SkillField::IconType => "iconType",
            SkillField::IconUrl => "iconUrl",
            SkillField::IconName => "iconName",
            SkillField::Color => "color",
            SkillField::Level => "level",
            SkillField::DisplayOrder => "displayOrder",
        }
    }
}

impl Draft for SkillDraft {
    type Record = Skill;
    type Field = SkillField;
    type Update = SkillUpdate;

    fn from_record(s: &Skill) -> Self {
        SkillDraft {
            name: s.name.clone(),
            category: s.category.clone(),
            icon_type: s.icon_type,
            icon_url: s.icon_url.clone(),
            icon_name: s.icon_name.clone(),
            color: s.color.clone(),
            level: s.level,
            display_order: s.display_order,
        }
    }

    fn field_of(update: &SkillUpdate) -> SkillField {
        match update {
            SkillUpdate::Name(_) => SkillField::Name,
            SkillUpdate::Category(_) => SkillField::Category,
            SkillUpdate::IconType(_) => SkillField::IconType,
            SkillUpdate::IconUrl(_) => SkillField::IconUrl,
            SkillUpdate::IconName(_) => SkillField::IconName,
            SkillUpdate::Color(_) => SkillField::Color,
            SkillUpdate::Level(_) => SkillField::Level,
            SkillUpdate::DisplayOrder(_) => SkillField::DisplayOrder,
        }
    }

    fn apply(&mut self, update: SkillUpdate) -> bool {
        match update {
            SkillUpdate::Name(v) => self.name = v,
            SkillUpdate::Category(v) => self.category = v,
            SkillUpdate::IconType(v) => self.icon_type = v,
            SkillUpdate::IconUrl(v) => self.icon_url = v,
            SkillUpdate::IconName(v) => self.icon_name = v,
            SkillUpdate::Color(v) => self.color = v,
            SkillUpdate::Level(v) => self.level = v,
            SkillUpdate::DisplayOrder(v) => self.display_order = v,
        }
        true
    }

    fn validate(&self) -> ErrorMap<SkillField> {
        let mut errors = ErrorMap::new();
        errors.check(SkillField::Name, validate::validate_required_max(&self.name, "Name", 60));
        errors.check(SkillField::Category, validate::validate_required_max(&self.category, "Category", 60));

        // Companion field depends on the icon discriminant.
        match self.icon_type {
            IconType::Custom => {
                errors.check(SkillField::IconUrl, validate::validate_required_asset(&self.icon_url, "Icon URL"))
            }
            IconType::ReactIcon => {
                errors.check(SkillField::IconName, validate::validate_required(&self.icon_name, "Icon name"))
            }
            IconType::Text => errors.check(SkillField::Color, validate::validate_color(&self.color, "Color")),
        }

        errors.check(SkillField::DisplayOrder, validate::validate_display_order(self.display_order));
        errors
    }

    fn merge_upload(&mut self, file: &UploadedFile) -> Vec<SkillField> {
        self.icon_url = file.url.clone();
        vec![SkillField::IconUrl]
    }
}
