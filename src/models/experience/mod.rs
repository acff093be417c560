mod types;

pub use types::{Experience, ExperienceDraft, ExperienceField, ExperienceUpdate};

use crate::form::{Draft, ErrorMap, FieldArray, FieldName};
use crate::models::{Resource, ResourceKind};
use crate::upload::UploadedFile;
use crate::validate;

impl Resource for Experience {
    type Draft = ExperienceDraft;

    const KIND: ResourceKind = ResourceKind::Experience;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_order(&self) -> Option<i64> {
        Some(self.display_order)
    }
}

impl FieldName for ExperienceField {
    fn name(self) -> &'static str {
        match self {
            ExperienceField::Company => "company",
            ExperienceField::JobTitle => "jobTitle",
            ExperienceField::Period => "period",
            ExperienceField::Location => "location",
            ExperienceField::Logo => "logo",
            ExperienceField::Website => "website",
            ExperienceField::Descriptions => "descriptions",
            ExperienceField::DisplayOrder => "displayOrder",
        }
    }
}

impl Draft for ExperienceDraft {
    type Record = Experience;
    type Field = ExperienceField;
    type Update = ExperienceUpdate;

    fn from_record(e: &Experience) -> Self {
        ExperienceDraft {
            company: e.company.clone(),
            job_title: e.job_title.clone(),
            period: e.period.clone(),
            location: e.location.clone(),
            logo: e.logo.clone(),
            website: e.website.clone(),
            descriptions: FieldArray::from(e.descriptions.clone()),
            display_order: e.display_order,
        }
    }

    fn field_of(update: &ExperienceUpdate) -> ExperienceField {
        match update {
            ExperienceUpdate::Company(_) => ExperienceField::Company,
            ExperienceUpdate::JobTitle(_) => ExperienceField::JobTitle,
            ExperienceUpdate::Period(_) => ExperienceField::Period,
            ExperienceUpdate::Location(_) => ExperienceField::Location,
            ExperienceUpdate::Logo(_) => ExperienceField::Logo,
            ExperienceUpdate::Website(_) => ExperienceField::Website,
            ExperienceUpdate::Descriptions(_) => ExperienceField::Descriptions,
            ExperienceUpdate::DisplayOrder(_) => ExperienceField::DisplayOrder,
        }
    }

    fn apply(&mut self, update: ExperienceUpdate) -> bool {
        match update {
            ExperienceUpdate::Company(v) => self.company = v,
            ExperienceUpdate::JobTitle(v) => self.job_title = v,
            ExperienceUpdate::Period(v) => self.period = v,
            ExperienceUpdate::Location(v) => self.location = v,
            ExperienceUpdate::Logo(v) => self.logo = v,
            ExperienceUpdate::Website(v) => self.website = v,
            ExperienceUpdate::Descriptions(edit) => return self.descriptions.apply(edit),
            ExperienceUpdate::DisplayOrder(v) => self.display_order = v,
        }
        true
    }

    fn validate(&self) -> ErrorMap<ExperienceField> {
        let mut errors = ErrorMap::new();
        errors.check(ExperienceField::Company, validate::validate_required_max(&self.company, "Company", 150));
        errors.check(
            ExperienceField::JobTitle,
            validate::validate_required_max(&self.job_title, "Job title", 150),
        );
        errors.check(ExperienceField::Period, validate::validate_required(&self.period, "Period"));
        errors.check(ExperienceField::Location, validate::validate_max_len(&self.location, "Location", 100));
        errors.check(ExperienceField::Logo, validate::validate_optional_asset(&self.logo, "Logo"));
        errors.check(ExperienceField::Website, validate::validate_optional_url(&self.website, "Website"));
        errors.check(
            ExperienceField::Descriptions,
            validate::validate_non_blank_list(self.descriptions.as_slice(), "responsibility"),
        );
        errors.check(ExperienceField::DisplayOrder, validate::validate_display_order(self.display_order));
        errors
    }

    fn merge_upload(&mut self, file: &UploadedFile) -> Vec<ExperienceField> {
        self.logo = file.url.clone();
        vec![ExperienceField::Logo]
    }
}
