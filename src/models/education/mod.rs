mod types;

pub use types::{Education, EducationDraft, EducationField, EducationUpdate};

use crate::form::{Draft, ErrorMap, FieldArray, FieldName};
use crate::models::{Resource, ResourceKind};
use crate::upload::UploadedFile;
use crate::validate;

impl Resource for Education {
    type Draft = EducationDraft;

    const KIND: ResourceKind = ResourceKind::Education;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_order(&self) -> Option<i64> {
        Some(self.display_order)
    }
}

impl FieldName for EducationField {
    fn name(self) -> &'static str {
        match self {
            EducationField::Institution => "institution",
            EducationField::Degree => "degree",
            EducationField::Period => "period",
            EducationField::Logo => "logo",
            EducationField::CoreCourses => "coreCourses",
            EducationField::DisplayOrder => "displayOrder",
        }
    }
}

impl Draft for EducationDraft {
    type Record = Education;
    type Field = EducationField;
    type Update = EducationUpdate;

    fn from_record(e: &Education) -> Self {
        EducationDraft {
            institution: e.institution.clone(),
            degree: e.degree.clone(),
            period: e.period.clone(),
            logo: e.logo.clone(),
            core_courses: FieldArray::from(e.core_courses.clone()),
            display_order: e.display_order,
        }
    }

    fn field_of(update: &EducationUpdate) -> EducationField {
        match update {
            EducationUpdate::Institution(_) => EducationField::Institution,
            EducationUpdate::Degree(_) => EducationField::Degree,
            EducationUpdate::Period(_) => EducationField::Period,
            EducationUpdate::Logo(_) => EducationField::Logo,
            EducationUpdate::CoreCourses(_) => EducationField::CoreCourses,
            EducationUpdate::DisplayOrder(_) => EducationField::DisplayOrder,
        }
    }

    fn apply(&mut self, update: EducationUpdate) -> bool {
        match update {
            EducationUpdate::Institution(v) => self.institution = v,
            EducationUpdate::Degree(v) => self.degree = v,
            EducationUpdate::Period(v) => self.period = v,
            EducationUpdate::Logo(v) => self.logo = v,
            EducationUpdate::CoreCourses(edit) => return self.core_courses.apply(edit),
            EducationUpdate::DisplayOrder(v) => self.display_order = v,
        }
        true
    }

    fn validate(&self) -> ErrorMap<EducationField> {
        let mut errors = ErrorMap::new();
        errors.check(
            EducationField::Institution,
            validate::validate_required_max(&self.institution, "Institution", 150),
        );
        errors.check(EducationField::Degree, validate::validate_required_max(&self.degree, "Degree", 150));
        errors.check(EducationField::Period, validate::validate_required(&self.period, "Period"));
        errors.check(EducationField::Logo, validate::validate_optional_asset(&self.logo, "Logo"));
        errors.check(
            EducationField::CoreCourses,
            validate::validate_non_blank_list(self.core_courses.as_slice(), "core course"),
        );
        errors.check(EducationField::DisplayOrder, validate::validate_display_order(self.display_order));
        errors
    }

    fn merge_upload(&mut self, file: &UploadedFile) -> Vec<EducationField> {
        self.logo = file.url.clone();
        vec![EducationField::Logo]
    }
}
