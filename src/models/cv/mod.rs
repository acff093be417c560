mod types;

pub use types::{Cv, CvDraft, CvField, CvUpdate};

use crate::form::{Draft, ErrorMap, FieldName};
use crate::models::{Resource, ResourceKind};
use crate::upload::UploadedFile;
use crate::validate;

impl Resource for Cv {
    type Draft = CvDraft;

    const KIND: ResourceKind = ResourceKind::Cv;

    fn id(&self) -> &str {
        &self.id
    }

    fn is_active(&self) -> Option<bool> {
        Some(self.is_active)
    }
}

impl FieldName for CvField {
    fn name(self) -> &'static str {
        match self {
            CvField::Title => "title",
            CvField::Description => "description",
            CvField::DownloadLink => "downloadLink",
            CvField::FileName => "fileName",
            CvField::FileSize => "fileSize",
            CvField::FileType => "fileType",
            CvField::IsActive => "isActive",
        }
    }
}

impl Draft for CvDraft {
    type Record = Cv;
    type Field = CvField;
    type Update = CvUpdate;

    fn from_record(cv: &Cv) -> Self {
        CvDraft {
            title: cv.title.clone(),
            description: cv.description.clone(),
            download_link: cv.download_link.clone(),
            file_name: cv.file_name.clone(),
            file_size: cv.file_size,
            file_type: cv.file_type.clone(),
            is_active: cv.is_active,
        }
    }

    fn field_of(update: &CvUpdate) -> CvField {
        match update {
            CvUpdate::Title(_) => CvField::Title,
            CvUpdate::Description(_) => CvField::Description,
            CvUpdate::DownloadLink(_) => CvField::DownloadLink,
            CvUpdate::FileName(_) => CvField::FileName,
            CvUpdate::FileSize(_) => CvField::FileSize,
            CvUpdate::FileType(_) => CvField::FileType,
            CvUpdate::IsActive(_) => CvField::IsActive,
        }
    }

    fn apply(&mut self, update: CvUpdate) -> bool {
        match update {
            CvUpdate::Title(v) => self.title = v,
            CvUpdate::Description(v) => self.description = v,
            CvUpdate::DownloadLink(v) => self.download_link = v,
            CvUpdate::FileName(v) => self.file_name = v,
            CvUpdate::FileSize(v) => self.file_size = v,
            CvUpdate::FileType(v) => self.file_type = v,
            CvUpdate::IsActive(v) => self.is_active = v,
        }
        true
    }

    fn validate(&self) -> ErrorMap<CvField> {
        let mut errors = ErrorMap::new();
        errors.check(CvField::Title, validate::validate_required_max(&self.title, "Title", 100));
        errors.check(
            CvField::Description,
            validate::validate_max_len(&self.description, "Description", 1000),
        );
        // The link only exists once a file has been uploaded.
        errors.check(
            CvField::DownloadLink,
            validate::validate_required_asset(&self.download_link, "Download link"),
        );
        errors
    }

    fn merge_upload(&mut self, file: &UploadedFile) -> Vec<CvField> {
        self.download_link = file.url.clone();
        self.file_name = file.file_name.clone();
        self.file_size = file.file_size;
        self.file_type = file.mime_type.clone();
        vec![CvField::DownloadLink, CvField::FileName, CvField::FileSize, CvField::FileType]
    }
}
