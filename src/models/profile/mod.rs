mod types;

pub use types::{ProfileDraft, ProfileField, ProfileUpdate, PublicProfile, SocialLink};

use crate::form::{BlankEntry, Draft, ErrorMap, FieldArray, FieldName};
use crate::models::{Resource, ResourceKind};
use crate::upload::UploadedFile;
use crate::validate;

impl Resource for PublicProfile {
    type Draft = ProfileDraft;

    const KIND: ResourceKind = ResourceKind::PublicProfile;

    fn id(&self) -> &str {
        &self.id
    }

    fn is_active(&self) -> Option<bool> {
        Some(self.is_active)
    }
}

impl FieldName for ProfileField {
    fn name(self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Tagline => "tagline",
            ProfileField::Headlines => "headlines",
            ProfileField::Bio => "bio",
            ProfileField::Image => "image",
            ProfileField::SocialLinks => "socialLinks",
            ProfileField::IsActive => "isActive",
        }
    }
}

/// A blank row is allowed (the array can't be emptied); any other row needs
/// both a platform and an absolute URL. Reports the first bad row, 1-based.
fn validate_social_links(links: &[SocialLink]) -> Option<String> {
    for (i, link) in links.iter().enumerate() {
        if link.is_blank() {
            continue;
        }
        if link.platform.trim().is_empty() {
            return Some(format!("Social link {} needs a platform", i + 1));
        }
        if !validate::is_valid_url(&link.url) {
            return Some(format!("Social link {} needs a valid URL", i + 1));
        }
    }
    None
}

impl Draft for ProfileDraft {
    type Record = PublicProfile;
    type Field = ProfileField;
    type Update = ProfileUpdate;

    fn from_record(p: &PublicProfile) -> Self {
        ProfileDraft {
            name: p.name.clone(),
            tagline: p.tagline.clone(),
            headlines: FieldArray::from(p.headlines.clone()),
            bio: p.bio.clone(),
            image: p.image.clone(),
            social_links: FieldArray::from(p.social_links.clone()),
            is_active: p.is_active,
        }
    }

    fn field_of(update: &ProfileUpdate) -> ProfileField {
        match update {
            ProfileUpdate::Name(_) => ProfileField::Name,
            ProfileUpdate::Tagline(_) => ProfileField::Tagline,
            ProfileUpdate::Headlines(_) => ProfileField::Headlines,
            ProfileUpdate::Bio(_) => ProfileField::Bio,
            ProfileUpdate::Image(_) => ProfileField::Image,
            ProfileUpdate::SocialLinks(_) => ProfileField::SocialLinks,
            ProfileUpdate::IsActive(_) => ProfileField::IsActive,
        }
    }

    fn apply(&mut self, update: ProfileUpdate) -> bool {
        match update {
            ProfileUpdate::Name(v) => self.name = v,
            ProfileUpdate::Tagline(v) => self.tagline = v,
            ProfileUpdate::Headlines(edit) => return self.headlines.apply(edit),
            ProfileUpdate::Bio(v) => self.bio = v,
            ProfileUpdate::Image(v) => self.image = v,
            ProfileUpdate::SocialLinks(edit) => return self.social_links.apply(edit),
            ProfileUpdate::IsActive(v) => self.is_active = v,
        }
        true
    }

    fn validate(&self) -> ErrorMap<ProfileField> {
        let mut errors = ErrorMap::new();
        errors.check(ProfileField::Name, validate::validate_required_max(&self.name, "Name", 100));
        errors.check(ProfileField::Tagline, validate::validate_required_max(&self.tagline, "Tagline", 200));
        errors.check(
            ProfileField::Headlines,
            validate::validate_non_blank_list(self.headlines.as_slice(), "headline"),
        );
        errors.check(ProfileField::Bio, validate::validate_max_len(&self.bio, "Bio", 2000));
        errors.check(ProfileField::Image, validate::validate_optional_asset(&self.image, "Image"));
        errors.check(ProfileField::SocialLinks, validate_social_links(self.social_links.as_slice()));
        errors
    }

    fn merge_upload(&mut self, file: &UploadedFile) -> Vec<ProfileField> {
        self.image = file.url.clone();
        vec![ProfileField::Image]
    }
}
