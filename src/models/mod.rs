//! Resource kinds managed from the admin back office.

pub mod cv;
pub mod education;
pub mod experience;
pub mod honor;
pub mod profile;
pub mod skill;

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::form::Draft;

pub use cv::{Cv, CvDraft, CvField, CvUpdate};
pub use education::{Education, EducationDraft, EducationField, EducationUpdate};
pub use experience::{Experience, ExperienceDraft, ExperienceField, ExperienceUpdate};
pub use honor::{Honor, HonorDraft, HonorField, HonorUpdate};
pub use profile::{ProfileDraft, ProfileField, ProfileUpdate, PublicProfile, SocialLink};
pub use skill::{IconType, ProficiencyLevel, Skill, SkillDraft, SkillField, SkillUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Cv,
    Education,
    Experience,
    Honor,
    Skill,
    PublicProfile,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Cv,
        ResourceKind::Education,
        ResourceKind::Experience,
        ResourceKind::Honor,
        ResourceKind::Skill,
        ResourceKind::PublicProfile,
    ];

    /// Singular label used in notifications.
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Cv => "CV",
            ResourceKind::Education => "Education",
            ResourceKind::Experience => "Experience",
            ResourceKind::Honor => "Honor",
            ResourceKind::Skill => "Skill",
            ResourceKind::PublicProfile => "Public profile",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            ResourceKind::Cv => "CVs",
            ResourceKind::Education => "education entries",
            ResourceKind::Experience => "experiences",
            ResourceKind::Honor => "honors",
            ResourceKind::Skill => "skills",
            ResourceKind::PublicProfile => "public profiles",
        }
    }

    /// Collection endpoint path relative to the API origin.
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::Cv => "/api/cv",
            ResourceKind::Education => "/api/education",
            ResourceKind::Experience => "/api/experience",
            ResourceKind::Honor => "/api/honors",
            ResourceKind::Skill => "/api/skills",
            ResourceKind::PublicProfile => "/api/profile",
        }
    }

    /// Kinds where at most one record may be shown on the public site.
    pub fn single_active(self) -> bool {
        matches!(self, ResourceKind::Cv | ResourceKind::PublicProfile)
    }

    /// Kinds that carry a manual `displayOrder` sort key.
    pub fn has_display_order(self) -> bool {
        matches!(
            self,
            ResourceKind::Education
                | ResourceKind::Experience
                | ResourceKind::Honor
                | ResourceKind::Skill
        )
    }
}

/// One persisted record of an admin-managed kind.
pub trait Resource: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Draft: Draft<Record = Self>;

    const KIND: ResourceKind;

    fn id(&self) -> &str;

    /// `Some` only for single-active kinds.
    fn is_active(&self) -> Option<bool> {
        None
    }

    /// `Some` only for kinds with a manual sort key.
    fn display_order(&self) -> Option<i64> {
        None
    }
}
