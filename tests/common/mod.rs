//! Shared test infrastructure.
//!
//! - `FakeCollection<R>`: in-memory collection endpoint with failure
//!   injection, call counters and server-side active-set enforcement.
//! - `FakeUploader`: scripted upload endpoint.
//! - `RecordingNotifier`: captures every notice.
//! - `server`: actix-web mock of the portfolio API for HTTP tests.

#![allow(dead_code)]

pub mod server;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Notify;

use portfolio_admin::api::{CollectionApi, UploadApi, UploadReceipt};
use portfolio_admin::models::*;
use portfolio_admin::{
    Draft, FileDescriptor, Notice, NoticeLevel, Notifier, Resource, ResourceStore, Result,
    SyncError, UploadCoordinator, UploadPolicy,
};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const MB: u64 = 1024 * 1024;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(5);

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 24 hex chars, shaped like the backend's document ids.
pub fn new_id() -> String {
    hex::encode(rand::random::<[u8; 12]>())
}

// ============================================================================
// NOTIFIER
// ============================================================================

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn messages(&self, level: NoticeLevel) -> Vec<String> {
        self.notices().into_iter().filter(|n| n.level == level).map(|n| n.message).collect()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

// ============================================================================
// RECORD CONSTRUCTION
// ============================================================================

/// How the fake backend turns a submitted draft into a stored record.
/// Array fields keep only their filled rows, matching the JSON body.
pub trait FakeRecord: Resource {
    fn build(id: String, draft: &Self::Draft, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self;

    fn set_active(&mut self, _active: bool) {}

    fn created_at(&self) -> DateTime<Utc>;
}

impl FakeRecord for Cv {
    fn build(id: String, d: &CvDraft, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Cv {
            id,
            title: d.title.clone(),
            description: d.description.clone(),
            download_link: d.download_link.clone(),
            file_name: d.file_name.clone(),
            file_size: d.file_size,
            file_type: d.file_type.clone(),
            is_active: d.is_active,
            created_at,
            updated_at,
        }
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl FakeRecord for PublicProfile {
    fn build(id: String, d: &ProfileDraft, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        PublicProfile {
            id,
            name: d.name.clone(),
            tagline: d.tagline.clone(),
            headlines: d.headlines.filled(),
            bio: d.bio.clone(),
            image: d.image.clone(),
            social_links: d.social_links.filled(),
            is_active: d.is_active,
            created_at,
            updated_at,
        }
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl FakeRecord for Education {
    fn build(id: String, d: &EducationDraft, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Education {
            id,
            institution: d.institution.clone(),
            degree: d.degree.clone(),
            period: d.period.clone(),
            logo: d.logo.clone(),
            core_courses: d.core_courses.filled(),
            display_order: d.display_order,
            created_at,
            updated_at,
        }
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl FakeRecord for Experience {
    fn build(id: String, d: &ExperienceDraft, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Experience {
            id,
            company: d.company.clone(),
            job_title: d.job_title.clone(),
            period: d.period.clone(),
            location: d.location.clone(),
            logo: d.logo.clone(),
            website: d.website.clone(),
            descriptions: d.descriptions.filled(),
            display_order: d.display_order,
            created_at,
            updated_at,
        }
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl FakeRecord for Honor {
    fn build(id: String, d: &HonorDraft, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Honor {
            id,
            title: d.title.clone(),
            issuer: d.issuer.clone(),
            date: d.date.clone(),
            description: d.description.clone(),
            image: d.image.clone(),
            link: d.link.clone(),
            display_order: d.display_order,
            created_at,
            updated_at,
        }
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl FakeRecord for Skill {
    fn build(id: String, d: &SkillDraft, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Skill {
            id,
            name: d.name.clone(),
            category: d.category.clone(),
            icon_type: d.icon_type,
            icon_url: d.icon_url.clone(),
            icon_name: d.icon_name.clone(),
            color: d.color.clone(),
            level: d.level,
            display_order: d.display_order,
            created_at,
            updated_at,
        }
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// ============================================================================
// FAKE COLLECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    List,
    Create,
    Update,
    Delete,
}

/// In-memory collection endpoint. Failures are queued per call type and
/// consumed in order; an empty queue means success.
pub struct FakeCollection<R: FakeRecord> {
    records: Mutex<Vec<R>>,
    failures: Mutex<VecDeque<(Call, SyncError)>>,
    calls: Mutex<Vec<Call>>,
    /// Demote other active records on save, like the real backend.
    enforce_single_active: bool,
    delay: Mutex<Option<Duration>>,
    gate: Mutex<Option<Arc<Notify>>>,
    saves: AtomicUsize,
}

impl<R: FakeRecord> FakeCollection<R> {
    pub fn new() -> Arc<Self> {
        Self::with_policy(true)
    }

    /// A backend that forgets to demote the previous active record.
    pub fn without_enforcement() -> Arc<Self> {
        Self::with_policy(false)
    }

    fn with_policy(enforce_single_active: bool) -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(Vec::new()),
            failures: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            enforce_single_active,
            delay: Mutex::new(None),
            gate: Mutex::new(None),
            saves: AtomicUsize::new(0),
        })
    }

    /// Insert directly, bypassing the store.
    pub fn seed(&self, draft: &R::Draft) -> R {
        let now = Utc::now();
        let record = R::build(new_id(), draft, now, now);
        self.records.lock().unwrap().push(record.clone());
        record
    }

    pub fn server_records(&self) -> Vec<R> {
        self.records.lock().unwrap().clone()
    }

    pub fn fail_next(&self, call: Call, error: SyncError) {
        self.failures.lock().unwrap().push_back((call, error));
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Every call waits on the returned handle before answering.
    pub fn hold(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(notify.clone());
        notify
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls().into_iter().filter(|c| *c == call).count()
    }

    async fn enter(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut failures = self.failures.lock().unwrap();
        if let Some(pos) = failures.iter().position(|(c, _)| *c == call) {
            let (_, err) = failures.remove(pos).unwrap();
            return Err(err);
        }
        Ok(())
    }

    fn demote_others(&self, records: &mut [R], keep_id: &str) {
        if !self.enforce_single_active || !R::KIND.single_active() {
            return;
        }
        for r in records.iter_mut().filter(|r| r.id() != keep_id) {
            r.set_active(false);
        }
    }

    /// Strictly increasing timestamps so updates are observable.
    fn tick(&self) -> DateTime<Utc> {
        let n = self.saves.fetch_add(1, Ordering::SeqCst) as i64;
        Utc::now() + chrono::Duration::milliseconds(n + 1)
    }
}

#[async_trait]
impl<R: FakeRecord> CollectionApi<R> for FakeCollection<R> {
    async fn list(&self) -> Result<Vec<R>> {
        self.enter(Call::List).await?;
        Ok(self.server_records())
    }

    async fn create(&self, body: &R::Draft) -> Result<R> {
        self.enter(Call::Create).await?;
        let now = self.tick();
        let record = R::build(new_id(), body, now, now);
        let mut records = self.records.lock().unwrap();
        if record.is_active() == Some(true) {
            self.demote_others(&mut records, record.id());
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, body: &R::Draft) -> Result<R> {
        self.enter(Call::Update).await?;
        let now = self.tick();
        let mut records = self.records.lock().unwrap();
        let idx = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| SyncError::Server { status: Some(404), message: "Not found".into() })?;
        let record = R::build(id.to_string(), body, records[idx].created_at(), now);
        records[idx] = record.clone();
        if record.is_active() == Some(true) {
            self.demote_others(&mut records, id);
        }
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.enter(Call::Delete).await?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(SyncError::Server { status: Some(404), message: "Not found".into() });
        }
        Ok(())
    }
}

pub fn store_over<R: FakeRecord>(
    api: &Arc<FakeCollection<R>>,
    notifier: &Arc<RecordingNotifier>,
) -> ResourceStore<R> {
    ResourceStore::new(api.clone(), notifier.clone(), REQUEST_TIMEOUT)
}

// ============================================================================
// FAKE UPLOADER
// ============================================================================

pub enum UploadBehaviour {
    Succeed,
    Fail(SyncError),
    Hang,
}

pub struct FakeUploader {
    behaviour: Mutex<UploadBehaviour>,
    uploads: Mutex<Vec<(String, String)>>,
}

impl FakeUploader {
    pub fn new(behaviour: UploadBehaviour) -> Arc<Self> {
        Arc::new(Self { behaviour: Mutex::new(behaviour), uploads: Mutex::new(Vec::new()) })
    }

    /// (file name, folder) of every call that reached the endpoint.
    pub fn uploads(&self) -> Vec<(String, String)> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadApi for FakeUploader {
    async fn upload(&self, file: &FileDescriptor, folder: &str) -> Result<UploadReceipt> {
        self.uploads.lock().unwrap().push((file.name().to_string(), folder.to_string()));
        let failure = match &*self.behaviour.lock().unwrap() {
            UploadBehaviour::Succeed => None,
            UploadBehaviour::Fail(e) => Some(Some(e.clone())),
            UploadBehaviour::Hang => Some(None),
        };
        match failure {
            None => Ok(UploadReceipt {
                url: format!("https://cdn.example.com/{folder}/{}", file.name()),
                public_id: Some(format!("{folder}/{}", new_id())),
            }),
            Some(Some(e)) => Err(e),
            // Never answers; the coordinator's timeout has to fire.
            Some(None) => std::future::pending().await,
        }
    }
}

pub fn coordinator(
    uploader: &Arc<FakeUploader>,
    policy: UploadPolicy,
    notifier: &Arc<RecordingNotifier>,
    timeout: Duration,
) -> UploadCoordinator {
    UploadCoordinator::new(uploader.clone(), policy, notifier.clone(), timeout)
}

// ============================================================================
// DRAFT BUILDERS
// ============================================================================

pub fn cv_draft(title: &str, active: bool) -> CvDraft {
    CvDraft {
        title: title.to_string(),
        description: format!("{title} description"),
        download_link: format!("https://files.example.com/{}.pdf", title.to_lowercase().replace(' ', "-")),
        file_name: "resume.pdf".into(),
        file_size: 1024,
        file_type: "application/pdf".into(),
        is_active: active,
    }
}

pub fn profile_draft(name: &str, active: bool) -> ProfileDraft {
    ProfileDraft {
        name: name.to_string(),
        tagline: "Engineer".into(),
        headlines: portfolio_admin::FieldArray::of(["Builds things"]),
        is_active: active,
        ..Default::default()
    }
}

pub fn education_draft(institution: &str, order: i64) -> EducationDraft {
    EducationDraft {
        institution: institution.to_string(),
        degree: "BSc Computer Science".into(),
        period: "2014 - 2018".into(),
        core_courses: portfolio_admin::FieldArray::of(["Operating Systems"]),
        display_order: order,
        ..Default::default()
    }
}

pub fn experience_draft(company: &str, order: i64) -> ExperienceDraft {
    ExperienceDraft {
        company: company.to_string(),
        job_title: "Engineer".into(),
        period: "2020 - 2022".into(),
        descriptions: portfolio_admin::FieldArray::of(["Shipped features"]),
        display_order: order,
        ..Default::default()
    }
}

pub fn honor_draft(title: &str, order: i64) -> HonorDraft {
    HonorDraft {
        title: title.to_string(),
        issuer: "ACM".into(),
        display_order: order,
        ..Default::default()
    }
}

pub fn skill_draft(name: &str, order: i64) -> SkillDraft {
    SkillDraft {
        name: name.to_string(),
        category: "Languages".into(),
        icon_type: IconType::ReactIcon,
        icon_name: "SiRust".into(),
        display_order: order,
        ..Default::default()
    }
}

/// Sanity helper: a builder output must pass its own validation.
pub fn assert_valid<D: Draft>(draft: &D) {
    let errors = draft.validate();
    assert!(errors.is_empty(), "draft unexpectedly invalid: {:?}", errors.to_field_errors());
}
