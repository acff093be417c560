use std::sync::Arc;

use reqwest::Client;

use crate::api::{HttpCollection, HttpUploader, UploadApi};
use crate::config::ClientConfig;
use crate::errors::{Result, SyncError};
use crate::models::{Cv, Education, Experience, Honor, PublicProfile, Resource, Skill};
use crate::notify::Notifier;
use crate::store::ResourceStore;
use crate::upload::{UploadCoordinator, UploadPolicy};

/// Everything an admin page needs: one store per kind and the two upload
/// coordinators, all sharing one HTTP client and one notifier.
pub struct AdminClient {
    pub cvs: ResourceStore<Cv>,
    pub education: ResourceStore<Education>,
    pub experience: ResourceStore<Experience>,
    pub honors: ResourceStore<Honor>,
    pub skills: ResourceStore<Skill>,
    pub profiles: ResourceStore<PublicProfile>,
    /// Logos, portraits, icons.
    pub images: UploadCoordinator,
    /// CV files.
    pub documents: UploadCoordinator,
}

impl AdminClient {
    pub fn new(config: &ClientConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| SyncError::Network(format!("Failed to build HTTP client: {e}")))?;

        log::info!("Admin client targeting {}", config.api_url);

        let uploader: Arc<dyn UploadApi> =
            Arc::new(HttpUploader::new(http.clone(), &config.api_url, config.upload_timeout));

        Ok(Self {
            cvs: http_store(&http, config, &notifier)?,
            education: http_store(&http, config, &notifier)?,
            experience: http_store(&http, config, &notifier)?,
            honors: http_store(&http, config, &notifier)?,
            skills: http_store(&http, config, &notifier)?,
            profiles: http_store(&http, config, &notifier)?,
            images: UploadCoordinator::new(
                uploader.clone(),
                UploadPolicy::images(config.image_max_bytes),
                notifier.clone(),
                config.upload_timeout,
            ),
            documents: UploadCoordinator::new(
                uploader,
                UploadPolicy::documents(config.document_max_bytes),
                notifier,
                config.upload_timeout,
            ),
        })
    }

    /// Fetch every collection. Each store keeps its own error slot, so one
    /// failing kind does not stop the others; the first error is returned.
    pub async fn mount(&self) -> Result<()> {
        let (cvs, education, experience, honors, skills, profiles) = tokio::join!(
            self.cvs.fetch_all(),
            self.education.fetch_all(),
            self.experience.fetch_all(),
            self.honors.fetch_all(),
            self.skills.fetch_all(),
            self.profiles.fetch_all(),
        );
        cvs?;
        education?;
        experience?;
        honors?;
        skills?;
        profiles?;
        Ok(())
    }
}

fn http_store<R: Resource>(
    http: &Client,
    config: &ClientConfig,
    notifier: &Arc<dyn Notifier>,
) -> Result<ResourceStore<R>> {
    let api = Arc::new(HttpCollection::<R>::new(http.clone(), &config.api_url, config.request_timeout)?);
    Ok(ResourceStore::new(api, notifier.clone(), config.request_timeout))
}
