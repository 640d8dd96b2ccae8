use crate::domain::model::InstitutionRecord;
use crate::domain::ports::ReferenceListProvider;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_UNIVERSITIES_URL: &str = "https://raw.githubusercontent.com/Hipo/university-domains-list/master/world_universities_and_domains.json";
pub const DEFAULT_UNIVERSITIES_CACHE: &str = "world_universities_and_domains.json";
pub const DEFAULT_CACHE_MAX_AGE_DAYS: u64 = 30;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 3;

/// Institution list backed by a local JSON cache that is refreshed from `source_url`.
///
/// The cache is downloaded when it is missing or older than `max_age_days`.
/// A cache that does not parse is downloaded once more; if that copy does
/// not parse either, an empty list is returned.
#[derive(Debug, Clone)]
pub struct CachedReferenceList {
    cache_path: PathBuf,
    source_url: String,
    max_age_days: u64,
    timeout: Duration,
    client: Client,
}

impl CachedReferenceList {
    pub fn new(cache_path: impl Into<PathBuf>, source_url: impl Into<String>) -> Self {
        Self {
            cache_path: cache_path.into(),
            source_url: source_url.into(),
            max_age_days: DEFAULT_CACHE_MAX_AGE_DAYS,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            client: Client::new(),
        }
    }

    pub fn with_max_age_days(mut self, days: u64) -> Self {
        self.max_age_days = days;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    pub fn is_stale(&self) -> Result<bool> {
        let metadata = match std::fs::metadata(&self.cache_path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(true),
            Err(e) => return Err(e.into()),
        };
        let modified: DateTime<Utc> = metadata.modified()?.into();
        let age_days = (Utc::now() - modified).num_days();
        tracing::debug!("Reference list cache is {} days old", age_days);
        Ok(age_days > self.max_age_days as i64)
    }

    async fn download(&self) -> Result<()> {
        tracing::info!("Downloading reference list from {}", self.source_url);
        let response = self
            .client
            .get(&self.source_url)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EtlError::ReferenceListError {
                message: format!(
                    "download from {} returned status {}",
                    self.source_url,
                    response.status()
                ),
            });
        }

        let body = response.bytes().await?;
        if let Some(parent) = self.cache_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.cache_path, &body).await?;
        tracing::debug!(
            "Saved {} bytes to {}",
            body.len(),
            self.cache_path.display()
        );
        Ok(())
    }

    async fn read_cache(&self) -> Result<Vec<InstitutionRecord>> {
        let data = tokio::fs::read(&self.cache_path).await?;
        Ok(serde_json::from_slice(&data)?)
    }
}

#[async_trait]
impl ReferenceListProvider for CachedReferenceList {
    async fn load(&self) -> Result<Vec<InstitutionRecord>> {
        if self.is_stale()? {
            self.download().await?;
        }

        match self.read_cache().await {
            Ok(records) => {
                tracing::debug!("Loaded {} institutions from cache", records.len());
                return Ok(records);
            }
            Err(e) => {
                tracing::warn!("Cached reference list is unreadable ({}), downloading again", e)
            }
        }

        self.download().await?;
        match self.read_cache().await {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(
                    "Cannot recognize the reference list from {} ({}), countries stay blank",
                    self.source_url,
                    e
                );
                Ok(Vec::new())
            }
        }
    }
}

/// Reference list held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticReferenceList(pub Vec<InstitutionRecord>);

#[async_trait]
impl ReferenceListProvider for StaticReferenceList {
    async fn load(&self) -> Result<Vec<InstitutionRecord>> {
        Ok(self.0.clone())
    }
}
