use crate::domain::model::ProfileRecord;
use crate::domain::ports::ProfileSource;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

/// Reads a saved `{ "profile": ..., "contact": ... }` document from disk.
#[derive(Debug, Clone)]
pub struct FileProfileSource {
    path: PathBuf,
}

impl FileProfileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ProfileSource for FileProfileSource {
    async fn fetch(&self, profile_id: &str) -> Result<ProfileRecord> {
        tracing::debug!(
            "Reading profile '{}' from {}",
            profile_id,
            self.path.display()
        );
        let data = tokio::fs::read(&self.path).await?;
        serde_json::from_slice(&data).map_err(|e| EtlError::ProfileError {
            message: format!("{} is not a valid profile document: {}", self.path.display(), e),
        })
    }
}

/// Fetches `GET {endpoint}/{profile_id}` from a service that already holds the profile.
#[derive(Debug, Clone)]
pub struct HttpProfileSource {
    endpoint: String,
    timeout: Duration,
    client: Client,
}

impl HttpProfileSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
            client: Client::new(),
        }
    }

    fn profile_url(&self, profile_id: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(profile_id)
        )
    }
}

#[async_trait]
impl ProfileSource for HttpProfileSource {
    async fn fetch(&self, profile_id: &str) -> Result<ProfileRecord> {
        let url = self.profile_url(profile_id);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(&url).timeout(self.timeout).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(EtlError::ProfileError {
                message: format!("profile '{}' request returned {}", profile_id, response.status()),
            });
        }

        Ok(response.json::<ProfileRecord>().await?)
    }
}
