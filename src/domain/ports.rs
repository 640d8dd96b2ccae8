use crate::domain::model::{InstitutionRecord, ProfileRecord, ResumeContext};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Location a written `path` ends up at, for reporting.
    fn full_path(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn profile_id(&self) -> &str;
    fn output_file(&self) -> &str;
}

/// Supplies the raw profile and contact info for one person.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch(&self, profile_id: &str) -> Result<ProfileRecord>;
}

/// Supplies the parsed institution reference list.
#[async_trait]
pub trait ReferenceListProvider: Send + Sync {
    async fn load(&self) -> Result<Vec<InstitutionRecord>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ProfileRecord>;
    async fn transform(&self, data: ProfileRecord) -> Result<ResumeContext>;
    async fn load(&self, result: ResumeContext) -> Result<String>;
}
