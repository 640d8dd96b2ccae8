use crate::core::identity::IdentityExtractor;
use crate::core::institution::InstitutionMatcher;
use crate::core::resume::ResumeBuilder;
use crate::core::{
    ConfigProvider, Pipeline, ProfileRecord, ProfileSource, ReferenceListProvider, ResumeContext,
    Storage,
};
use crate::utils::error::Result;

pub struct ResumePipeline<S, P, R, C>
where
    S: Storage,
    P: ProfileSource,
    R: ReferenceListProvider,
    C: ConfigProvider,
{
    storage: S,
    profiles: P,
    institutions: R,
    config: C,
    extractor: IdentityExtractor,
}

impl<S, P, R, C> ResumePipeline<S, P, R, C>
where
    S: Storage,
    P: ProfileSource,
    R: ReferenceListProvider,
    C: ConfigProvider,
{
    pub fn new(storage: S, profiles: P, institutions: R, config: C) -> Self {
        Self {
            storage,
            profiles,
            institutions,
            config,
            extractor: IdentityExtractor::default(),
        }
    }

    async fn load_matcher(&self) -> InstitutionMatcher {
        match self.institutions.load().await {
            Ok(records) => {
                if records.is_empty() {
                    tracing::warn!("Reference list is empty, school countries will be blank");
                }
                InstitutionMatcher::new(records)
            }
            Err(e) => {
                // 參考清單失敗不中斷流程，只留空國家欄位
                tracing::warn!(
                    "Could not load reference list: {} ({})",
                    e,
                    e.recovery_suggestion()
                );
                InstitutionMatcher::default()
            }
        }
    }
}

#[async_trait::async_trait]
impl<S, P, R, C> Pipeline for ResumePipeline<S, P, R, C>
where
    S: Storage,
    P: ProfileSource,
    R: ReferenceListProvider,
    C: ConfigProvider,
{
    async fn extract(&self) -> Result<ProfileRecord> {
        let profile_id = self.config.profile_id();
        tracing::info!("Start to visit profile '{}'", profile_id);
        let record = self.profiles.fetch(profile_id).await?;
        tracing::info!("Finish to visit profile '{}'", profile_id);
        Ok(record)
    }

    async fn transform(&self, data: ProfileRecord) -> Result<ResumeContext> {
        let matcher = self.load_matcher().await;
        tracing::debug!("Matching schools against {} institutions", matcher.len());

        let builder = ResumeBuilder::new(&matcher, &self.extractor, self.config.profile_id());
        Ok(builder.build(&data))
    }

    async fn load(&self, result: ResumeContext) -> Result<String> {
        let file_name = self.config.output_file();
        let json_data = serde_json::to_string_pretty(&result)?;

        tracing::debug!("Writing context ({} bytes) to storage", json_data.len());
        self.storage.write_file(file_name, json_data.as_bytes()).await?;

        Ok(self.storage.full_path(file_name))
    }
}
