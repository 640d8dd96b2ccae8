use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting resume ETL process");

        // Extract
        let stage = Instant::now();
        let record = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted profile: {} education, {} experience, {} websites ({:?})",
            record.profile.education.len(),
            record.profile.experience.len(),
            record.contact.websites.len(),
            stage.elapsed()
        );

        // Transform
        let stage = Instant::now();
        let context = self.pipeline.transform(record).await?;
        tracing::info!(
            "Built context for '{}': {} educations, {} works ({:?})",
            context.name,
            context.educations.len(),
            context.works.len(),
            stage.elapsed()
        );

        // Load
        let stage = Instant::now();
        let output_path = self.pipeline.load(context).await?;
        tracing::info!("Output saved to: {} ({:?})", output_path, stage.elapsed());

        tracing::debug!("ETL finished in {:?}", started.elapsed());
        Ok(output_path)
    }
}
