pub mod cli;
pub mod toml_config;

use crate::adapters::universities::{
    DEFAULT_CACHE_MAX_AGE_DAYS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_UNIVERSITIES_CACHE,
    DEFAULT_UNIVERSITIES_URL,
};
use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range,
    validate_required_field, validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use toml_config::ResumeConfig;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_OUTPUT_FILE: &str = "resume_context.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "resume-etl")]
#[command(about = "Build a resume template context from a professional profile")]
pub struct CliConfig {
    /// Profile id, as in https://www.linkedin.com/in/{profile_id}/
    #[arg(long)]
    pub profile_id: Option<String>,

    /// Saved profile document (JSON with `profile` and `contact`)
    #[arg(long, conflicts_with = "profile_endpoint")]
    pub profile_path: Option<String>,

    /// Service serving profile documents at {endpoint}/{profile_id}
    #[arg(long)]
    pub profile_endpoint: Option<String>,

    #[arg(long, help = "Directory the context is written to [default: ./output]")]
    pub output_path: Option<String>,

    #[arg(long, help = "File name of the context [default: resume_context.json]")]
    pub output_file: Option<String>,

    #[arg(long, help = "Local cache of the universities list")]
    pub universities_cache: Option<String>,

    #[arg(long, help = "Where the universities list is downloaded from")]
    pub universities_url: Option<String>,

    #[arg(long, help = "Refresh the universities cache after this many days [default: 30]")]
    pub cache_max_age_days: Option<u64>,

    #[arg(long, help = "HTTP timeout in seconds [default: 3]")]
    pub request_timeout_secs: Option<u64>,

    /// TOML settings file; command line flags override it
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ProfileSourceSetting {
    File(String),
    Http(String),
}

/// Fully resolved settings: defaults < TOML file < command line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub profile_id: String,
    pub profile_source: ProfileSourceSetting,
    pub output_path: String,
    pub output_file: String,
    pub universities_cache: String,
    pub universities_url: String,
    pub cache_max_age_days: u64,
    pub request_timeout_secs: u64,
}

impl CliConfig {
    pub fn resolve(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                ResumeConfig::from_file(path)?
            }
            None => ResumeConfig::default(),
        };
        self.resolve_with(file)
    }

    pub fn resolve_with(&self, file: ResumeConfig) -> Result<Settings> {
        let profile_id = self.profile_id.clone().or(file.source.profile_id);
        let profile_id = validate_required_field("profile_id", &profile_id)?.clone();

        let profile_source = match (&self.profile_path, &self.profile_endpoint) {
            (Some(path), _) => ProfileSourceSetting::File(path.clone()),
            (None, Some(endpoint)) => ProfileSourceSetting::Http(endpoint.clone()),
            (None, None) => match (file.source.profile_path, file.source.endpoint) {
                (Some(_), Some(_)) => {
                    return Err(EtlError::ConfigError {
                        message: "source.profile_path and source.endpoint are mutually exclusive"
                            .to_string(),
                    })
                }
                (Some(path), None) => ProfileSourceSetting::File(path),
                (None, Some(endpoint)) => ProfileSourceSetting::Http(endpoint),
                (None, None) => {
                    return Err(EtlError::MissingConfigError {
                        field: "profile_path or profile_endpoint".to_string(),
                    })
                }
            },
        };

        Ok(Settings {
            profile_id,
            profile_source,
            output_path: self
                .output_path
                .clone()
                .or(file.output.path)
                .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string()),
            output_file: self
                .output_file
                .clone()
                .or(file.output.file)
                .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string()),
            universities_cache: self
                .universities_cache
                .clone()
                .or(file.reference_list.cache_path)
                .unwrap_or_else(|| DEFAULT_UNIVERSITIES_CACHE.to_string()),
            universities_url: self
                .universities_url
                .clone()
                .or(file.reference_list.url)
                .unwrap_or_else(|| DEFAULT_UNIVERSITIES_URL.to_string()),
            cache_max_age_days: self
                .cache_max_age_days
                .or(file.reference_list.max_age_days)
                .unwrap_or(DEFAULT_CACHE_MAX_AGE_DAYS),
            request_timeout_secs: self
                .request_timeout_secs
                .or(file.source.timeout_seconds)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        })
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("profile_id", &self.profile_id)?;
        match &self.profile_source {
            ProfileSourceSetting::File(path) => validate_path("profile_path", path)?,
            ProfileSourceSetting::Http(endpoint) => validate_url("profile_endpoint", endpoint)?,
        }
        validate_path("output_path", &self.output_path)?;
        validate_path("output_file", &self.output_file)?;
        validate_path("universities_cache", &self.universities_cache)?;
        validate_url("universities_url", &self.universities_url)?;
        validate_positive_number("cache_max_age_days", self.cache_max_age_days, 1)?;
        validate_range("request_timeout_secs", self.request_timeout_secs, 1, 300)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn profile_id(&self) -> &str {
        &self.profile_id
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }
}
