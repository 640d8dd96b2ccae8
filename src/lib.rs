pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{CachedReferenceList, FileProfileSource, HttpProfileSource, StaticReferenceList};
pub use config::{cli::LocalStorage, CliConfig, ProfileSourceSetting, Settings};
pub use core::{
    etl::EtlEngine,
    identity::{extract_identity, IdentityExtractor},
    institution::{find_best_match, InstitutionMatcher},
    pipeline::ResumePipeline,
};
pub use domain::model::{InstitutionRecord, ProfileRecord, ResumeContext};
pub use utils::error::{EtlError, Result};
