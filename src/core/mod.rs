pub mod etl;
pub mod identity;
pub mod institution;
pub mod pipeline;
pub mod resume;

pub use crate::domain::model::{InstitutionRecord, ProfileRecord, ResumeContext};
pub use crate::domain::ports::{
    ConfigProvider, Pipeline, ProfileSource, ReferenceListProvider, Storage,
};
pub use crate::utils::error::Result;
