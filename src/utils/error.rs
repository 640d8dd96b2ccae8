use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Reference list is empty, cannot match institution")]
    EmptyReferenceList,

    #[error("Reference list error: {message}")]
    ReferenceListError { message: String },

    #[error("Profile error: {message}")]
    ProfileError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Io,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) | EtlError::ReferenceListError { .. } => ErrorCategory::Network,
            EtlError::IoError(_) => ErrorCategory::Io,
            EtlError::SerializationError(_)
            | EtlError::EmptyReferenceList
            | EtlError::ProfileError { .. }
            | EtlError::ProcessingError { .. } => ErrorCategory::Data,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 空清單只影響國家欄位
            EtlError::EmptyReferenceList => ErrorSeverity::Low,
            EtlError::ApiError(_) | EtlError::ReferenceListError { .. } => ErrorSeverity::Medium,
            EtlError::SerializationError(_)
            | EtlError::ProfileError { .. }
            | EtlError::ProcessingError { .. }
            | EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorSeverity::High,
            EtlError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check the network connection and the endpoint URL, then retry"
            }
            ErrorCategory::Io => "Check that the paths exist and are writable",
            ErrorCategory::Data => "Check that the profile JSON has the expected shape",
            ErrorCategory::Configuration => {
                "Run with --help and check the command line flags or the TOML config file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::ApiError(e) if e.is_timeout() => {
                "The remote service did not answer in time".to_string()
            }
            EtlError::ApiError(_) => "Could not reach the remote service".to_string(),
            EtlError::MissingConfigError { field } => {
                format!("The setting '{}' is required", field)
            }
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("The setting '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
