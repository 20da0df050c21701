use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Columnar decode failed: {0}")]
    DecodeError(#[from] parquet::errors::ParquetError),

    #[error("Columnar read error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    #[error("Image encoding failed: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Image conversion failed: {message}")]
    ConversionError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

pub type Result<T> = std::result::Result<T, PortalError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Config,
    Storage,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PortalError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) => ErrorCategory::Network,
            Self::CsvError(_)
            | Self::DecodeError(_)
            | Self::ArrowError(_)
            | Self::ImageError(_)
            | Self::SerializationError(_)
            | Self::ConversionError { .. }
            | Self::ProcessingError { .. }
            | Self::ValidationError { .. } => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Config,
            Self::IoError(_) => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConversionError { .. } => ErrorSeverity::Low,
            Self::ApiError(_) => ErrorSeverity::Medium,
            Self::CsvError(_)
            | Self::DecodeError(_)
            | Self::ArrowError(_)
            | Self::ImageError(_)
            | Self::SerializationError(_)
            | Self::ProcessingError { .. }
            | Self::ValidationError { .. }
            | Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ApiError(_) => {
                "Check that the portal endpoints are reachable and run again".to_string()
            }
            Self::DecodeError(_) | Self::ArrowError(_) => {
                "Verify the sample file is a valid Parquet table".to_string()
            }
            Self::ConversionError { .. } => {
                "Check the image_vector column for non-numeric values".to_string()
            }
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Review the command-line flags and benchmark file".to_string()
            }
            Self::ValidationError { .. } => "Fix the reported field and retry".to_string(),
            Self::IoError(_) => {
                "Check that the output path exists and is writable".to_string()
            }
            Self::CsvError(_) | Self::SerializationError(_) | Self::ProcessingError { .. } => {
                "Inspect the fetched data for unexpected content".to_string()
            }
            Self::ImageError(_) => {
                "Check the preview dimensions match the pixel vectors".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(e) => format!("Could not reach the portal: {}", e),
            Self::DecodeError(_) | Self::ArrowError(_) => {
                "The sample data file could not be decoded".to_string()
            }
            Self::ConversionError { message } => {
                format!("A sample image could not be rendered: {}", message)
            }
            Self::ValidationError { message } => message.clone(),
            Self::MissingConfigError { field } => format!("Missing configuration: {}", field),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}
