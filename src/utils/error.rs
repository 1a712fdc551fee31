use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error in {source_name}: {message}")]
    TomlParseError { source_name: String, message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Catalog,
    Serialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AssistError {
    pub fn catalog(message: impl Into<String>) -> Self {
        AssistError::CatalogError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AssistError::IoError(_) => ErrorCategory::Io,
            AssistError::SerializationError(_) => ErrorCategory::Serialization,
            AssistError::TomlParseError { .. }
            | AssistError::ConfigValidationError { .. }
            | AssistError::InvalidConfigValueError { .. }
            | AssistError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AssistError::CatalogError { .. } => ErrorCategory::Catalog,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AssistError::IoError(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                ErrorSeverity::Low
            }
            AssistError::IoError(_) => ErrorSeverity::Critical,
            AssistError::SerializationError(_) => ErrorSeverity::Medium,
            _ => ErrorSeverity::High,
        }
    }

    /// Exit code for the binaries; `0` means the error is only worth a warning.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AssistError::IoError(e) => format!("Could not read or write a file: {}", e),
            AssistError::SerializationError(e) => {
                format!("Could not serialize the conversation: {}", e)
            }
            AssistError::TomlParseError { source_name, .. } => {
                format!("The file '{}' is not valid TOML", source_name)
            }
            AssistError::ConfigValidationError { field, message } => {
                format!("Setting '{}' is invalid: {}", field, message)
            }
            AssistError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' has an invalid value: {}", field, reason)
            }
            AssistError::MissingConfigError { field } => {
                format!("Setting '{}' is required but missing", field)
            }
            AssistError::CatalogError { message } => {
                format!("The recycling catalog is inconsistent: {}", message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the path exists and that you have permission to access it",
            ErrorCategory::Serialization => "Retry the export; if it keeps failing, report the transcript contents",
            ErrorCategory::Configuration => "Fix the configuration file or command line flags and run again",
            ErrorCategory::Catalog => "Make category and provider ids unique and keep ratings within 0-5",
        }
    }
}

pub type Result<T> = std::result::Result<T, AssistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_errors_are_high_severity() {
        let err = AssistError::catalog("duplicate category id 'plastic'");
        assert_eq!(err.category(), ErrorCategory::Catalog);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("duplicate category id"));
    }

    #[test]
    fn test_broken_pipe_is_not_fatal() {
        let err = AssistError::from(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.exit_code(), 0);

        let err = AssistError::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(err.exit_code(), 3);
    }
}
