use thiserror::Error;

pub type AuditResult<T> = Result<T, AuditError>;

/// Errors raised at the fallible edges of the crate.
///
/// The calculation engine itself is total and never produces one of these;
/// they come from persistence and input validation.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<validator::ValidationErrors> for AuditError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AuditError::Validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_kept() {
        let err = AuditError::Validation("name is required".to_string());
        assert_eq!(err.to_string(), "Validation error: name is required");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "quota");
        let err: AuditError = io.into();
        assert!(matches!(err, AuditError::Storage(_)));
    }
}
