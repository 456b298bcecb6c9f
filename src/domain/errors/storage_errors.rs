use crate::domain::value_objects::{BucketName, ObjectKey};

/// Errors that can occur during storage operations
#[derive(Debug, Clone)]
pub enum StorageError {
    /// Object not found
    ObjectNotFound { bucket: BucketName, key: ObjectKey },

    /// A configuration document was rejected before reaching the service
    InvalidConfiguration { reason: String },

    /// The storage service rejected or failed an operation
    ServiceError {
        operation: &'static str,
        message: String,
    },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::ObjectNotFound { bucket, key } => {
                write!(f, "Object not found: s3://{}/{}", bucket, key)
            }
            StorageError::InvalidConfiguration { reason } => {
                write!(f, "Invalid configuration: {}", reason)
            }
            StorageError::ServiceError { operation, message } => {
                write!(f, "Storage operation '{}' failed: {}", operation, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
