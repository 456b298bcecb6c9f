use super::storage_errors::StorageError;

/// Errors raised while handling a provisioning-lifecycle request
#[derive(Debug, Clone)]
pub enum ProvisioningError {
    /// `BucketName` is absent from the request properties
    MissingBucketName,

    /// `NotificationConfiguration` is absent or empty on create/update
    MissingNotificationConfiguration,

    /// `BucketName` is present but not a valid bucket name
    InvalidBucketName { reason: String },

    /// The storage service rejected the notification configuration
    Storage(StorageError),

    /// The provisioning system's callback endpoint could not be reached
    CallbackFailed { message: String },
}

impl std::fmt::Display for ProvisioningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProvisioningError::MissingBucketName => {
                write!(f, "BucketName has not been provided")
            }
            ProvisioningError::MissingNotificationConfiguration => {
                write!(f, "NotificationConfiguration has not been provided")
            }
            ProvisioningError::InvalidBucketName { reason } => {
                write!(f, "Invalid BucketName: {}", reason)
            }
            ProvisioningError::Storage(e) => write!(f, "{}", e),
            ProvisioningError::CallbackFailed { message } => {
                write!(f, "Unable to deliver provisioning response: {}", message)
            }
        }
    }
}

impl std::error::Error for ProvisioningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProvisioningError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for provisioning operations
pub type ProvisioningResult<T> = Result<T, ProvisioningError>;
