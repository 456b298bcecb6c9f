pub mod errors;
pub mod models;
pub mod value_objects;

// Re-export commonly used types
pub use errors::{
    ProvisioningError, ReportError, StorageError, ValidationError as DomainValidationError,
};
pub use models::*;
pub use value_objects::*;
