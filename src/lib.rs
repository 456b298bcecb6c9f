pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    AffectedResource,
    // Value objects
    BucketName,
    ClassificationReport,
    DomainValidationError,
    EventSummary,
    LifecycleConfiguration,
    LifecycleRule,
    NotificationConfiguration,
    ObjectKey,
    ObjectTag,
    // Errors
    ProvisioningError,
    ProvisioningRequest,
    ProvisioningResponse,
    RecordOutcome,
    // Models
    RemediationPolicy,
    ReportError,
    RequestType,
    Severity,
    StorageError,
    StorageEvent,
    VersionId,
};

// Port types - interfaces for external systems
pub use ports::{
    Metric,
    MetricsSink,
    NotificationService,
    // Storage ports
    ObjectStore,
    ProvisioningCallback,
    ProvisioningOutcome,
    // Service ports
    TaggingService,
};

// Service implementations - business logic
pub use services::{NotificationServiceImpl, TaggingServiceImpl, PHYSICAL_RESOURCE_ID};

// Application factory and configuration
pub use app::{
    create_in_memory_app, create_s3_app, AppBuilder, AppConfig, AppError, AppServices,
    StorageBackend,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::{
    metrics::{EmfMetricsSink, InMemoryMetricsSink},
    provisioning::{HttpProvisioningCallback, RecordingProvisioningCallback},
    storage::{InMemoryObjectStore, S3StorageAdapter},
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        create_in_memory_app, create_s3_app, AppBuilder, AppConfig, AppServices, BucketName,
        MetricsSink, NotificationService, NotificationServiceImpl, ObjectKey, ObjectStore,
        ProvisioningCallback, RemediationPolicy, StorageEvent, TaggingService, TaggingServiceImpl,
        VersionId,
    };
}
