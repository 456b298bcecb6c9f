pub mod metrics;
pub mod provisioning;
pub mod services;
pub mod storage;

// Re-export all port traits for convenience
pub use metrics::{Metric, MetricsSink};
pub use provisioning::ProvisioningCallback;
pub use services::{NotificationService, ProvisioningOutcome, TaggingService};
pub use storage::ObjectStore;
