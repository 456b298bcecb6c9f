use crate::domain::{errors::ProvisioningResult, models::ProvisioningRequest};
use async_trait::async_trait;

/// Service port for provisioning a bucket's notification configuration
#[async_trait]
pub trait NotificationService: Send + Sync + 'static {
    /// Dispatch a provisioning request by its lifecycle verb
    async fn handle(&self, request: &ProvisioningRequest)
        -> ProvisioningResult<ProvisioningOutcome>;
}

/// Result of a successfully handled provisioning request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningOutcome {
    /// Identifier reported to the provisioning system; `None` keeps the
    /// identifier the request already carried
    pub physical_resource_id: Option<String>,
}
