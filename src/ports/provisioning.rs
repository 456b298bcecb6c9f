use crate::domain::{errors::ProvisioningResult, models::ProvisioningResponse};
use async_trait::async_trait;

/// Port for delivering outcomes to the provisioning system.
///
/// The provisioning system blocks on this signal; a lost response leaves a
/// deployment hanging until its own timeout, so delivery failures are
/// surfaced to the caller.
#[async_trait]
pub trait ProvisioningCallback: Send + Sync + 'static {
    async fn send(&self, response: &ProvisioningResponse) -> ProvisioningResult<()>;
}
