use tracing::{error, info};

use crate::{
    domain::{
        errors::ProvisioningResult,
        models::{ProvisioningRequest, ProvisioningResponse},
    },
    ports::{provisioning::ProvisioningCallback, services::NotificationService},
};

/// Run a provisioning request through the service and report the outcome.
///
/// Service failures become a FAILED response rather than an error: the
/// provisioning system interprets the response, not our exit status. Only a
/// failure to deliver the response itself is returned to the caller.
pub async fn handle_request(
    service: &dyn NotificationService,
    callback: &dyn ProvisioningCallback,
    request: &ProvisioningRequest,
) -> ProvisioningResult<()> {
    let response = match service.handle(request).await {
        Ok(outcome) => {
            let physical_resource_id = outcome
                .physical_resource_id
                .or_else(|| request.physical_resource_id.clone())
                .unwrap_or_else(|| request.logical_resource_id.clone());
            info!(
                request_type = ?request.request_type,
                physical_resource_id = %physical_resource_id,
                "provisioning request succeeded"
            );
            ProvisioningResponse::success(request, physical_resource_id)
        }
        Err(e) => {
            error!(request_type = ?request.request_type, error = %e, "provisioning request failed");
            ProvisioningResponse::failed(request, e.to_string())
        }
    };

    callback.send(&response).await
}

/// Report a failure that happened before the service could be constructed,
/// so the provisioning system still receives a well-formed signal
pub async fn report_init_failure(
    callback: &dyn ProvisioningCallback,
    request: &ProvisioningRequest,
    reason: &str,
) -> ProvisioningResult<()> {
    error!(reason, "initialization failed before handling request");
    callback
        .send(&ProvisioningResponse::failed(request, reason))
        .await
}
