use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error};

use crate::{
    domain::{
        errors::{ProvisioningError, ProvisioningResult},
        models::{NotificationConfiguration, ProvisioningRequest, RequestType},
        value_objects::BucketName,
    },
    ports::{
        services::{NotificationService, ProvisioningOutcome},
        storage::ObjectStore,
    },
};

/// Identifier reported to the provisioning system once notifications are
/// installed; stable across updates so the resource is never replaced
pub const PHYSICAL_RESOURCE_ID: &str = "ResultsNotifications";

/// Implementation of the NotificationService.
///
/// Create and update install the caller-supplied configuration; delete
/// installs the empty configuration, which removes all notifications from
/// the bucket. All three verbs share the same put primitive.
#[derive(Clone)]
pub struct NotificationServiceImpl {
    store: Arc<dyn ObjectStore>,
}

impl NotificationServiceImpl {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl NotificationService for NotificationServiceImpl {
    async fn handle(
        &self,
        request: &ProvisioningRequest,
    ) -> ProvisioningResult<ProvisioningOutcome> {
        let bucket = required_bucket(request)?;

        match request.request_type {
            RequestType::Create | RequestType::Update => {
                let document = request
                    .resource_properties
                    .notification_configuration
                    .clone()
                    .map(NotificationConfiguration::new)
                    .filter(|c| !c.is_empty())
                    .ok_or(ProvisioningError::MissingNotificationConfiguration)?;

                self.put(&bucket, &document).await?;

                Ok(ProvisioningOutcome {
                    physical_resource_id: Some(PHYSICAL_RESOURCE_ID.to_string()),
                })
            }
            RequestType::Delete => {
                self.put(&bucket, &NotificationConfiguration::empty()).await?;

                Ok(ProvisioningOutcome {
                    physical_resource_id: None,
                })
            }
        }
    }
}

impl NotificationServiceImpl {
    async fn put(
        &self,
        bucket: &BucketName,
        config: &NotificationConfiguration,
    ) -> ProvisioningResult<()> {
        match self.store.put_notification_configuration(bucket, config).await {
            Ok(()) => {
                debug!(bucket = %bucket, "bucket notification configuration applied");
                Ok(())
            }
            Err(e) => {
                error!(bucket = %bucket, error = %e, "unable to put bucket notification");
                Err(ProvisioningError::Storage(e))
            }
        }
    }
}

fn required_bucket(request: &ProvisioningRequest) -> ProvisioningResult<BucketName> {
    let name = request
        .resource_properties
        .bucket_name
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(ProvisioningError::MissingBucketName)?;

    BucketName::new(name.to_string()).map_err(|e| ProvisioningError::InvalidBucketName {
        reason: e.to_string(),
    })
}
