use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{errors::ProvisioningResult, models::ProvisioningResponse},
    ports::provisioning::ProvisioningCallback,
};

/// In-memory implementation of ProvisioningCallback for testing
#[derive(Clone)]
pub struct RecordingProvisioningCallback {
    sent: Arc<RwLock<Vec<ProvisioningResponse>>>,
}

impl RecordingProvisioningCallback {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Every response delivered so far
    pub async fn sent(&self) -> Vec<ProvisioningResponse> {
        self.sent.read().await.clone()
    }
}

impl Default for RecordingProvisioningCallback {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProvisioningCallback for RecordingProvisioningCallback {
    async fn send(&self, response: &ProvisioningResponse) -> ProvisioningResult<()> {
        self.sent.write().await.push(response.clone());
        Ok(())
    }
}
