use async_trait::async_trait;
use tracing::debug;

use crate::{
    domain::{
        errors::{ProvisioningError, ProvisioningResult},
        models::ProvisioningResponse,
    },
    ports::provisioning::ProvisioningCallback,
};

/// Callback adapter that delivers the response document to the pre-signed
/// URL carried on the provisioning request
#[derive(Clone)]
pub struct HttpProvisioningCallback {
    client: reqwest::Client,
}

impl HttpProvisioningCallback {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpProvisioningCallback {
    fn default() -> Self {
        Self::new()
    }
}

fn callback_failed(err: impl std::fmt::Display) -> ProvisioningError {
    ProvisioningError::CallbackFailed {
        message: err.to_string(),
    }
}

#[async_trait]
impl ProvisioningCallback for HttpProvisioningCallback {
    async fn send(&self, response: &ProvisioningResponse) -> ProvisioningResult<()> {
        if response.response_url.is_empty() {
            return Err(ProvisioningError::CallbackFailed {
                message: "request carried no response URL".to_string(),
            });
        }

        debug!(url = %response.response_url, status = ?response.status, "delivering provisioning response");

        self.client
            .put(&response.response_url)
            .json(response)
            .send()
            .await
            .map_err(callback_failed)?
            .error_for_status()
            .map_err(callback_failed)?;

        Ok(())
    }
}
