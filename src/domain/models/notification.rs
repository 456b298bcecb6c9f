use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An event-notification configuration document for a bucket.
///
/// The document is opaque at this layer: it is carried verbatim from the
/// provisioning request to the storage service. An empty document is the
/// documented mechanism for removing all notifications from a bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfiguration(Value);

impl NotificationConfiguration {
    pub fn new(document: Value) -> Self {
        Self(document)
    }

    /// The configuration that clears all notifications on a bucket
    pub fn empty() -> Self {
        Self(Value::Object(serde_json::Map::new()))
    }

    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::Object(m) => m.is_empty(),
            _ => false,
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Lifecycle verb of a provisioning request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

/// A provisioning-lifecycle request for a bucket's notification setup
#[derive(Debug, Clone, Deserialize)]
pub struct ProvisioningRequest {
    #[serde(rename = "RequestType")]
    pub request_type: RequestType,

    /// Callback endpoint the outcome must be reported to
    #[serde(rename = "ResponseURL", default)]
    pub response_url: String,

    #[serde(rename = "StackId", default)]
    pub stack_id: String,

    #[serde(rename = "RequestId", default)]
    pub request_id: String,

    #[serde(rename = "LogicalResourceId", default)]
    pub logical_resource_id: String,

    /// Physical identifier from an earlier create, present on update/delete
    #[serde(rename = "PhysicalResourceId", default)]
    pub physical_resource_id: Option<String>,

    #[serde(rename = "ResourceProperties", default)]
    pub resource_properties: ResourceProperties,
}

/// Caller-supplied properties of a provisioning request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceProperties {
    #[serde(rename = "BucketName", default)]
    pub bucket_name: Option<String>,

    #[serde(rename = "NotificationConfiguration", default)]
    pub notification_configuration: Option<Value>,
}

/// Outcome signal reported back to the provisioning system
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvisioningResponse {
    #[serde(rename = "Status")]
    pub status: ResponseStatus,

    #[serde(rename = "Reason")]
    pub reason: String,

    #[serde(rename = "PhysicalResourceId")]
    pub physical_resource_id: String,

    #[serde(rename = "StackId")]
    pub stack_id: String,

    #[serde(rename = "RequestId")]
    pub request_id: String,

    #[serde(rename = "LogicalResourceId")]
    pub logical_resource_id: String,

    /// Where to deliver the response; not part of the wire document
    #[serde(skip)]
    pub response_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResponseStatus {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FAILED")]
    Failed,
}

impl ProvisioningResponse {
    pub fn success(request: &ProvisioningRequest, physical_resource_id: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            reason: String::new(),
            physical_resource_id: physical_resource_id.into(),
            stack_id: request.stack_id.clone(),
            request_id: request.request_id.clone(),
            logical_resource_id: request.logical_resource_id.clone(),
            response_url: request.response_url.clone(),
        }
    }

    pub fn failed(request: &ProvisioningRequest, reason: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Failed,
            reason: reason.into(),
            physical_resource_id: request
                .physical_resource_id
                .clone()
                .unwrap_or_else(|| request.logical_resource_id.clone()),
            stack_id: request.stack_id.clone(),
            request_id: request.request_id.clone(),
            logical_resource_id: request.logical_resource_id.clone(),
            response_url: request.response_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_create_request() {
        let request: ProvisioningRequest = serde_json::from_value(json!({
            "RequestType": "Create",
            "ResponseURL": "https://provisioning.example/callback",
            "StackId": "stack-1",
            "RequestId": "req-1",
            "LogicalResourceId": "Notifications",
            "ResourceProperties": {
                "BucketName": "data",
                "NotificationConfiguration": {
                    "QueueConfigurations": [{"QueueArn": "arn:aws:sqs:::q", "Events": ["s3:ObjectCreated:*"]}]
                }
            }
        }))
        .unwrap();

        assert_eq!(request.request_type, RequestType::Create);
        assert_eq!(request.resource_properties.bucket_name.as_deref(), Some("data"));
        assert!(request.resource_properties.notification_configuration.is_some());
    }

    #[test]
    fn test_parse_delete_request_without_properties() {
        let request: ProvisioningRequest = serde_json::from_value(json!({
            "RequestType": "Delete"
        }))
        .unwrap();
        assert_eq!(request.request_type, RequestType::Delete);
        assert!(request.resource_properties.bucket_name.is_none());
    }

    #[test]
    fn test_empty_configuration() {
        assert!(NotificationConfiguration::empty().is_empty());
        assert!(!NotificationConfiguration::new(json!({"TopicConfigurations": []})).is_empty());
    }

    #[test]
    fn test_response_serialization_uses_wire_names() {
        let request: ProvisioningRequest = serde_json::from_value(json!({
            "RequestType": "Create",
            "StackId": "stack-1",
            "RequestId": "req-1",
            "LogicalResourceId": "Notifications"
        }))
        .unwrap();

        let body = serde_json::to_value(ProvisioningResponse::success(&request, "id-1")).unwrap();
        assert_eq!(body["Status"], "SUCCESS");
        assert_eq!(body["PhysicalResourceId"], "id-1");
        assert_eq!(body["LogicalResourceId"], "Notifications");
        assert!(body.get("response_url").is_none());
    }

    #[test]
    fn test_failed_response_falls_back_to_logical_id() {
        let request: ProvisioningRequest = serde_json::from_value(json!({
            "RequestType": "Delete",
            "LogicalResourceId": "Notifications"
        }))
        .unwrap();

        let response = ProvisioningResponse::failed(&request, "boom");
        assert_eq!(response.status, ResponseStatus::Failed);
        assert_eq!(response.physical_resource_id, "Notifications");
        assert_eq!(response.reason, "boom");
    }
}
