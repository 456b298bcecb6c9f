use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types;
use aws_sdk_s3::Client;
use bytes::Bytes;
use serde::Deserialize;

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::{
            LifecycleConfiguration, NotificationConfiguration, ObjectTag, RuleStatus, StorageClass,
        },
        value_objects::{BucketName, ObjectKey, VersionId},
    },
    ports::storage::ObjectStore,
};

/// ObjectStore adapter backed by the AWS S3 API
#[derive(Clone)]
pub struct S3StorageAdapter {
    client: Client,
}

impl S3StorageAdapter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn service_error(operation: &'static str, err: impl std::fmt::Display) -> StorageError {
    StorageError::ServiceError {
        operation,
        message: err.to_string(),
    }
}

fn invalid_config(err: impl std::fmt::Display) -> StorageError {
    StorageError::InvalidConfiguration {
        reason: err.to_string(),
    }
}

#[async_trait]
impl ObjectStore for S3StorageAdapter {
    async fn get_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        version: Option<&VersionId>,
    ) -> StorageResult<Bytes> {
        let output = self
            .client
            .get_object()
            .bucket(bucket.as_str())
            .key(key.as_str())
            .set_version_id(version.map(|v| v.as_str().to_string()))
            .send()
            .await
            .map_err(|err| {
                if err.as_service_error().is_some_and(|e| e.is_no_such_key()) {
                    StorageError::ObjectNotFound {
                        bucket: bucket.clone(),
                        key: key.clone(),
                    }
                } else {
                    service_error("get_object", DisplayErrorContext(&err))
                }
            })?;

        output
            .body
            .collect()
            .await
            .map(|data| data.into_bytes())
            .map_err(|err| service_error("get_object", err))
    }

    async fn put_object_tagging(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        version: Option<&VersionId>,
        tag: &ObjectTag,
    ) -> StorageResult<()> {
        let tag = types::Tag::builder()
            .key(&tag.key)
            .value(&tag.value)
            .build()
            .map_err(invalid_config)?;
        let tagging = types::Tagging::builder()
            .tag_set(tag)
            .build()
            .map_err(invalid_config)?;

        self.client
            .put_object_tagging()
            .bucket(bucket.as_str())
            .key(key.as_str())
            .set_version_id(version.map(|v| v.as_str().to_string()))
            .tagging(tagging)
            .send()
            .await
            .map_err(|err| service_error("put_object_tagging", DisplayErrorContext(&err)))?;

        Ok(())
    }

    async fn put_lifecycle_configuration(
        &self,
        config: &LifecycleConfiguration,
    ) -> StorageResult<()> {
        config.validate().map_err(invalid_config)?;

        let mut rules = Vec::with_capacity(config.rules.len());
        for rule in &config.rules {
            let transition = types::NoncurrentVersionTransition::builder()
                .noncurrent_days(rule.noncurrent_transition_days as i32)
                .storage_class(transition_storage_class(
                    rule.noncurrent_transition_storage_class,
                ))
                .build();
            let expiration = types::NoncurrentVersionExpiration::builder()
                .noncurrent_days(rule.noncurrent_expiration_days as i32)
                .build();

            let rule = types::LifecycleRule::builder()
                .status(rule_status(rule.status))
                .filter(
                    types::LifecycleRuleFilter::builder()
                        .prefix(&rule.prefix)
                        .build(),
                )
                .noncurrent_version_transitions(transition)
                .noncurrent_version_expiration(expiration)
                .build()
                .map_err(invalid_config)?;
            rules.push(rule);
        }

        let lifecycle = types::BucketLifecycleConfiguration::builder()
            .set_rules(Some(rules))
            .build()
            .map_err(invalid_config)?;

        self.client
            .put_bucket_lifecycle_configuration()
            .bucket(config.bucket.as_str())
            .lifecycle_configuration(lifecycle)
            .send()
            .await
            .map_err(|err| {
                service_error("put_bucket_lifecycle_configuration", DisplayErrorContext(&err))
            })?;

        Ok(())
    }

    async fn put_notification_configuration(
        &self,
        bucket: &BucketName,
        config: &NotificationConfiguration,
    ) -> StorageResult<()> {
        let notification = build_notification_configuration(config)?;

        self.client
            .put_bucket_notification_configuration()
            .bucket(bucket.as_str())
            .notification_configuration(notification)
            .send()
            .await
            .map_err(|err| {
                service_error(
                    "put_bucket_notification_configuration",
                    DisplayErrorContext(&err),
                )
            })?;

        Ok(())
    }
}

fn rule_status(status: RuleStatus) -> types::ExpirationStatus {
    match status {
        RuleStatus::Enabled => types::ExpirationStatus::Enabled,
        RuleStatus::Disabled => types::ExpirationStatus::Disabled,
    }
}

fn transition_storage_class(class: StorageClass) -> types::TransitionStorageClass {
    types::TransitionStorageClass::from(class.as_str())
}

// The notification document travels as JSON in the provisioning request and
// must be re-expressed in the storage API's types. Only the standard
// sections are recognized; anything else is rejected before the API call.

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NotificationDocument {
    #[serde(rename = "TopicConfigurations", default)]
    topics: Vec<TargetDocument>,
    #[serde(rename = "QueueConfigurations", default)]
    queues: Vec<TargetDocument>,
    #[serde(rename = "LambdaFunctionConfigurations", default)]
    functions: Vec<TargetDocument>,
    #[serde(rename = "EventBridgeConfiguration", default)]
    event_bridge: Option<serde_json::Value>,
}

/// One notification target; the arn field name differs per section
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TargetDocument {
    #[serde(rename = "Id", default)]
    id: Option<String>,
    #[serde(
        rename = "TopicArn",
        alias = "QueueArn",
        alias = "LambdaFunctionArn"
    )]
    arn: String,
    #[serde(rename = "Events")]
    events: Vec<String>,
    #[serde(rename = "Filter", default)]
    filter: Option<KeyFilterDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeyFilterDocument {
    #[serde(rename = "Key")]
    key: FilterRulesDocument,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FilterRulesDocument {
    #[serde(rename = "FilterRules")]
    rules: Vec<FilterRuleDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FilterRuleDocument {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Value")]
    value: String,
}

fn build_notification_configuration(
    config: &NotificationConfiguration,
) -> StorageResult<types::NotificationConfiguration> {
    // The empty document clears the bucket's notifications
    if config.is_empty() {
        return Ok(types::NotificationConfiguration::builder().build());
    }

    let document: NotificationDocument =
        serde_json::from_value(config.as_value().clone()).map_err(invalid_config)?;

    let mut builder = types::NotificationConfiguration::builder();

    for topic in &document.topics {
        let mut b = types::TopicConfiguration::builder().topic_arn(&topic.arn);
        if let Some(id) = &topic.id {
            b = b.id(id);
        }
        for event in &topic.events {
            b = b.events(types::Event::from(event.as_str()));
        }
        if let Some(filter) = &topic.filter {
            b = b.filter(build_filter(filter));
        }
        builder = builder.topic_configurations(b.build().map_err(invalid_config)?);
    }

    for queue in &document.queues {
        let mut b = types::QueueConfiguration::builder().queue_arn(&queue.arn);
        if let Some(id) = &queue.id {
            b = b.id(id);
        }
        for event in &queue.events {
            b = b.events(types::Event::from(event.as_str()));
        }
        if let Some(filter) = &queue.filter {
            b = b.filter(build_filter(filter));
        }
        builder = builder.queue_configurations(b.build().map_err(invalid_config)?);
    }

    for function in &document.functions {
        let mut b =
            types::LambdaFunctionConfiguration::builder().lambda_function_arn(&function.arn);
        if let Some(id) = &function.id {
            b = b.id(id);
        }
        for event in &function.events {
            b = b.events(types::Event::from(event.as_str()));
        }
        if let Some(filter) = &function.filter {
            b = b.filter(build_filter(filter));
        }
        builder = builder.lambda_function_configurations(b.build().map_err(invalid_config)?);
    }

    if document.event_bridge.is_some() {
        builder =
            builder.event_bridge_configuration(types::EventBridgeConfiguration::builder().build());
    }

    Ok(builder.build())
}

fn build_filter(document: &KeyFilterDocument) -> types::NotificationConfigurationFilter {
    let mut key = types::S3KeyFilter::builder();
    for rule in &document.key.rules {
        key = key.filter_rules(
            types::FilterRule::builder()
                .name(types::FilterRuleName::from(rule.name.as_str()))
                .value(&rule.value)
                .build(),
        );
    }
    types::NotificationConfigurationFilter::builder()
        .key(key.build())
        .build()
}
