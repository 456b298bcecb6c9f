use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::{LifecycleConfiguration, NotificationConfiguration, ObjectTag},
        value_objects::{BucketName, ObjectKey, VersionId},
    },
    ports::storage::ObjectStore,
};

/// In-memory implementation of ObjectStore for testing and development.
///
/// Every mutation is recorded so tests can assert on exactly which calls
/// were made; each operation can be switched to fail to exercise the error
/// branches.
#[derive(Clone)]
pub struct InMemoryObjectStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Default)]
struct StoreState {
    // Map of (bucket, key) -> object content
    objects: HashMap<(String, String), Bytes>,
    tag_puts: Vec<RecordedTagPut>,
    lifecycle_puts: Vec<LifecycleConfiguration>,
    notification_puts: Vec<RecordedNotificationPut>,
    fail_get: bool,
    fail_tagging: bool,
    fail_lifecycle: bool,
    fail_notification: bool,
}

/// A recorded tag-put call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTagPut {
    pub bucket: String,
    pub key: String,
    pub version: Option<String>,
    pub tag_key: String,
    pub tag_value: String,
}

/// A recorded notification-put call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedNotificationPut {
    pub bucket: String,
    pub document: serde_json::Value,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
        }
    }

    /// Seed an object into the store
    pub async fn put_document(&self, bucket: &str, key: &str, body: impl Into<Bytes>) {
        let mut state = self.state.write().await;
        state
            .objects
            .insert((bucket.to_string(), key.to_string()), body.into());
    }

    pub async fn tag_puts(&self) -> Vec<RecordedTagPut> {
        self.state.read().await.tag_puts.clone()
    }

    pub async fn lifecycle_puts(&self) -> Vec<LifecycleConfiguration> {
        self.state.read().await.lifecycle_puts.clone()
    }

    pub async fn notification_puts(&self) -> Vec<RecordedNotificationPut> {
        self.state.read().await.notification_puts.clone()
    }

    pub async fn set_fail_get(&self, fail: bool) {
        self.state.write().await.fail_get = fail;
    }

    pub async fn set_fail_tagging(&self, fail: bool) {
        self.state.write().await.fail_tagging = fail;
    }

    pub async fn set_fail_lifecycle(&self, fail: bool) {
        self.state.write().await.fail_lifecycle = fail;
    }

    pub async fn set_fail_notification(&self, fail: bool) {
        self.state.write().await.fail_notification = fail;
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

fn injected(operation: &'static str) -> StorageError {
    StorageError::ServiceError {
        operation,
        message: "injected failure".to_string(),
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn get_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        _version: Option<&VersionId>,
    ) -> StorageResult<Bytes> {
        let state = self.state.read().await;
        if state.fail_get {
            return Err(injected("get_object"));
        }

        state
            .objects
            .get(&(bucket.as_str().to_string(), key.as_str().to_string()))
            .cloned()
            .ok_or_else(|| StorageError::ObjectNotFound {
                bucket: bucket.clone(),
                key: key.clone(),
            })
    }

    async fn put_object_tagging(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        version: Option<&VersionId>,
        tag: &ObjectTag,
    ) -> StorageResult<()> {
        let mut state = self.state.write().await;
        if state.fail_tagging {
            return Err(injected("put_object_tagging"));
        }

        state.tag_puts.push(RecordedTagPut {
            bucket: bucket.as_str().to_string(),
            key: key.as_str().to_string(),
            version: version.map(|v| v.as_str().to_string()),
            tag_key: tag.key.clone(),
            tag_value: tag.value.clone(),
        });
        Ok(())
    }

    async fn put_lifecycle_configuration(
        &self,
        config: &LifecycleConfiguration,
    ) -> StorageResult<()> {
        config
            .validate()
            .map_err(|e| StorageError::InvalidConfiguration {
                reason: e.to_string(),
            })?;

        let mut state = self.state.write().await;
        if state.fail_lifecycle {
            return Err(injected("put_lifecycle_configuration"));
        }

        state.lifecycle_puts.push(config.clone());
        Ok(())
    }

    async fn put_notification_configuration(
        &self,
        bucket: &BucketName,
        config: &NotificationConfiguration,
    ) -> StorageResult<()> {
        let mut state = self.state.write().await;
        if state.fail_notification {
            return Err(injected("put_notification_configuration"));
        }

        state.notification_puts.push(RecordedNotificationPut {
            bucket: bucket.as_str().to_string(),
            document: config.as_value().clone(),
        });
        Ok(())
    }
}
