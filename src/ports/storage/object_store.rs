use crate::domain::{
    errors::StorageResult,
    models::{LifecycleConfiguration, NotificationConfiguration, ObjectTag},
    value_objects::{BucketName, ObjectKey, VersionId},
};
use async_trait::async_trait;
use bytes::Bytes;

/// Port for object storage operations.
///
/// This abstracts the storage backend; both handlers depend only on this
/// trait, so tests drive them with an in-memory implementation.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Retrieve object content
    async fn get_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        version: Option<&VersionId>,
    ) -> StorageResult<Bytes>;

    /// Replace the tag set of an object with a single tag
    async fn put_object_tagging(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        version: Option<&VersionId>,
        tag: &ObjectTag,
    ) -> StorageResult<()>;

    /// Replace a bucket's lifecycle configuration
    async fn put_lifecycle_configuration(
        &self,
        config: &LifecycleConfiguration,
    ) -> StorageResult<()>;

    /// Replace a bucket's event-notification configuration; an empty
    /// document removes all notifications
    async fn put_notification_configuration(
        &self,
        bucket: &BucketName,
        config: &NotificationConfiguration,
    ) -> StorageResult<()>;
}
