mod in_memory;
mod s3_adapter;

pub use in_memory::{InMemoryObjectStore, RecordedNotificationPut, RecordedTagPut};
pub use s3_adapter::S3StorageAdapter;
