use crate::domain::{
    errors::ReportResult,
    models::{EventSummary, StorageEvent},
};
use async_trait::async_trait;

/// Service port for the classification tagging pipeline.
///
/// Records are processed sequentially and independently; the only error
/// that escapes is a structural report error, which aborts the remaining
/// records of the invocation.
#[async_trait]
pub trait TaggingService: Send + Sync + 'static {
    /// Process every record of a storage event
    async fn process_event(&self, event: &StorageEvent) -> ReportResult<EventSummary>;
}
