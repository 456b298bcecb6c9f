use async_trait::async_trait;

/// Counters emitted by the tagging pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Report could not be retrieved or parsed
    EmptyObject,
    /// Finding carried no affected resource
    MissingResources,
    /// Severity below the configured threshold
    TaggingSkipped,
    /// Tag applied to the affected object
    TaggingSuccess,
    /// Tag-put rejected by the storage service
    TaggingFailed,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::EmptyObject => "EmptyObject",
            Metric::MissingResources => "MissingResources",
            Metric::TaggingSkipped => "TaggingSkipped",
            Metric::TaggingSuccess => "TaggingSuccess",
            Metric::TaggingFailed => "TaggingFailed",
        }
    }
}

/// Port for metric emission.
///
/// Emission is observability-only: implementations must not fail the
/// pipeline, so the interface has no error channel.
#[async_trait]
pub trait MetricsSink: Send + Sync + 'static {
    async fn incr(&self, metric: Metric);
}
