use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::ports::metrics::{Metric, MetricsSink};

/// Default metric namespace for both handlers
pub const DEFAULT_NAMESPACE: &str = "ClassificationRemediation";

/// Metrics sink that prints CloudWatch embedded-metric-format documents.
///
/// Each counter becomes one JSON line on stdout; the hosting environment's
/// log shipping turns these into metric datapoints without any API calls
/// from the handler.
pub struct EmfMetricsSink {
    namespace: String,
}

impl EmfMetricsSink {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }
}

impl Default for EmfMetricsSink {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

#[async_trait]
impl MetricsSink for EmfMetricsSink {
    async fn incr(&self, metric: Metric) {
        let document = json!({
            "_aws": {
                "Timestamp": Utc::now().timestamp_millis(),
                "CloudWatchMetrics": [{
                    "Namespace": self.namespace.as_str(),
                    "Dimensions": [[]],
                    "Metrics": [{"Name": metric.as_str(), "Unit": "Count"}],
                }],
            },
            (metric.as_str()): 1,
        });

        println!("{document}");
    }
}
