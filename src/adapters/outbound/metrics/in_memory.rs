use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::metrics::{Metric, MetricsSink};

/// In-memory implementation of MetricsSink for testing
#[derive(Clone)]
pub struct InMemoryMetricsSink {
    counts: Arc<RwLock<HashMap<Metric, u64>>>,
}

impl InMemoryMetricsSink {
    pub fn new() -> Self {
        Self {
            counts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Current value of a counter
    pub async fn count(&self, metric: Metric) -> u64 {
        self.counts.read().await.get(&metric).copied().unwrap_or(0)
    }
}

impl Default for InMemoryMetricsSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetricsSink for InMemoryMetricsSink {
    async fn incr(&self, metric: Metric) {
        *self.counts.write().await.entry(metric).or_insert(0) += 1;
    }
}
