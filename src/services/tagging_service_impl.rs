use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::{
    domain::{
        errors::ReportResult,
        models::{
            ClassificationReport, EventSummary, LifecycleConfiguration, ObjectTag, RecordOutcome,
            RemediationPolicy, StorageEvent, StorageRecord,
        },
        value_objects::{BucketName, ObjectKey, VersionId},
    },
    ports::{
        metrics::{Metric, MetricsSink},
        services::TaggingService,
        storage::ObjectStore,
    },
};

/// Implementation of the TaggingService.
///
/// Each record runs the same pipeline: locate the report, fetch and parse
/// it, compare severity against the policy threshold, then tag the affected
/// object and install a retention rule on its bucket. The two mutations are
/// independent side effects; neither aborts the other.
#[derive(Clone)]
pub struct TaggingServiceImpl {
    store: Arc<dyn ObjectStore>,
    metrics: Arc<dyn MetricsSink>,
    policy: RemediationPolicy,
}

impl TaggingServiceImpl {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        metrics: Arc<dyn MetricsSink>,
        policy: RemediationPolicy,
    ) -> Self {
        Self {
            store,
            metrics,
            policy,
        }
    }
}

#[async_trait]
impl TaggingService for TaggingServiceImpl {
    async fn process_event(&self, event: &StorageEvent) -> ReportResult<EventSummary> {
        info!(records = event.records.len(), "processing storage event");

        let mut summary = EventSummary::default();
        for record in &event.records {
            let outcome = self.process_record(record).await?;
            summary.record(&outcome);
        }

        Ok(summary)
    }
}

impl TaggingServiceImpl {
    /// Run one record through the pipeline
    async fn process_record(&self, record: &StorageRecord) -> ReportResult<RecordOutcome> {
        let Some((bucket, key, version)) = self.report_location(record) else {
            self.metrics.incr(Metric::EmptyObject).await;
            return Ok(RecordOutcome::EmptyObject);
        };

        let Some(document) = self.fetch_report(&bucket, &key, version.as_ref()).await else {
            warn!(
                bucket = %bucket,
                key = %key,
                "no classification data found in object"
            );
            self.metrics.incr(Metric::EmptyObject).await;
            return Ok(RecordOutcome::EmptyObject);
        };

        // Structural errors here are the one hard failure of the pipeline
        // and abort the remaining records of the invocation
        let report = ClassificationReport::from_document(&document)?;

        let Some(resource) = report.resources_affected else {
            warn!(bucket = %bucket, key = %key, "no resourcesAffected in finding");
            self.metrics.incr(Metric::MissingResources).await;
            return Ok(RecordOutcome::MissingResources);
        };

        let severity = report.severity;
        if severity.score < self.policy.score_threshold {
            debug!(
                score = severity.score,
                description = %severity.description,
                threshold = self.policy.score_threshold,
                "severity below threshold, skipping"
            );
            self.metrics.incr(Metric::TaggingSkipped).await;
            return Ok(RecordOutcome::BelowThreshold);
        }

        info!(
            score = severity.score,
            description = %severity.description,
            threshold = self.policy.score_threshold,
            bucket = %resource.bucket,
            key = %resource.key,
            "severity at or above threshold, adding tag and lifecycle policy"
        );

        let tag = ObjectTag::new(&self.policy.tag_key, &severity.description);
        let tagging_applied = match self
            .store
            .put_object_tagging(
                &resource.bucket,
                &resource.key,
                resource.version.as_ref(),
                &tag,
            )
            .await
        {
            Ok(()) => {
                debug!(bucket = %resource.bucket, key = %resource.key, tag = %tag.key, "tag applied");
                self.metrics.incr(Metric::TaggingSuccess).await;
                true
            }
            Err(e) => {
                error!(
                    bucket = %resource.bucket,
                    key = %resource.key,
                    tag = %tag.key,
                    error = %e,
                    "unable to add tag"
                );
                self.metrics.incr(Metric::TaggingFailed).await;
                false
            }
        };

        // Attempted regardless of the tagging outcome
        let config = LifecycleConfiguration::retention(
            resource.bucket.clone(),
            resource.key.as_str(),
            self.policy.glacier_transition_days,
            self.policy.expire_objects_days,
        );
        let lifecycle_applied = match self.store.put_lifecycle_configuration(&config).await {
            Ok(()) => {
                debug!(bucket = %resource.bucket, "lifecycle configuration applied");
                true
            }
            Err(e) => {
                error!(
                    bucket = %resource.bucket,
                    error = %e,
                    "unable to add lifecycle configuration"
                );
                false
            }
        };

        Ok(RecordOutcome::Remediated {
            tagging_applied,
            lifecycle_applied,
        })
    }

    /// Resolve the report's storage location from an event record; the key
    /// arrives percent-encoded. A record that cannot name a location is
    /// indistinguishable from an unreadable report.
    fn report_location(
        &self,
        record: &StorageRecord,
    ) -> Option<(BucketName, ObjectKey, Option<VersionId>)> {
        let bucket = match BucketName::new(record.s3.bucket.name.clone()) {
            Ok(b) => b,
            Err(e) => {
                warn!(bucket = %record.s3.bucket.name, error = %e, "invalid bucket in event record");
                return None;
            }
        };

        let key = match ObjectKey::from_event_key(&record.s3.object.key) {
            Ok(k) => k,
            Err(e) => {
                warn!(key = %record.s3.object.key, error = %e, "invalid key in event record");
                return None;
            }
        };

        let version = record
            .s3
            .object
            .version_id
            .as_deref()
            .filter(|v| !v.is_empty())
            .and_then(|v| match VersionId::new(v.to_string()) {
                Ok(id) => Some(id),
                Err(e) => {
                    warn!(version = v, error = %e, "ignoring invalid version in event record");
                    None
                }
            });

        Some((bucket, key, version))
    }

    /// Retrieve and parse the report; any failure is "no data"
    async fn fetch_report(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        version: Option<&VersionId>,
    ) -> Option<Value> {
        debug!(bucket = %bucket, key = %key, "retrieving classification report");

        let body = match self.store.get_object(bucket, key, version).await {
            Ok(body) => body,
            Err(e) => {
                warn!(bucket = %bucket, key = %key, error = %e, "unable to get object");
                return None;
            }
        };

        match serde_json::from_slice(&body) {
            Ok(document) => Some(document),
            Err(e) => {
                warn!(bucket = %bucket, key = %key, error = %e, "object is not valid JSON");
                None
            }
        }
    }
}
