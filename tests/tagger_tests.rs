use classification_remediation::{
    InMemoryMetricsSink, InMemoryObjectStore, Metric, RemediationPolicy, StorageEvent,
    TaggingService, TaggingServiceImpl,
};
use serde_json::json;
use std::sync::Arc;

fn build_tagger(
    policy: RemediationPolicy,
) -> (TaggingServiceImpl, InMemoryObjectStore, InMemoryMetricsSink) {
    let store = InMemoryObjectStore::new();
    let metrics = InMemoryMetricsSink::new();
    let service = TaggingServiceImpl::new(Arc::new(store.clone()), Arc::new(metrics.clone()), policy);
    (service, store, metrics)
}

fn single_record_event(bucket: &str, key: &str) -> StorageEvent {
    serde_json::from_value(json!({
        "Records": [
            {"s3": {"bucket": {"name": bucket}, "object": {"key": key}}}
        ]
    }))
    .unwrap()
}

fn finding(score: i64, description: &str) -> String {
    json!({
        "detail": {
            "severity": {"score": score, "description": description},
            "resourcesAffected": {
                "s3Bucket": {"name": "data"},
                "s3Object": {"key": "secret.csv"}
            }
        }
    })
    .to_string()
}

#[tokio::test]
async fn encoded_key_is_decoded_for_fetch_only() {
    // The worked scenario: report stored under the decoded key `f+x.json`,
    // referenced by the event as `f%2Bx.json`; the affected object is tagged
    // under its own identity, untouched by the decoding.
    let (service, store, _metrics) = build_tagger(RemediationPolicy::default());
    store.put_document("findings", "f+x.json", finding(5, "High")).await;

    let summary = service
        .process_event(&single_record_event("findings", "f%2Bx.json"))
        .await
        .unwrap();

    assert_eq!(summary.remediated, 1);

    let tag_puts = store.tag_puts().await;
    assert_eq!(tag_puts.len(), 1);
    assert_eq!(tag_puts[0].bucket, "data");
    assert_eq!(tag_puts[0].key, "secret.csv");
    assert_eq!(tag_puts[0].tag_key, "Severity");
    assert_eq!(tag_puts[0].tag_value, "High");

    let lifecycle_puts = store.lifecycle_puts().await;
    assert_eq!(lifecycle_puts.len(), 1);
    assert_eq!(lifecycle_puts[0].bucket.as_str(), "data");
    assert_eq!(lifecycle_puts[0].rules[0].prefix, "secret.csv");
}

#[tokio::test]
async fn below_threshold_performs_no_mutations() {
    let (service, store, metrics) = build_tagger(RemediationPolicy::default());
    store.put_document("findings", "f+x.json", finding(2, "Low")).await;

    let summary = service
        .process_event(&single_record_event("findings", "f%2Bx.json"))
        .await
        .unwrap();

    assert_eq!(summary.below_threshold, 1);
    assert!(store.tag_puts().await.is_empty());
    assert!(store.lifecycle_puts().await.is_empty());
    assert_eq!(metrics.count(Metric::TaggingSkipped).await, 1);
}

#[tokio::test]
async fn score_equal_to_threshold_is_remediated() {
    let (service, store, metrics) = build_tagger(RemediationPolicy::default());
    store.put_document("findings", "report.json", finding(3, "Medium")).await;

    let summary = service
        .process_event(&single_record_event("findings", "report.json"))
        .await
        .unwrap();

    assert_eq!(summary.remediated, 1);
    assert_eq!(store.tag_puts().await.len(), 1);
    assert_eq!(metrics.count(Metric::TaggingSuccess).await, 1);
}

#[tokio::test]
async fn custom_policy_is_honored() {
    let policy = RemediationPolicy {
        tag_key: "DataClass".to_string(),
        score_threshold: 5,
        glacier_transition_days: 90,
        expire_objects_days: 400,
    };
    let (service, store, _metrics) = build_tagger(policy);
    store.put_document("findings", "report.json", finding(7, "Critical")).await;

    service
        .process_event(&single_record_event("findings", "report.json"))
        .await
        .unwrap();

    let tag_puts = store.tag_puts().await;
    assert_eq!(tag_puts[0].tag_key, "DataClass");
    assert_eq!(tag_puts[0].tag_value, "Critical");

    let rule = &store.lifecycle_puts().await[0].rules[0];
    assert_eq!(rule.noncurrent_transition_days, 90);
    assert_eq!(rule.noncurrent_expiration_days, 400);
}

#[tokio::test]
async fn tagging_failure_does_not_block_lifecycle() {
    let (service, store, metrics) = build_tagger(RemediationPolicy::default());
    store.put_document("findings", "report.json", finding(5, "High")).await;
    store.set_fail_tagging(true).await;

    let summary = service
        .process_event(&single_record_event("findings", "report.json"))
        .await
        .unwrap();

    assert_eq!(summary.remediated, 1);
    assert_eq!(summary.tagging_failures, 1);
    assert!(store.tag_puts().await.is_empty());
    // the retention policy was still attempted and landed
    assert_eq!(store.lifecycle_puts().await.len(), 1);
    assert_eq!(metrics.count(Metric::TaggingFailed).await, 1);
    assert_eq!(metrics.count(Metric::TaggingSuccess).await, 0);
}

#[tokio::test]
async fn lifecycle_failure_does_not_undo_tagging() {
    let (service, store, metrics) = build_tagger(RemediationPolicy::default());
    store.put_document("findings", "report.json", finding(5, "High")).await;
    store.set_fail_lifecycle(true).await;

    let summary = service
        .process_event(&single_record_event("findings", "report.json"))
        .await
        .unwrap();

    assert_eq!(summary.remediated, 1);
    assert_eq!(summary.lifecycle_failures, 1);
    assert_eq!(store.tag_puts().await.len(), 1);
    assert!(store.lifecycle_puts().await.is_empty());
    assert_eq!(metrics.count(Metric::TaggingSuccess).await, 1);
}

#[tokio::test]
async fn missing_report_counts_empty_object() {
    let (service, store, metrics) = build_tagger(RemediationPolicy::default());

    let summary = service
        .process_event(&single_record_event("findings", "missing.json"))
        .await
        .unwrap();

    assert_eq!(summary.empty_objects, 1);
    assert!(store.tag_puts().await.is_empty());
    assert!(store.lifecycle_puts().await.is_empty());
    assert_eq!(metrics.count(Metric::EmptyObject).await, 1);
}

#[tokio::test]
async fn unparseable_report_counts_empty_object() {
    let (service, store, metrics) = build_tagger(RemediationPolicy::default());
    store.put_document("findings", "report.json", "not json at all").await;

    let summary = service
        .process_event(&single_record_event("findings", "report.json"))
        .await
        .unwrap();

    assert_eq!(summary.empty_objects, 1);
    assert!(store.tag_puts().await.is_empty());
    assert_eq!(metrics.count(Metric::EmptyObject).await, 1);
}

#[tokio::test]
async fn transport_failure_counts_empty_object() {
    let (service, store, metrics) = build_tagger(RemediationPolicy::default());
    store.put_document("findings", "report.json", finding(5, "High")).await;
    store.set_fail_get(true).await;

    let summary = service
        .process_event(&single_record_event("findings", "report.json"))
        .await
        .unwrap();

    assert_eq!(summary.empty_objects, 1);
    assert!(store.tag_puts().await.is_empty());
    assert_eq!(metrics.count(Metric::EmptyObject).await, 1);
}

#[tokio::test]
async fn finding_without_resources_counts_missing_resources() {
    let (service, store, metrics) = build_tagger(RemediationPolicy::default());
    let report = json!({
        "detail": {"severity": {"score": 9, "description": "High"}}
    })
    .to_string();
    store.put_document("findings", "report.json", report).await;

    let summary = service
        .process_event(&single_record_event("findings", "report.json"))
        .await
        .unwrap();

    assert_eq!(summary.missing_resources, 1);
    assert!(store.tag_puts().await.is_empty());
    assert!(store.lifecycle_puts().await.is_empty());
    assert_eq!(metrics.count(Metric::MissingResources).await, 1);
}

#[tokio::test]
async fn missing_severity_score_aborts_the_batch() {
    let (service, store, _metrics) = build_tagger(RemediationPolicy::default());
    store
        .put_document(
            "findings",
            "broken.json",
            json!({"detail": {"severity": {"description": "High"}}}).to_string(),
        )
        .await;
    store.put_document("findings", "valid.json", finding(5, "High")).await;

    let event: StorageEvent = serde_json::from_value(json!({
        "Records": [
            {"s3": {"bucket": {"name": "findings"}, "object": {"key": "broken.json"}}},
            {"s3": {"bucket": {"name": "findings"}, "object": {"key": "valid.json"}}}
        ]
    }))
    .unwrap();

    assert!(service.process_event(&event).await.is_err());
    // the structural error stopped the batch before the second record
    assert!(store.tag_puts().await.is_empty());
}

#[tokio::test]
async fn one_bad_fetch_does_not_stop_other_records() {
    let (service, store, _metrics) = build_tagger(RemediationPolicy::default());
    store.put_document("findings", "valid.json", finding(5, "High")).await;

    let event: StorageEvent = serde_json::from_value(json!({
        "Records": [
            {"s3": {"bucket": {"name": "findings"}, "object": {"key": "missing.json"}}},
            {"s3": {"bucket": {"name": "findings"}, "object": {"key": "valid.json"}}}
        ]
    }))
    .unwrap();

    let summary = service.process_event(&event).await.unwrap();
    assert_eq!(summary.empty_objects, 1);
    assert_eq!(summary.remediated, 1);
    assert_eq!(store.tag_puts().await.len(), 1);
}

#[tokio::test]
async fn affected_version_is_passed_to_tagging() {
    let (service, store, _metrics) = build_tagger(RemediationPolicy::default());
    let report = json!({
        "detail": {
            "severity": {"score": 8, "description": "High"},
            "resourcesAffected": {
                "s3Bucket": {"name": "data"},
                "s3Object": {"key": "secret.csv", "versionId": "3_L4kqtJlcpXroDTDmJ"}
            }
        }
    })
    .to_string();
    store.put_document("findings", "report.json", report).await;

    service
        .process_event(&single_record_event("findings", "report.json"))
        .await
        .unwrap();

    let tag_puts = store.tag_puts().await;
    assert_eq!(tag_puts[0].version.as_deref(), Some("3_L4kqtJlcpXroDTDmJ"));
}

#[tokio::test]
async fn empty_event_produces_empty_summary() {
    let (service, store, _metrics) = build_tagger(RemediationPolicy::default());

    let event: StorageEvent = serde_json::from_value(json!({"Records": []})).unwrap();
    let summary = service.process_event(&event).await.unwrap();

    assert_eq!(summary.records, 0);
    assert!(store.tag_puts().await.is_empty());
}
