use serde_json::Value;

use crate::domain::errors::{ReportError, ReportResult};
use crate::domain::value_objects::{BucketName, ObjectKey, VersionId};

/// A classification finding fetched from storage.
///
/// The report's own storage location (where it was fetched from) and the
/// affected resource's location (what gets tagged) are distinct identities;
/// only the latter is carried here.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub severity: Severity,
    pub resources_affected: Option<AffectedResource>,
}

/// Severity of a classification finding
#[derive(Debug, Clone, PartialEq)]
pub struct Severity {
    pub score: i64,
    pub description: String,
}

/// The original object a finding is about
#[derive(Debug, Clone, PartialEq)]
pub struct AffectedResource {
    pub bucket: BucketName,
    pub key: ObjectKey,
    pub version: Option<VersionId>,
}

/// A single key/value pair applied to a stored object.
///
/// The tag-put operation replaces the object's whole tag set, so applying
/// this tag drops any tags previously present on the object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectTag {
    pub key: String,
    pub value: String,
}

impl ObjectTag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl ClassificationReport {
    /// Extract a report from a parsed JSON document.
    ///
    /// The severity block is mandatory: a document without a numeric
    /// `detail.severity.score` or a `detail.severity.description` is a hard
    /// `ReportError`. `detail.resourcesAffected` is optional (some findings
    /// are not object-scoped), but when present it must identify a valid
    /// bucket and key.
    pub fn from_document(document: &Value) -> ReportResult<Self> {
        let detail = document.get("detail").unwrap_or(&Value::Null);

        let severity = detail.get("severity").ok_or(ReportError::MissingField {
            path: "detail.severity",
        })?;

        let score = coerce_score(severity.get("score").ok_or(ReportError::MissingField {
            path: "detail.severity.score",
        })?)?;

        let description = severity
            .get("description")
            .ok_or(ReportError::MissingField {
                path: "detail.severity.description",
            })?;
        let description = match description.as_str() {
            Some(s) => s.to_string(),
            None => description.to_string(),
        };

        let resources_affected = match detail.get("resourcesAffected") {
            None => None,
            Some(v) if is_absent(v) => None,
            Some(v) => Some(AffectedResource::from_value(v)?),
        };

        Ok(Self {
            severity: Severity { score, description },
            resources_affected,
        })
    }
}

impl AffectedResource {
    fn from_value(value: &Value) -> ReportResult<Self> {
        let bucket = value
            .get("s3Bucket")
            .and_then(|b| b.get("name"))
            .and_then(Value::as_str)
            .ok_or(ReportError::MissingField {
                path: "detail.resourcesAffected.s3Bucket.name",
            })?;
        let bucket = BucketName::new(bucket.to_string())
            .map_err(|e| ReportError::InvalidResource {
                reason: e.to_string(),
            })?;

        let object = value.get("s3Object").ok_or(ReportError::MissingField {
            path: "detail.resourcesAffected.s3Object",
        })?;
        let key = object
            .get("key")
            .and_then(Value::as_str)
            .ok_or(ReportError::MissingField {
                path: "detail.resourcesAffected.s3Object.key",
            })?;
        let key = ObjectKey::new(key.to_string()).map_err(|e| ReportError::InvalidResource {
            reason: e.to_string(),
        })?;

        let version = object
            .get("versionId")
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
            .map(|v| VersionId::new(v.to_string()))
            .transpose()
            .map_err(|e| ReportError::InvalidResource {
                reason: e.to_string(),
            })?;

        Ok(Self {
            bucket,
            key,
            version,
        })
    }
}

/// Coerce a severity score to an integer; numeric strings are accepted
fn coerce_score(value: &Value) -> ReportResult<i64> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    if let Some(f) = value.as_f64() {
        return Ok(f as i64);
    }
    if let Some(s) = value.as_str() {
        if let Ok(n) = s.trim().parse::<i64>() {
            return Ok(n);
        }
    }
    Err(ReportError::InvalidScore {
        value: value.to_string(),
    })
}

/// Treat `null`, `{}`, and `[]` as an absent `resourcesAffected` block
fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(m) => m.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}
