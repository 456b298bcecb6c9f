use crate::domain::errors::ValidationError;
use crate::domain::value_objects::BucketName;

/// Lifecycle configuration for a bucket.
///
/// Installing a configuration replaces whatever configuration the bucket
/// already carries; rules for other prefixes are not merged in.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleConfiguration {
    pub bucket: BucketName,
    pub rules: Vec<LifecycleRule>,
}

/// A single retention rule scoped to an object-key prefix
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleRule {
    pub prefix: String,
    pub status: RuleStatus,

    // Non-current version transition
    pub noncurrent_transition_days: u32,
    pub noncurrent_transition_storage_class: StorageClass,

    // Non-current version expiration
    pub noncurrent_expiration_days: u32,
}

/// Status of a lifecycle rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStatus {
    Enabled,
    Disabled,
}

/// Storage classes for lifecycle transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageClass {
    InfrequentAccess,
    Glacier,
    DeepArchive,
}

impl StorageClass {
    pub fn as_str(&self) -> &str {
        match self {
            StorageClass::InfrequentAccess => "STANDARD_IA",
            StorageClass::Glacier => "GLACIER",
            StorageClass::DeepArchive => "DEEP_ARCHIVE",
        }
    }
}

impl LifecycleRule {
    /// Validate the rule for logical consistency
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.noncurrent_transition_days == 0 {
            return Err(ValidationError::InvalidField {
                field: "noncurrent_transition_days".to_string(),
                value: "0".to_string(),
                expected: "a positive number of days".to_string(),
            });
        }

        if self.noncurrent_expiration_days <= self.noncurrent_transition_days {
            return Err(ValidationError::InvalidField {
                field: "noncurrent_expiration_days".to_string(),
                value: self.noncurrent_expiration_days.to_string(),
                expected: format!(
                    "more than the transition window of {} days",
                    self.noncurrent_transition_days
                ),
            });
        }

        Ok(())
    }
}

impl LifecycleConfiguration {
    /// Build the retention configuration applied to a classified object:
    /// one enabled rule, keyed by the object's key as prefix, that moves
    /// non-current versions to cold storage and later expires them.
    pub fn retention(
        bucket: BucketName,
        prefix: impl Into<String>,
        transition_days: u32,
        expiration_days: u32,
    ) -> Self {
        Self {
            bucket,
            rules: vec![LifecycleRule {
                prefix: prefix.into(),
                status: RuleStatus::Enabled,
                noncurrent_transition_days: transition_days,
                noncurrent_transition_storage_class: StorageClass::Glacier,
                noncurrent_expiration_days: expiration_days,
            }],
        }
    }

    /// Validate the lifecycle configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for rule in &self.rules {
            rule.validate()?;
        }
        Ok(())
    }
}
