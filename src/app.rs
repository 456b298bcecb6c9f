use aws_config::BehaviorVersion;
use std::sync::Arc;

use crate::{
    adapters::outbound::{
        metrics::{EmfMetricsSink, InMemoryMetricsSink},
        storage::{InMemoryObjectStore, S3StorageAdapter},
    },
    domain::models::RemediationPolicy,
    services::{NotificationServiceImpl, TaggingServiceImpl},
};

/// Environment keys read at process entry
pub const ENV_TAG_KEY_NAME: &str = "TAG_KEY_NAME";
pub const ENV_SCORE_THRESHOLD: &str = "SCORE_THRESHOLD";
pub const ENV_GLACIER_TRANSITION_DAYS: &str = "GLACIER_TRANSITION_DAYS";
pub const ENV_EXPIRE_OBJECTS_DAYS: &str = "EXPIRE_OBJECTS_DAYS";

/// Configuration for the application
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub policy: RemediationPolicy,
}

impl AppConfig {
    /// Read configuration from the environment, failing fast with a
    /// descriptive error on any malformed value. No handler runs when this
    /// fails.
    pub fn from_env() -> Result<Self, AppError> {
        let policy = RemediationPolicy {
            tag_key: parse_tag_key(env_value(ENV_TAG_KEY_NAME))?,
            score_threshold: parse_integer(
                ENV_SCORE_THRESHOLD,
                env_value(ENV_SCORE_THRESHOLD),
                3,
            )?,
            glacier_transition_days: parse_days(
                ENV_GLACIER_TRANSITION_DAYS,
                env_value(ENV_GLACIER_TRANSITION_DAYS),
                365,
            )?,
            expire_objects_days: parse_days(
                ENV_EXPIRE_OBJECTS_DAYS,
                env_value(ENV_EXPIRE_OBJECTS_DAYS),
                1825,
            )?,
        };

        Ok(Self { policy })
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_tag_key(raw: Option<String>) -> Result<String, AppError> {
    match raw {
        None => Ok("Severity".to_string()),
        Some(value) if value.trim().is_empty() => Err(AppError::Configuration {
            message: format!("{} must not be empty", ENV_TAG_KEY_NAME),
        }),
        Some(value) => Ok(value),
    }
}

fn parse_integer(name: &str, raw: Option<String>, default: i64) -> Result<i64, AppError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| AppError::Configuration {
            message: format!("{} must be an integer, got '{}'", name, value),
        }),
    }
}

fn parse_days(name: &str, raw: Option<String>, default: u32) -> Result<u32, AppError> {
    let days = match raw {
        None => default,
        Some(value) => value.trim().parse().map_err(|_| AppError::Configuration {
            message: format!("{} must be a non-negative integer, got '{}'", name, value),
        })?,
    };

    if days == 0 {
        return Err(AppError::Configuration {
            message: format!("{} must be at least 1", name),
        });
    }

    Ok(days)
}

/// Storage backend configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    InMemory,
}

/// Application services container
pub struct AppServices {
    pub tagging_service: TaggingServiceImpl,
    pub notification_service: NotificationServiceImpl,
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
    backend: StorageBackend,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            backend: StorageBackend::InMemory,
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Build the application services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let services = match self.backend {
            StorageBackend::S3 => {
                let shared = aws_config::defaults(BehaviorVersion::latest()).load().await;
                let store = Arc::new(S3StorageAdapter::new(aws_sdk_s3::Client::new(&shared)));
                let metrics = Arc::new(EmfMetricsSink::default());

                AppServices {
                    tagging_service: TaggingServiceImpl::new(
                        store.clone(),
                        metrics,
                        self.config.policy.clone(),
                    ),
                    notification_service: NotificationServiceImpl::new(store),
                }
            }
            StorageBackend::InMemory => {
                let store = Arc::new(InMemoryObjectStore::new());
                let metrics = Arc::new(InMemoryMetricsSink::new());

                AppServices {
                    tagging_service: TaggingServiceImpl::new(
                        store.clone(),
                        metrics,
                        self.config.policy.clone(),
                    ),
                    notification_service: NotificationServiceImpl::new(store),
                }
            }
        };

        Ok(services)
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },
}

/// Create an application backed by the S3 API
pub async fn create_s3_app(config: AppConfig) -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_config(config)
        .with_storage_backend(StorageBackend::S3)
        .build()
        .await
}

/// Create an in-memory application for testing and development
pub async fn create_in_memory_app(config: AppConfig) -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_config(config)
        .with_storage_backend(StorageBackend::InMemory)
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_unset() {
        assert_eq!(parse_tag_key(None).unwrap(), "Severity");
        assert_eq!(parse_integer(ENV_SCORE_THRESHOLD, None, 3).unwrap(), 3);
        assert_eq!(
            parse_days(ENV_GLACIER_TRANSITION_DAYS, None, 365).unwrap(),
            365
        );
        assert_eq!(parse_days(ENV_EXPIRE_OBJECTS_DAYS, None, 1825).unwrap(), 1825);
    }

    #[test]
    fn test_empty_tag_key_is_rejected() {
        assert!(parse_tag_key(Some("".to_string())).is_err());
        assert!(parse_tag_key(Some("   ".to_string())).is_err());
    }

    #[test]
    fn test_malformed_integer_is_rejected() {
        let err = parse_integer(ENV_SCORE_THRESHOLD, Some("three".to_string()), 3).unwrap_err();
        assert!(err.to_string().contains("SCORE_THRESHOLD"));

        assert!(parse_days(
            ENV_GLACIER_TRANSITION_DAYS,
            Some("1y".to_string()),
            365
        )
        .is_err());
    }

    #[test]
    fn test_zero_days_is_rejected() {
        assert!(parse_days(ENV_EXPIRE_OBJECTS_DAYS, Some("0".to_string()), 1825).is_err());
    }

    #[test]
    fn test_explicit_values_are_parsed() {
        assert_eq!(
            parse_integer(ENV_SCORE_THRESHOLD, Some("5".to_string()), 3).unwrap(),
            5
        );
        assert_eq!(
            parse_days(ENV_GLACIER_TRANSITION_DAYS, Some("90".to_string()), 365).unwrap(),
            90
        );
        assert_eq!(
            parse_tag_key(Some("DataClass".to_string())).unwrap(),
            "DataClass"
        );
    }

    #[tokio::test]
    async fn test_build_in_memory_app() {
        let services = create_in_memory_app(AppConfig::default()).await.unwrap();
        let _ = services.tagging_service;
        let _ = services.notification_service;
    }
}
