mod notification_service;
mod tagging_service;

pub use notification_service::{NotificationService, ProvisioningOutcome};
pub use tagging_service::TaggingService;
