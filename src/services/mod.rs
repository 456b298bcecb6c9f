mod notification_service_impl;
mod tagging_service_impl;

pub use notification_service_impl::{NotificationServiceImpl, PHYSICAL_RESOURCE_ID};
pub use tagging_service_impl::TaggingServiceImpl;
