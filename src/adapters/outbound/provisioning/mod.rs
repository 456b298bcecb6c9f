mod http;
mod in_memory;

pub use http::HttpProvisioningCallback;
pub use in_memory::RecordingProvisioningCallback;
