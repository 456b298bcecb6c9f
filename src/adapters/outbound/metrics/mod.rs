mod emf;
mod in_memory;

pub use emf::{EmfMetricsSink, DEFAULT_NAMESPACE};
pub use in_memory::InMemoryMetricsSink;
