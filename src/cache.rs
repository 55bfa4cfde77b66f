pub mod content_cache;
pub mod entry;
pub mod keys;
pub mod metrics;
pub mod stats;
pub mod store;

// Re-export commonly used types
pub use content_cache::ContentCache;
pub use entry::{CacheEntry, DEFAULT_CONTENT_VERSION};
pub use keys::{durable_key, DEFAULT_KEY_PREFIX};
pub use metrics::{CacheMetrics, MetricType, METRIC_NAMESPACE};
pub use stats::CacheStats;
pub use store::{DurableStore, MemoryStore, StoreError};
