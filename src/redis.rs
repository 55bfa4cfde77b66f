//! Redis存儲模組
//!
//! 提供 Redis 連接池管理，以及以 Redis 實現的快取持久層，
//! 讓多個進程或重新啟動後的進程可以共用已驗證的內容。

pub mod pool;
pub mod store;

pub use pool::{ConnectionPool, RedisPool, RedisPoolError};
pub use store::RedisStore;
