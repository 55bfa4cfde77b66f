use async_trait::async_trait;
use deadpool::managed::QueueMode;
use deadpool_redis::{
    Config, Connection, CreatePoolError, Pool, PoolConfig, PoolError, Runtime, Timeouts,
};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::types::RedisConfig;

/// Redis連接池錯誤
#[derive(Error, Debug)]
pub enum RedisPoolError {
    #[error("Redis連接池初始化錯誤: {0}")]
    PoolInitError(String),

    #[error("無法從連接池獲取連接: {0}")]
    GetConnectionError(String),
}

impl From<PoolError> for RedisPoolError {
    fn from(error: PoolError) -> Self {
        RedisPoolError::GetConnectionError(error.to_string())
    }
}

impl From<CreatePoolError> for RedisPoolError {
    fn from(error: CreatePoolError) -> Self {
        RedisPoolError::PoolInitError(error.to_string())
    }
}

/// 持久層快取取得 Redis 連接的介面
#[async_trait]
pub trait RedisPool: Send + Sync + 'static {
    async fn get_conn(&self) -> Result<Connection, RedisPoolError>;
}

/// 基於 deadpool 的 Redis 連接池
pub struct ConnectionPool {
    pool: Pool,
}

impl ConnectionPool {
    /// 創建連接池
    ///
    /// 只建立連接池結構，實際連接在第一次取用時才建立，
    /// 因此 Redis 不可達不會讓引擎構建失敗。
    pub fn new(config: RedisConfig) -> Result<Self, RedisPoolError> {
        let mut cfg = Config::from_url(&config.url);
        let timeout = Duration::from_secs(config.connection_timeout_secs);

        cfg.pool = Some(PoolConfig {
            max_size: config.pool_size as usize,
            timeouts: Timeouts {
                wait: Some(timeout),
                create: Some(timeout),
                recycle: Some(Duration::from_secs(60)),
            },
            queue_mode: QueueMode::Fifo,
        });

        let pool = cfg.create_pool(Some(Runtime::Tokio1))?;
        info!("持久層快取Redis連接池已建立，大小: {}", config.pool_size);

        Ok(Self { pool })
    }
}

#[async_trait]
impl RedisPool for ConnectionPool {
    async fn get_conn(&self) -> Result<Connection, RedisPoolError> {
        let conn = self.pool.get().await.map_err(|e| {
            warn!("無法取得Redis連接，持久層快取暫不可用: {}", e);
            RedisPoolError::from(e)
        })?;
        debug!("取得Redis連接");
        Ok(conn)
    }
}
