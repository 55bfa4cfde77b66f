use async_trait::async_trait;
use deadpool_redis::redis::{cmd, AsyncCommands};
use tracing::{debug, error};

use crate::cache::store::{DurableStore, StoreError};
use crate::redis::pool::{RedisPool, RedisPoolError};

impl From<RedisPoolError> for StoreError {
    fn from(error: RedisPoolError) -> Self {
        StoreError::ConnectionError(error.to_string())
    }
}

/// 以 Redis 作為持久層的快取儲存
///
/// 記錄本身帶有寫入時間戳，過期判斷由快取層負責；
/// 設定 `expiry_secs` 時另外讓 Redis 在同樣時間後回收鍵。
pub struct RedisStore<P: RedisPool> {
    pool: P,
    expiry_secs: Option<u64>,
}

impl<P: RedisPool> RedisStore<P> {
    pub fn new(pool: P) -> Self {
        Self {
            pool,
            expiry_secs: None,
        }
    }

    /// 讓 Redis 在指定秒數後自動刪除鍵
    pub fn with_expiry(mut self, expiry_secs: u64) -> Self {
        self.expiry_secs = Some(expiry_secs);
        self
    }
}

#[async_trait]
impl<P: RedisPool> DurableStore for RedisStore<P> {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.pool.get_conn().await?;

        match conn.get::<_, Option<String>>(key).await {
            Ok(value) => {
                debug!("Redis 讀取 [{}]: {}", key, if value.is_some() { "命中" } else { "未命中" });
                Ok(value)
            }
            Err(e) => {
                error!("Redis 讀取失敗 [{}]: {}", key, e);
                Err(StoreError::OperationError(e.to_string()))
            }
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut conn = self.pool.get_conn().await?;

        let result = match self.expiry_secs {
            Some(ttl) => {
                cmd("SET")
                    .arg(key)
                    .arg(&value)
                    .arg("EX")
                    .arg(ttl)
                    .query_async::<()>(&mut conn)
                    .await
            }
            None => conn.set::<_, _, ()>(key, &value).await,
        };

        result.map_err(|e| {
            error!("Redis 寫入失敗 [{}]: {}", key, e);
            StoreError::OperationError(e.to_string())
        })
    }
}
