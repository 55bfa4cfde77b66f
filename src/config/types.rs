use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::validation::{ValidationError, ValidationUtils, Validator};

/// 韌性引擎配置結構
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResilienceConfig {
    pub log: LogConfig,
    pub retry: RetryConfig,
    pub cache: CacheConfig,
    pub history: HistoryConfig,
    pub fallback: FallbackConfig,
    pub redis: Option<RedisConfig>,
}

impl Validator for ResilienceConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證各個部分的配置
        self.log.validate()?;
        self.retry.validate()?;
        self.cache.validate()?;
        self.history.validate()?;
        self.fallback.validate()?;

        ValidationUtils::check_dependency(
            self.cache.backend == CacheBackend::Redis,
            self.redis.is_some(),
            "cache.backend",
            "redis",
        )?;
        if let Some(redis) = &self.redis {
            redis.validate()?;
        }

        Ok(())
    }
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::one_of(
            &self.level.to_lowercase(),
            &["trace", "debug", "info", "warn", "error"],
            "log.level",
        )?;
        ValidationUtils::one_of(&self.format.to_lowercase(), &["pretty", "json"], "log.format")?;

        Ok(())
    }
}

/// 重試配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// 預設最大重試次數
    pub max_retries: u32,
    /// 單次驗證時限（毫秒）
    pub timeout_ms: u64,
    /// 退避基數（毫秒），第 n 次重試等待 base * 2^n
    pub backoff_base_ms: u64,
    /// 單次退避的上限（毫秒）
    pub max_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            timeout_ms: 5_000,
            backoff_base_ms: 1_000,
            max_backoff_ms: 30_000,
        }
    }
}

impl Validator for RetryConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::in_range(self.max_retries, 0, 10, "retry.max_retries")?;
        ValidationUtils::in_range(self.timeout_ms, 1, 300_000, "retry.timeout_ms")?;
        ValidationUtils::in_range(
            self.max_backoff_ms,
            self.backoff_base_ms,
            600_000,
            "retry.max_backoff_ms",
        )?;

        Ok(())
    }
}

impl RetryConfig {
    /// 獲取驗證時限
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// 持久層快取後端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheBackend {
    #[default]
    Memory,
    Redis,
}

/// 快取配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    /// 持久層鍵前綴，完整鍵為 `<prefix>-<contentId>`
    pub key_prefix: String,
    /// 快取存活時間（秒）
    pub ttl_secs: u64,
    /// 內存快取容量
    pub memory_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            key_prefix: "content-cache".to_string(),
            ttl_secs: 24 * 60 * 60,
            memory_capacity: 1_000,
        }
    }
}

impl Validator for CacheConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.key_prefix, "cache.key_prefix")?;
        ValidationUtils::in_range(self.ttl_secs, 1, 30 * 24 * 60 * 60, "cache.ttl_secs")?;
        ValidationUtils::in_range(self.memory_capacity, 1, 1_000_000, "cache.memory_capacity")?;

        Ok(())
    }
}

impl CacheConfig {
    /// 獲取快取存活時間
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// 降級歷史配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
    /// 統計中返回的最近事件數量
    pub recent_limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            recent_limit: 10,
        }
    }
}

impl Validator for HistoryConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::in_range(self.capacity, 1, 10_000, "history.capacity")?;
        ValidationUtils::in_range(self.recent_limit, 1, self.capacity, "history.recent_limit")?;

        Ok(())
    }
}

/// 替代內容配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub language: String,
    pub audience: String,
    /// 替代內容的預估時長（秒）
    pub duration_secs: u32,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            audience: "general".to_string(),
            duration_secs: 60,
        }
    }
}

impl Validator for FallbackConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.language, "fallback.language")?;
        ValidationUtils::not_empty(&self.audience, "fallback.audience")?;

        Ok(())
    }
}

/// Redis配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    pub pool_size: u32,
    pub connection_timeout_secs: u64,
}

impl Validator for RedisConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.url, "redis.url")?;
        ValidationUtils::in_range(self.pool_size, 1, 100, "redis.pool_size")?;
        ValidationUtils::in_range(self.connection_timeout_secs, 1, 60, "redis.connection_timeout_secs")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ResilienceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_redis_backend_requires_redis_section() {
        let mut config = ResilienceConfig::default();
        config.cache.backend = CacheBackend::Redis;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::DependencyError { .. })
        ));

        config.redis = Some(RedisConfig {
            url: "redis://localhost:6379".to_string(),
            pool_size: 4,
            connection_timeout_secs: 5,
        });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_recent_limit_cannot_exceed_capacity() {
        let history = HistoryConfig {
            capacity: 5,
            recent_limit: 10,
        };
        assert!(history.validate().is_err());
    }
}
