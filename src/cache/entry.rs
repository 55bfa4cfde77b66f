use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::utils::time_utils::{current_timestamp_ms, is_expired};

/// 未提供版本號時使用的預設版本
pub const DEFAULT_CONTENT_VERSION: &str = "1.0.0";

/// 快取記錄
///
/// 持久層中以 JSON 形式儲存：`{content, timestamp, version}`，
/// `timestamp` 為寫入時的毫秒時間戳。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub content: Value,
    pub timestamp: i64,
    pub version: String,
}

impl CacheEntry {
    /// 以當前時間建立記錄，版本取自內容的 `version` 欄位
    pub fn new(content: Value) -> Self {
        Self::with_timestamp(content, current_timestamp_ms())
    }

    pub fn with_timestamp(content: Value, timestamp: i64) -> Self {
        let version = content
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_CONTENT_VERSION)
            .to_string();

        Self {
            content,
            timestamp,
            version,
        }
    }

    /// 是否已超過存活時間
    pub fn is_expired(&self, ttl: Duration, now_ms: i64) -> bool {
        is_expired(self.timestamp, ttl, now_ms)
    }
}
