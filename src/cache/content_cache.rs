use moka::sync::Cache;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::cache::entry::CacheEntry;
use crate::cache::keys::durable_key;
use crate::cache::metrics::{CacheMetrics, MetricType};
use crate::cache::stats::CacheStats;
use crate::cache::store::DurableStore;
use crate::config::types::CacheConfig;
use crate::utils::time_utils::current_timestamp_ms;

/// 兩層內容快取
///
/// 結合內存快取與持久層，以內容 ID 為鍵：
/// - L1：進程內 moka 快取，讀取不需等待
/// - L2：持久層（跨進程/跨會話），以 `<prefix>-<contentId>` 為鍵
///
/// 兩層共用同一個存活時間判斷，以記錄的原始寫入時間為準；
/// 持久層命中時提升至內存層並保留原始時間戳，因此提升不會延長記錄壽命。
/// 所有錯誤都在內部記錄後吞掉，快取不可用只會讓呼叫端改用較低保真度的策略。
pub struct ContentCache {
    /// L1: 內存快取
    memory: Cache<String, Arc<CacheEntry>>,
    /// L2: 持久層
    durable: Option<Arc<dyn DurableStore>>,
    key_prefix: String,
    ttl: Duration,
    capacity: u64,
}

impl ContentCache {
    /// 創建新的兩層快取
    ///
    /// # Arguments
    /// * `durable` - 持久層，`None` 表示只使用內存層
    /// * `config` - 快取配置
    pub fn new(durable: Option<Arc<dyn DurableStore>>, config: &CacheConfig) -> Self {
        let memory = Cache::builder()
            .max_capacity(config.memory_capacity)
            .time_to_live(config.ttl())
            .build();

        Self {
            memory,
            durable,
            key_prefix: config.key_prefix.clone(),
            ttl: config.ttl(),
            capacity: config.memory_capacity,
        }
    }

    /// 寫入快取
    ///
    /// 先寫內存層，再盡力寫入持久層；持久層失敗只記錄警告。
    pub async fn set(&self, content_id: &str, content: &Value) {
        let start = Instant::now();
        let entry = Arc::new(CacheEntry::new(content.clone()));
        self.memory.insert(content_id.to_string(), entry.clone());

        let Some(store) = &self.durable else {
            CacheMetrics::record_set(false);
            return;
        };

        let key = durable_key(&self.key_prefix, content_id);
        let serialized = match serde_json::to_string(entry.as_ref()) {
            Ok(serialized) => serialized,
            Err(e) => {
                warn!("快取記錄序列化失敗 [{}]: {}", key, e);
                CacheMetrics::record(MetricType::Error { operation: "serialize" }, None);
                return;
            }
        };

        match store.set(&key, serialized).await {
            Ok(()) => {
                debug!("快取寫入成功: {}", key);
                CacheMetrics::record_set(true);
                CacheMetrics::record(MetricType::Latency { operation: "set" }, Some(start.elapsed()));
            }
            Err(e) => {
                warn!("持久層快取寫入失敗 [{}]: {}", key, e);
                CacheMetrics::record(MetricType::Error { operation: "set" }, None);
            }
        }
    }

    /// 讀取快取（內存層優先，未命中時讀取持久層）
    pub async fn get(&self, content_id: &str) -> Option<CacheEntry> {
        let start = Instant::now();

        if let Some(entry) = self.peek_entry(content_id) {
            CacheMetrics::record(MetricType::Hit { layer: "memory" }, None);
            CacheMetrics::record(
                MetricType::Latency { operation: "get_memory" },
                Some(start.elapsed()),
            );
            return Some(entry);
        }

        let Some(entry) = self.read_durable(content_id).await else {
            CacheMetrics::record(MetricType::Miss, None);
            return None;
        };

        CacheMetrics::record(MetricType::Hit { layer: "durable" }, None);
        CacheMetrics::record(
            MetricType::Latency { operation: "get_durable" },
            Some(start.elapsed()),
        );

        // 提升至內存層，保留原始時間戳
        self.memory
            .insert(content_id.to_string(), Arc::new(entry.clone()));
        CacheMetrics::record_promotion();

        Some(entry)
    }

    /// 只查詢內存層，不觸及持久層
    pub fn peek(&self, content_id: &str) -> Option<Value> {
        self.peek_entry(content_id).map(|entry| entry.content)
    }

    /// 內存層是否有可用記錄
    pub fn contains(&self, content_id: &str) -> bool {
        self.peek_entry(content_id).is_some()
    }

    /// 移除內存層記錄
    pub fn invalidate(&self, content_id: &str) {
        self.memory.invalidate(content_id);
    }

    /// 快取統計
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.memory.entry_count() as usize,
            capacity: self.capacity as usize,
            durable: self.durable.is_some(),
        }
    }

    fn peek_entry(&self, content_id: &str) -> Option<CacheEntry> {
        let entry = self.memory.get(content_id)?;

        if entry.is_expired(self.ttl, current_timestamp_ms()) {
            CacheMetrics::record(MetricType::Expired { layer: "memory" }, None);
            self.memory.invalidate(content_id);
            return None;
        }

        Some(entry.as_ref().clone())
    }

    async fn read_durable(&self, content_id: &str) -> Option<CacheEntry> {
        let store = self.durable.as_ref()?;
        let key = durable_key(&self.key_prefix, content_id);

        let raw = match store.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("持久層快取讀取失敗 [{}]: {}", key, e);
                CacheMetrics::record(MetricType::Error { operation: "get" }, None);
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("快取記錄反序列化失敗 [{}]: {}", key, e);
                CacheMetrics::record(MetricType::Error { operation: "deserialize" }, None);
                return None;
            }
        };

        if entry.is_expired(self.ttl, current_timestamp_ms()) {
            debug!("持久層快取已過期: {}", key);
            CacheMetrics::record(MetricType::Expired { layer: "durable" }, None);
            return None;
        }

        Some(entry)
    }
}
