use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};

use crate::cache::{ContentCache, DurableStore, MemoryStore};
use crate::config::types::{CacheBackend, ResilienceConfig};
use crate::config::validation::Validator;
use crate::config::get_config;
use crate::degradation::DegradationHistory;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::handler::ContentResilienceEngine;
use crate::fallback::{FallbackFactory, ProviderRegistry, RecoveryRegistry};
use crate::monitor::MonitoringSink;
use crate::network::{ConnectivitySignal, NetworkMonitor, WatchConnectivity};
use crate::redis::{ConnectionPool, RedisStore};
use crate::validation::{ContentValidator, StructuralValidator};

/// 引擎構建器
///
/// 未提供的協作者使用預設實現：
/// - 驗證器：`StructuralValidator`
/// - 連線狀態：固定在線的 `WatchConnectivity`
/// - 持久層：依 `cache.backend` 建立 `MemoryStore` 或 `RedisStore`
/// - 監控：不回報
pub struct ContentResilienceEngineBuilder {
    config: Option<ResilienceConfig>,
    validator: Option<Arc<dyn ContentValidator>>,
    connectivity: Option<Arc<dyn ConnectivitySignal>>,
    durable_store: Option<Arc<dyn DurableStore>>,
    monitoring_sink: Option<Arc<dyn MonitoringSink>>,
}

impl ContentResilienceEngineBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            validator: None,
            connectivity: None,
            durable_store: None,
            monitoring_sink: None,
        }
    }

    /// 設置配置，未設置時使用全局配置
    pub fn with_config(mut self, config: ResilienceConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_validator(mut self, validator: Arc<dyn ContentValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_connectivity(mut self, connectivity: Arc<dyn ConnectivitySignal>) -> Self {
        self.connectivity = Some(connectivity);
        self
    }

    /// 設置持久層，覆蓋 `cache.backend` 的選擇
    pub fn with_durable_store(mut self, store: Arc<dyn DurableStore>) -> Self {
        self.durable_store = Some(store);
        self
    }

    pub fn with_monitoring_sink(mut self, sink: Arc<dyn MonitoringSink>) -> Self {
        self.monitoring_sink = Some(sink);
        self
    }

    /// 構建引擎
    ///
    /// 在 Tokio 運行時內呼叫時同時啟動連線狀態監聽任務；
    /// 否則連線狀態只能透過 `notify_connectivity` 更新。
    pub fn build(self) -> EngineResult<Arc<ContentResilienceEngine>> {
        info!("構建內容韌性引擎");

        let config = self.config.unwrap_or_else(|| get_config().clone());
        config.validate()?;

        let durable = match self.durable_store {
            Some(store) => store,
            None => Self::durable_from_config(&config)?,
        };

        let validator = self
            .validator
            .unwrap_or_else(|| Arc::new(StructuralValidator::new()));
        let connectivity = self
            .connectivity
            .unwrap_or_else(|| Arc::new(WatchConnectivity::default()));

        let recovery = Arc::new(RecoveryRegistry::new());
        let network = Arc::new(NetworkMonitor::new(
            connectivity.is_online(),
            recovery.clone(),
        ));

        let listener = match tokio::runtime::Handle::try_current() {
            Ok(_) => Some(network.clone().spawn_listener(connectivity.subscribe())),
            Err(_) => {
                debug!("未偵測到 Tokio 運行時，不啟動連線狀態監聽");
                None
            }
        };

        let engine = ContentResilienceEngine {
            cache: ContentCache::new(Some(durable), &config.cache),
            factory: FallbackFactory::new(&config.fallback),
            history: Mutex::new(DegradationHistory::new(
                config.history.capacity,
                config.history.recent_limit,
            )),
            providers: ProviderRegistry::new(),
            recovery,
            network,
            validator,
            sink: self.monitoring_sink,
            listener: Mutex::new(listener),
            config,
        };

        info!("內容韌性引擎構建完成");
        Ok(Arc::new(engine))
    }

    fn durable_from_config(config: &ResilienceConfig) -> EngineResult<Arc<dyn DurableStore>> {
        match config.cache.backend {
            CacheBackend::Memory => Ok(Arc::new(MemoryStore::new())),
            CacheBackend::Redis => {
                let redis = config
                    .redis
                    .clone()
                    .ok_or_else(|| EngineError::Config("未提供Redis配置".to_string()))?;
                let pool = ConnectionPool::new(redis)?;
                Ok(Arc::new(
                    RedisStore::new(pool).with_expiry(config.cache.ttl_secs),
                ))
            }
        }
    }
}

impl Default for ContentResilienceEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
