use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, ContentCache};
use crate::config::types::ResilienceConfig;
use crate::degradation::{
    classify, resolve_level, select_strategy, Connectivity, DegradationHistory, DegradationStats,
};
use crate::domain_types::{
    ContentOutcome, DegradationContext, DegradationMetadata, DegradationReason, DegradedContent,
    FallbackContent, MetadataDetail, RecoverySource, RecoveryStrategy,
};
use crate::engine::options::{DegradeOptions, HandleOptions};
use crate::fallback::{repair_structure, FallbackFactory, ProviderRegistry, RecoveryRegistry};
use crate::monitor::{DegradationReport, MonitoringSink};
use crate::network::NetworkMonitor;
use crate::validation::{ContentFailure, ContentValidator, ValidationOutcome, ValidationResult};

/// 內容韌性引擎
///
/// 由組合根透過 `ContentResilienceEngineBuilder` 建立一次，
/// 以 `Arc` 在各任務間共享。所有鎖都只在同步區段內持有，不跨越 `.await`。
pub struct ContentResilienceEngine {
    pub(crate) config: ResilienceConfig,
    pub(crate) validator: Arc<dyn ContentValidator>,
    pub(crate) cache: ContentCache,
    pub(crate) factory: FallbackFactory,
    pub(crate) providers: ProviderRegistry,
    pub(crate) recovery: Arc<RecoveryRegistry>,
    pub(crate) network: Arc<NetworkMonitor>,
    pub(crate) history: Mutex<DegradationHistory>,
    pub(crate) sink: Option<Arc<dyn MonitoringSink>>,
    pub(crate) listener: Mutex<Option<JoinHandle<()>>>,
}

impl ContentResilienceEngine {
    /// 驗證並返回內容，失敗時返回降級內容
    ///
    /// 不會失敗也不會無限期阻塞：每次驗證受 `timeout_ms` 限制，
    /// 可重試的失敗最多重試 `max_retries` 次。未設置的選項取自 `retry` 配置。
    pub async fn handle_content(&self, content: Value, options: HandleOptions) -> ContentOutcome {
        let max_retries = options.max_retries_or(&self.config.retry);
        let timeout = options.timeout_or(&self.config.retry);
        let mut retry_count = options.retry_count;
        let content_id = options.content_id.as_deref();

        loop {
            if !self.is_online() {
                debug!("離線狀態，跳過驗證");
                let metadata = DegradationMetadata::new(MetadataDetail::Offline { retry_count })
                    .with_content_id(content_id);
                let degraded = self
                    .degrade_terminal(
                        DegradationReason::NetworkFailure,
                        Some(&content),
                        metadata,
                        retry_count,
                        max_retries,
                        timeout,
                    )
                    .await;
                return ContentOutcome::Degraded(degraded);
            }

            match self.validate_within(&content, timeout).await {
                Ok(outcome) if outcome.is_valid => {
                    if let Some(id) = content_id {
                        self.cache.set(id, &content).await;
                    }
                    debug!("內容驗證通過: {:?}", content_id);
                    return ContentOutcome::Original(content);
                }
                Ok(outcome) => {
                    let metadata = DegradationMetadata::new(MetadataDetail::ValidationFailed {
                        errors: outcome.errors,
                        warnings: outcome.warnings,
                    })
                    .with_content_id(content_id);
                    let degraded = self
                        .degrade_terminal(
                            DegradationReason::ValidationError,
                            Some(&content),
                            metadata,
                            retry_count,
                            max_retries,
                            timeout,
                        )
                        .await;
                    return ContentOutcome::Degraded(degraded);
                }
                Err(failure) => {
                    let reason = classify(&failure);

                    if reason.is_retryable() && retry_count < max_retries {
                        let delay = self.backoff_delay(retry_count);
                        debug!(
                            "驗證失敗 ({}): {}，{:?} 後進行第 {} 次重試",
                            reason,
                            failure,
                            delay,
                            retry_count + 1
                        );
                        tokio::time::sleep(delay).await;
                        retry_count += 1;
                        continue;
                    }

                    let metadata = DegradationMetadata::new(MetadataDetail::Failure {
                        error: failure.to_string(),
                        retry_count,
                    })
                    .with_content_id(content_id);
                    let degraded = self
                        .degrade_terminal(
                            reason,
                            Some(&content),
                            metadata,
                            retry_count,
                            max_retries,
                            timeout,
                        )
                        .await;
                    return ContentOutcome::Degraded(degraded);
                }
            }
        }
    }

    /// 直接以指定原因降級
    ///
    /// 同步執行：快取只查詢內存層，也不嘗試修復。
    pub fn degrade_content(
        &self,
        reason: DegradationReason,
        original: Option<&Value>,
        options: DegradeOptions,
    ) -> DegradedContent {
        let max_retries = options.max_retries_or(&self.config.retry);
        let metadata = options
            .metadata
            .unwrap_or_default()
            .with_content_id(options.content_id.as_deref());
        let cached = metadata
            .content_id
            .as_deref()
            .and_then(|id| self.cache.peek(id));
        let context = self.build_context(
            reason,
            metadata,
            options.retry_count,
            max_retries,
            cached.is_some(),
        );

        let recovered = match (context.strategy(), cached) {
            (RecoveryStrategy::Cache, Some(content)) => {
                Some(Self::recover_from_cache(&context, content))
            }
            _ => None,
        };

        self.finish(context, recovered, original)
    }

    /// 嘗試修補內容結構並重新驗證，只有通過驗證才返回
    ///
    /// 重新驗證的時限取自 `retry.timeout_ms`。
    pub async fn attempt_repair(&self, content: &Value) -> Option<Value> {
        self.repair_within(content, self.config.retry.timeout()).await
    }

    async fn repair_within(&self, content: &Value, timeout: Duration) -> Option<Value> {
        let repaired = repair_structure(content)?;

        match self.validate_within(&repaired, timeout).await {
            Ok(outcome) if outcome.is_valid => {
                info!("內容結構修復成功");
                Some(repaired)
            }
            Ok(outcome) => {
                debug!("修復後內容仍未通過驗證: {:?}", outcome.errors);
                None
            }
            Err(e) => {
                debug!("修復後內容驗證失敗: {}", e);
                None
            }
        }
    }

    /// 註冊特定原因的替代內容提供者，重複註冊時後者覆蓋前者
    pub fn register_fallback_provider<F>(&self, reason: DegradationReason, provider: F)
    where
        F: Fn(&DegradationContext) -> anyhow::Result<FallbackContent> + Send + Sync + 'static,
    {
        self.providers.register(reason, Arc::new(provider));
    }

    /// 註冊特定原因的恢復回調，重複註冊時後者覆蓋前者
    pub fn register_recovery_callback<F>(&self, reason: DegradationReason, callback: F)
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.recovery.register(reason, Arc::new(callback));
    }

    pub fn degradation_stats(&self) -> DegradationStats {
        self.history.lock().stats()
    }

    pub fn clear_history(&self) {
        self.history.lock().clear();
        info!("降級歷史已清除");
    }

    pub fn is_online(&self) -> bool {
        self.network.is_online()
    }

    /// 手動通知連線狀態，供沒有連線監聽任務的宿主使用
    pub fn notify_connectivity(&self, online: bool) -> bool {
        self.network.on_transition(online)
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn config(&self) -> &ResilienceConfig {
        &self.config
    }

    async fn validate_within(
        &self,
        content: &Value,
        timeout: Duration,
    ) -> ValidationResult<ValidationOutcome> {
        let validation = self.validator.validate(content);

        // 逾時後驗證 future 隨即被丟棄，遲到的結果不會再被觀察到
        match tokio::time::timeout(timeout, validation).await {
            Ok(result) => result,
            Err(_) => Err(ContentFailure::Timeout {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }

    /// 第 n 次重試前的等待時間：`base * 2^n`，不超過上限
    fn backoff_delay(&self, retry_count: u32) -> Duration {
        let retry = &self.config.retry;
        let factor = 1u64.checked_shl(retry_count).unwrap_or(u64::MAX);
        let delay_ms = retry
            .backoff_base_ms
            .saturating_mul(factor)
            .min(retry.max_backoff_ms);
        Duration::from_millis(delay_ms)
    }

    /// 終端降級：先讓快取讀穿以決定策略，再依策略修復、讀快取或產生替代內容
    async fn degrade_terminal(
        &self,
        reason: DegradationReason,
        original: Option<&Value>,
        metadata: DegradationMetadata,
        retry_count: u32,
        max_retries: u32,
        timeout: Duration,
    ) -> DegradedContent {
        let cached = match metadata.content_id.as_deref() {
            Some(id) => self.cache.get(id).await.map(|entry| entry.content),
            None => None,
        };

        let context =
            self.build_context(reason, metadata, retry_count, max_retries, cached.is_some());

        let recovered = match (context.strategy(), original, cached) {
            (RecoveryStrategy::Fallback, Some(content), _) => {
                self.repair_within(content, timeout)
                    .await
                    .map(|repaired| DegradedContent::Recovered {
                        content: repaired,
                        source: RecoverySource::Repair,
                        degradation_info: context.clone(),
                    })
            }
            (RecoveryStrategy::Cache, _, Some(content)) => {
                Some(Self::recover_from_cache(&context, content))
            }
            _ => None,
        };

        self.finish(context, recovered, original)
    }

    fn build_context(
        &self,
        reason: DegradationReason,
        metadata: DegradationMetadata,
        retry_count: u32,
        max_retries: u32,
        cache_available: bool,
    ) -> DegradationContext {
        let connectivity = Connectivity::from_online(self.is_online());
        let level = resolve_level(reason, retry_count, max_retries, connectivity);
        let strategy = select_strategy(reason, level, cache_available);

        DegradationContext::new(reason, level, strategy, metadata, retry_count, max_retries)
    }

    /// 以決定策略時讀到的快取內容恢復，不再重新查詢
    fn recover_from_cache(context: &DegradationContext, content: Value) -> DegradedContent {
        debug!("從快取恢復內容: {:?}", context.metadata().content_id);
        DegradedContent::Recovered {
            content,
            source: RecoverySource::Cache,
            degradation_info: context.clone(),
        }
    }

    fn finish(
        &self,
        context: DegradationContext,
        recovered: Option<DegradedContent>,
        original: Option<&Value>,
    ) -> DegradedContent {
        let degraded = match recovered {
            Some(recovered) => recovered,
            None => DegradedContent::Fallback(self.synthesize(&context, original)),
        };

        self.record(context);
        degraded
    }

    /// 已註冊的提供者優先，失敗時改用內建工廠
    fn synthesize(&self, context: &DegradationContext, original: Option<&Value>) -> FallbackContent {
        if let Some(provider) = self.providers.get(context.reason()) {
            match provider(context) {
                Ok(mut content) => {
                    content.degradation_info = context.clone();
                    return content;
                }
                Err(e) => {
                    warn!("替代內容提供者執行失敗 ({}): {}，改用內建內容", context.reason(), e);
                }
            }
        }

        self.factory.for_context(context, original)
    }

    fn record(&self, context: DegradationContext) {
        warn!(
            reason = %context.reason(),
            level = %context.level(),
            strategy = %context.strategy(),
            content_id = ?context.metadata().content_id,
            "內容降級: {}",
            context.message()
        );

        if let Some(sink) = &self.sink {
            sink.report_degradation(&DegradationReport::from_context(&context));
        }

        self.history.lock().push(context);
    }
}

impl Drop for ContentResilienceEngine {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.lock().take() {
            listener.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::types::ResilienceConfig;
    use crate::engine::builder::ContentResilienceEngineBuilder;
    use std::time::Duration;

    #[test]
    fn test_backoff_doubles_and_caps() {
        let mut config = ResilienceConfig::default();
        config.retry.backoff_base_ms = 1_000;
        config.retry.max_backoff_ms = 5_000;
        let engine = ContentResilienceEngineBuilder::new()
            .with_config(config)
            .build()
            .unwrap();

        assert_eq!(engine.backoff_delay(0), Duration::from_secs(1));
        assert_eq!(engine.backoff_delay(1), Duration::from_secs(2));
        assert_eq!(engine.backoff_delay(2), Duration::from_secs(4));
        assert_eq!(engine.backoff_delay(3), Duration::from_secs(5));
        assert_eq!(engine.backoff_delay(80), Duration::from_secs(5));
    }
}
