use std::time::Duration;

use crate::config::types::RetryConfig;
use crate::domain_types::DegradationMetadata;

/// `handle_content` 的選項
///
/// 未設置的 `max_retries` 與 `timeout_ms` 由引擎的 `retry` 配置補上。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandleOptions {
    /// 內容識別碼，提供時驗證成功的內容會寫入快取
    pub content_id: Option<String>,
    /// 起始重試次數
    pub retry_count: u32,
    pub max_retries: Option<u32>,
    /// 單次驗證的時限（毫秒）
    pub timeout_ms: Option<u64>,
}

impl HandleOptions {
    pub fn with_content_id(mut self, content_id: impl Into<String>) -> Self {
        self.content_id = Some(content_id.into());
        self
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub(crate) fn max_retries_or(&self, retry: &RetryConfig) -> u32 {
        self.max_retries.unwrap_or(retry.max_retries)
    }

    pub(crate) fn timeout_or(&self, retry: &RetryConfig) -> Duration {
        self.timeout_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| retry.timeout())
    }
}

/// `degrade_content` 的選項
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DegradeOptions {
    pub content_id: Option<String>,
    pub retry_count: u32,
    /// 未設置時使用 `retry.max_retries`
    pub max_retries: Option<u32>,
    /// 未提供時使用 `DegradationMetadata::explicit()`
    pub metadata: Option<DegradationMetadata>,
}

impl DegradeOptions {
    pub fn with_content_id(mut self, content_id: impl Into<String>) -> Self {
        self.content_id = Some(content_id.into());
        self
    }

    pub fn with_metadata(mut self, metadata: DegradationMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_retries(mut self, retry_count: u32, max_retries: u32) -> Self {
        self.retry_count = retry_count;
        self.max_retries = Some(max_retries);
        self
    }

    pub(crate) fn max_retries_or(&self, retry: &RetryConfig) -> u32 {
        self.max_retries.unwrap_or(retry.max_retries)
    }
}
