use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::reason::{DegradationLevel, DegradationReason, RecoveryStrategy};

/// 各降級路徑已知的元數據形狀
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetadataDetail {
    /// 呼叫端直接要求降級，未經驗證流程
    Explicit,
    /// 離線狀態下跳過驗證
    Offline {
        #[serde(rename = "retryCount")]
        retry_count: u32,
    },
    /// 驗證器回傳結構錯誤
    ValidationFailed {
        errors: Vec<String>,
        warnings: Vec<String>,
    },
    /// 驗證過程拋出錯誤（含重試耗盡）
    Failure {
        error: String,
        #[serde(rename = "retryCount")]
        retry_count: u32,
    },
}

/// 降級元數據
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegradationMetadata {
    #[serde(flatten)]
    pub detail: MetadataDetail,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
    /// 自由格式的診斷資訊
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub diagnostics: BTreeMap<String, String>,
}

impl DegradationMetadata {
    pub fn new(detail: MetadataDetail) -> Self {
        Self {
            detail,
            content_id: None,
            diagnostics: BTreeMap::new(),
        }
    }

    pub fn explicit() -> Self {
        Self::new(MetadataDetail::Explicit)
    }

    pub fn with_content_id(mut self, content_id: Option<&str>) -> Self {
        self.content_id = content_id.map(str::to_string);
        self
    }

    pub fn with_diagnostic(mut self, key: &str, value: &str) -> Self {
        self.diagnostics.insert(key.to_string(), value.to_string());
        self
    }

    /// 記錄在元數據中的重試次數
    pub fn retry_count(&self) -> Option<u32> {
        match &self.detail {
            MetadataDetail::Offline { retry_count } | MetadataDetail::Failure { retry_count, .. } => {
                Some(*retry_count)
            }
            _ => None,
        }
    }

    /// 驗證器回傳的錯誤列表
    pub fn validation_errors(&self) -> &[String] {
        match &self.detail {
            MetadataDetail::ValidationFailed { errors, .. } => errors,
            _ => &[],
        }
    }
}

impl Default for DegradationMetadata {
    fn default() -> Self {
        Self::explicit()
    }
}

/// 降級上下文
///
/// 建立後即不可變：欄位只能透過存取方法讀取，
/// 寫入歷史紀錄後不會再被修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegradationContext {
    level: DegradationLevel,
    reason: DegradationReason,
    strategy: RecoveryStrategy,
    message: String,
    timestamp: DateTime<Utc>,
    metadata: DegradationMetadata,
    retry_count: u32,
    max_retries: u32,
}

impl DegradationContext {
    pub fn new(
        reason: DegradationReason,
        level: DegradationLevel,
        strategy: RecoveryStrategy,
        metadata: DegradationMetadata,
        retry_count: u32,
        max_retries: u32,
    ) -> Self {
        Self {
            level,
            reason,
            strategy,
            message: describe(reason).to_string(),
            timestamp: Utc::now(),
            metadata,
            retry_count,
            max_retries,
        }
    }

    pub fn level(&self) -> DegradationLevel {
        self.level
    }

    pub fn reason(&self) -> DegradationReason {
        self.reason
    }

    pub fn strategy(&self) -> RecoveryStrategy {
        self.strategy
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn metadata(&self) -> &DegradationMetadata {
        &self.metadata
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

/// 降級原因的預設說明文字
fn describe(reason: DegradationReason) -> &'static str {
    match reason {
        DegradationReason::MalformedContent => "Content is malformed and could not be loaded as-is",
        DegradationReason::NetworkFailure => "Network is unavailable",
        DegradationReason::ServiceDisruption => "Content service is temporarily unavailable",
        DegradationReason::ValidationError => "Content failed structural validation",
        DegradationReason::RenderingError => "Content could not be rendered",
        DegradationReason::DataCorruption => "Content data is corrupted",
        DegradationReason::TimeoutError => "Content validation timed out",
        DegradationReason::MemoryPressure => "Device is under memory pressure",
    }
}
