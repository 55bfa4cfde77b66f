use serde::{Deserialize, Serialize};
use std::fmt;

/// 降級原因枚舉
///
/// 所有失敗訊號最終都必須歸類為以下其中一種原因，
/// 無法辨識的錯誤一律歸類為 `ServiceDisruption`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradationReason {
    /// 內容格式錯誤
    MalformedContent,
    /// 網路失敗
    NetworkFailure,
    /// 服務中斷
    ServiceDisruption,
    /// 結構驗證失敗
    ValidationError,
    /// 渲染錯誤
    RenderingError,
    /// 資料損毀
    DataCorruption,
    /// 逾時
    TimeoutError,
    /// 記憶體壓力
    MemoryPressure,
}

impl DegradationReason {
    /// 原因數量，用於固定大小的查找表
    pub const COUNT: usize = 8;

    /// 所有原因，依索引順序排列
    pub const ALL: [DegradationReason; Self::COUNT] = [
        DegradationReason::MalformedContent,
        DegradationReason::NetworkFailure,
        DegradationReason::ServiceDisruption,
        DegradationReason::ValidationError,
        DegradationReason::RenderingError,
        DegradationReason::DataCorruption,
        DegradationReason::TimeoutError,
        DegradationReason::MemoryPressure,
    ];

    /// 查找表索引
    #[inline]
    pub fn index(self) -> usize {
        match self {
            DegradationReason::MalformedContent => 0,
            DegradationReason::NetworkFailure => 1,
            DegradationReason::ServiceDisruption => 2,
            DegradationReason::ValidationError => 3,
            DegradationReason::RenderingError => 4,
            DegradationReason::DataCorruption => 5,
            DegradationReason::TimeoutError => 6,
            DegradationReason::MemoryPressure => 7,
        }
    }

    /// 是否允許重試
    ///
    /// 只有網路失敗、服務中斷與逾時屬於暫時性錯誤，其餘原因首次出現即為終止狀態。
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            DegradationReason::NetworkFailure
                | DegradationReason::ServiceDisruption
                | DegradationReason::TimeoutError
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DegradationReason::MalformedContent => "malformed_content",
            DegradationReason::NetworkFailure => "network_failure",
            DegradationReason::ServiceDisruption => "service_disruption",
            DegradationReason::ValidationError => "validation_error",
            DegradationReason::RenderingError => "rendering_error",
            DegradationReason::DataCorruption => "data_corruption",
            DegradationReason::TimeoutError => "timeout_error",
            DegradationReason::MemoryPressure => "memory_pressure",
        }
    }
}

impl fmt::Display for DegradationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 降級等級（有序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradationLevel {
    None,
    Minor,
    Moderate,
    Severe,
    Critical,
}

impl DegradationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DegradationLevel::None => "none",
            DegradationLevel::Minor => "minor",
            DegradationLevel::Moderate => "moderate",
            DegradationLevel::Severe => "severe",
            DegradationLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for DegradationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 恢復策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryStrategy {
    Retry,
    Fallback,
    Skip,
    Default,
    Cache,
    Offline,
}

impl RecoveryStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryStrategy::Retry => "retry",
            RecoveryStrategy::Fallback => "fallback",
            RecoveryStrategy::Skip => "skip",
            RecoveryStrategy::Default => "default",
            RecoveryStrategy::Cache => "cache",
            RecoveryStrategy::Offline => "offline",
        }
    }
}

impl fmt::Display for RecoveryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
