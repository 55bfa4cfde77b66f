use crate::domain_types::{DegradationLevel, DegradationReason, RecoveryStrategy};

/// 選擇恢復策略
///
/// 相同的 (原因, 等級, 快取佔用) 組合永遠得到相同策略。
pub fn select_strategy(
    reason: DegradationReason,
    level: DegradationLevel,
    cache_available: bool,
) -> RecoveryStrategy {
    if level == DegradationLevel::Critical {
        return RecoveryStrategy::Offline;
    }

    match reason {
        DegradationReason::NetworkFailure => {
            if cache_available {
                RecoveryStrategy::Cache
            } else {
                RecoveryStrategy::Offline
            }
        }
        DegradationReason::MalformedContent | DegradationReason::ValidationError => {
            RecoveryStrategy::Fallback
        }
        DegradationReason::ServiceDisruption => RecoveryStrategy::Retry,
        _ => RecoveryStrategy::Default,
    }
}
