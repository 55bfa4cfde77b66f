use chrono::{DateTime, Utc};
use metrics::counter;
use serde::{Deserialize, Serialize};

use crate::domain_types::{
    DegradationContext, DegradationLevel, DegradationMetadata, DegradationReason, RecoveryStrategy,
};

/// 監控指標命名空間
pub const METRIC_NAMESPACE: &str = "content_resilience";

/// 送往監控系統的降級事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegradationReport {
    pub level: DegradationLevel,
    pub reason: DegradationReason,
    pub strategy: RecoveryStrategy,
    pub timestamp: DateTime<Utc>,
    pub metadata: DegradationMetadata,
    pub content_id: Option<String>,
}

impl DegradationReport {
    pub fn from_context(context: &DegradationContext) -> Self {
        Self {
            level: context.level(),
            reason: context.reason(),
            strategy: context.strategy(),
            timestamp: context.timestamp(),
            metadata: context.metadata().clone(),
            content_id: context.metadata().content_id.clone(),
        }
    }
}

/// 降級事件接收端
///
/// 呼叫端不等待結果，實現不得阻塞。
pub trait MonitoringSink: Send + Sync + 'static {
    fn report_degradation(&self, report: &DegradationReport);
}

/// 以 `metrics` 計數器記錄降級事件
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSink;

impl MonitoringSink for MetricsSink {
    fn report_degradation(&self, report: &DegradationReport) {
        counter!(
            format!("{}.degradation", METRIC_NAMESPACE),
            "reason" => report.reason.as_str(),
            "level" => report.level.as_str(),
            "strategy" => report.strategy.as_str()
        )
        .increment(1);

        if let Some(retry_count) = report.metadata.retry_count() {
            counter!(
                format!("{}.retries", METRIC_NAMESPACE),
                "reason" => report.reason.as_str()
            )
            .increment(u64::from(retry_count));
        }
    }
}
