use metrics::{counter, histogram};
use std::time::Duration;

/// 監控指標命名空間
pub const METRIC_NAMESPACE: &str = "content_cache";

/// 監控指標類型
#[derive(Debug, Clone, Copy)]
pub enum MetricType {
    Hit {
        layer: &'static str,
    },
    Miss,
    /// 記錄存在但已過期
    Expired {
        layer: &'static str,
    },
    Latency {
        operation: &'static str,
    },
    Error {
        operation: &'static str,
    },
}

/// 快取監控指標記錄器
pub struct CacheMetrics;

impl CacheMetrics {
    /// 記錄快取指標
    ///
    /// # Arguments
    /// * `metric_type` - 指標類型
    /// * `duration` - 可選的持續時間，用於延遲指標
    pub fn record(metric_type: MetricType, duration: Option<Duration>) {
        match metric_type {
            MetricType::Hit { layer } => {
                counter!(format!("{}.hit", METRIC_NAMESPACE), "layer" => layer).increment(1);
            }
            MetricType::Miss => {
                counter!(format!("{}.miss", METRIC_NAMESPACE)).increment(1);
            }
            MetricType::Expired { layer } => {
                counter!(format!("{}.expired", METRIC_NAMESPACE), "layer" => layer).increment(1);
            }
            MetricType::Latency { operation } => {
                if let Some(dur) = duration {
                    histogram!(
                        format!("{}.latency_ns", METRIC_NAMESPACE),
                        "operation" => operation
                    )
                    .record(dur.as_nanos() as f64);
                }
            }
            MetricType::Error { operation } => {
                counter!(
                    format!("{}.error", METRIC_NAMESPACE),
                    "operation" => operation
                )
                .increment(1);
            }
        }
    }

    /// 記錄快取設定操作
    pub fn record_set(durable: bool) {
        counter!(
            format!("{}.set", METRIC_NAMESPACE),
            "durable" => if durable { "written" } else { "skipped" }
        )
        .increment(1);
    }

    /// 記錄持久層命中後提升至內存層
    pub fn record_promotion() {
        counter!(format!("{}.promotion", METRIC_NAMESPACE)).increment(1);
    }
}
