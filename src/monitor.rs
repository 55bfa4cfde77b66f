// monitor.rs - 監控系統模組
//
// 降級事件的監控接收端，以及日誌系統初始化。

pub mod logging;
pub mod sink;

// 重新導出常用元素，使其可直接從 monitor 模組使用
pub use logging::init_logging;
pub use sink::{DegradationReport, MetricsSink, MonitoringSink, METRIC_NAMESPACE};
