//! 降級決策模組
//!
//! 純函數組成的決策核心：錯誤分類、降級等級計算、恢復策略選擇，
//! 以及有界的降級事件歷史與統計。

pub mod classifier;
pub mod history;
pub mod level;
pub mod strategy;

// 重新導出常用元素
pub use classifier::{classify, classify_message};
pub use history::{DegradationHistory, DegradationStats, DEFAULT_HISTORY_CAPACITY, DEFAULT_RECENT_LIMIT};
pub use level::{resolve_level, retry_ratio, Connectivity};
pub use strategy::select_strategy;
