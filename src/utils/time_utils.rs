// time_utils.rs
//
// 時間相關的工具函數：毫秒時間戳與快取過期判斷所需的年齡計算。

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// 獲取當前系統時間的毫秒時間戳
pub fn current_timestamp_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// 計算時間戳距今的年齡
///
/// 未來的時間戳（時鐘偏移）視為年齡為 0。
pub fn age_of(timestamp_ms: i64, now_ms: i64) -> Duration {
    Duration::from_millis(now_ms.saturating_sub(timestamp_ms).max(0) as u64)
}

/// 判斷時間戳是否已超過指定的存活時間
pub fn is_expired(timestamp_ms: i64, ttl: Duration, now_ms: i64) -> bool {
    age_of(timestamp_ms, now_ms) > ttl
}
