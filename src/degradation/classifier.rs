use std::fmt::Display;

use crate::domain_types::DegradationReason;

// 依優先順序排列：先命中者勝出
const NETWORK_PATTERNS: &[&str] = &["network", "fetch", "connection", "offline"];
const TIMEOUT_PATTERNS: &[&str] = &["timeout", "timed out"];
const MEMORY_PATTERNS: &[&str] = &["memory", "heap", "allocation"];
const MALFORMED_PATTERNS: &[&str] = &["malformed", "parse", "json", "syntax", "unexpected token"];
const RENDERING_PATTERNS: &[&str] = &["render", "display"];

const RULES: &[(&[&str], DegradationReason)] = &[
    (NETWORK_PATTERNS, DegradationReason::NetworkFailure),
    (TIMEOUT_PATTERNS, DegradationReason::TimeoutError),
    (MEMORY_PATTERNS, DegradationReason::MemoryPressure),
    (MALFORMED_PATTERNS, DegradationReason::MalformedContent),
    (RENDERING_PATTERNS, DegradationReason::RenderingError),
];

/// 將錯誤分類為降級原因
///
/// 以錯誤的顯示文字做不分大小寫的子字串比對。
pub fn classify<E: Display + ?Sized>(error: &E) -> DegradationReason {
    classify_message(&error.to_string())
}

/// 將錯誤訊息分類為降級原因
///
/// 每個輸入都恰好對應一個原因，未命中任何規則時歸類為 `ServiceDisruption`。
pub fn classify_message(message: &str) -> DegradationReason {
    let lowered = message.to_lowercase();

    RULES
        .iter()
        .find(|(patterns, _)| patterns.iter().any(|p| lowered.contains(p)))
        .map(|(_, reason)| *reason)
        .unwrap_or(DegradationReason::ServiceDisruption)
}
