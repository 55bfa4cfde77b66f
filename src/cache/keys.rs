/// 預設的持久層鍵前綴
pub const DEFAULT_KEY_PREFIX: &str = "content-cache";

/// 生成持久層快取鍵
///
/// 格式為 `<prefix>-<contentId>`，與其他應用共用儲存空間時以前綴區隔。
pub fn durable_key(prefix: &str, content_id: &str) -> String {
    let mut key = String::with_capacity(prefix.len() + content_id.len() + 1);
    key.push_str(prefix);
    key.push('-');
    key.push_str(content_id);
    key
}
