use serde_json::{json, Map, Value};
use tracing::debug;

use crate::cache::entry::DEFAULT_CONTENT_VERSION;
use crate::utils::time_utils::current_timestamp_ms;

/// 修復後內容 ID 的前綴
pub const RESTORED_ID_PREFIX: &str = "restored";

/// 盡力修補內容結構
///
/// 只處理物件輸入，`null` 或其他類型返回 `None`。
/// 補齊缺少的 `id`、`version`、`metadata` 與 `scenes`，
/// 已存在且型別正確的欄位保持原樣。結果是否可用由呼叫端重新驗證決定。
pub fn repair_structure(content: &Value) -> Option<Value> {
    let mut object = content.as_object()?.clone();
    let mut patched = Vec::new();

    if !matches!(object.get("id"), Some(Value::String(id)) if !id.trim().is_empty()) {
        object.insert(
            "id".to_string(),
            Value::String(format!("{}-{}", RESTORED_ID_PREFIX, current_timestamp_ms())),
        );
        patched.push("id");
    }

    if !matches!(object.get("version"), Some(Value::String(_))) {
        object.insert(
            "version".to_string(),
            Value::String(DEFAULT_CONTENT_VERSION.to_string()),
        );
        patched.push("version");
    }

    match object.get_mut("metadata") {
        Some(Value::Object(metadata)) => {
            if !matches!(metadata.get("title"), Some(Value::String(_))) {
                metadata.insert("title".to_string(), Value::String("Restored Content".to_string()));
                patched.push("metadata.title");
            }
        }
        _ => {
            object.insert("metadata".to_string(), restored_metadata());
            patched.push("metadata");
        }
    }

    let scenes_usable = matches!(object.get("scenes"), Some(Value::Array(scenes)) if !scenes.is_empty());
    if !scenes_usable {
        object.insert("scenes".to_string(), json!([restored_scene()]));
        patched.push("scenes");
    }

    debug!("內容結構修補欄位: {:?}", patched);
    Some(Value::Object(object))
}

fn restored_metadata() -> Value {
    let mut metadata = Map::new();
    metadata.insert("title".to_string(), Value::String("Restored Content".to_string()));
    metadata.insert(
        "description".to_string(),
        Value::String("This content was automatically restored.".to_string()),
    );
    Value::Object(metadata)
}

fn restored_scene() -> Value {
    json!({
        "id": "restored-scene",
        "kind": "dialogue",
        "title": "Content Restored",
        "message": "This content was automatically restored and may be incomplete."
    })
}
