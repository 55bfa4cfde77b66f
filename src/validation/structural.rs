use async_trait::async_trait;
use serde_json::Value;

use super::error::{ContentFailure, ValidationResult};
use super::traits::{ContentValidator, ValidationOutcome};

/// 內容結構驗證器
///
/// 檢查內容是否具備播放所需的最小結構：
/// - `id`：非空字串
/// - `version`：字串
/// - `metadata`：物件，且 `metadata.title` 為字串
/// - `scenes`：非空陣列，每個場景為帶有字串 `id` 的物件
///
/// 非物件輸入視為無法解析，返回 `ContentFailure::Malformed`。
#[derive(Debug, Clone, Default)]
pub struct StructuralValidator {
    /// 是否要求至少一個場景
    require_scenes: bool,
}

impl StructuralValidator {
    pub fn new() -> Self {
        Self {
            require_scenes: true,
        }
    }

    /// 允許空場景列表
    pub fn allow_empty_scenes(mut self) -> Self {
        self.require_scenes = false;
        self
    }

    /// 同步檢查結構，返回錯誤與警告
    pub fn check(&self, content: &Value) -> ValidationResult<ValidationOutcome> {
        let object = content.as_object().ok_or_else(|| {
            ContentFailure::malformed(format!("expected an object, got {}", type_name(content)))
        })?;

        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        match object.get("id") {
            Some(Value::String(id)) if !id.trim().is_empty() => {}
            Some(Value::String(_)) => errors.push("id must not be empty".to_string()),
            Some(_) => errors.push("id must be a string".to_string()),
            None => errors.push("missing required field: id".to_string()),
        }

        match object.get("version") {
            Some(Value::String(_)) => {}
            Some(_) => errors.push("version must be a string".to_string()),
            None => errors.push("missing required field: version".to_string()),
        }

        match object.get("metadata") {
            Some(Value::Object(metadata)) => {
                if !matches!(metadata.get("title"), Some(Value::String(_))) {
                    errors.push("metadata.title must be a string".to_string());
                }
                if !metadata.contains_key("language") {
                    warnings.push("metadata.language is not set".to_string());
                }
            }
            Some(_) => errors.push("metadata must be an object".to_string()),
            None => errors.push("missing required field: metadata".to_string()),
        }

        match object.get("scenes") {
            Some(Value::Array(scenes)) => {
                if scenes.is_empty() && self.require_scenes {
                    errors.push("scenes must contain at least one scene".to_string());
                }
                for (index, scene) in scenes.iter().enumerate() {
                    if !matches!(scene.get("id"), Some(Value::String(_))) {
                        errors.push(format!("scenes[{}].id must be a string", index));
                    }
                }
            }
            Some(_) => errors.push("scenes must be an array".to_string()),
            None => errors.push("missing required field: scenes".to_string()),
        }

        if errors.is_empty() {
            Ok(ValidationOutcome::valid().with_warnings(warnings))
        } else {
            Ok(ValidationOutcome::invalid(errors).with_warnings(warnings))
        }
    }
}

#[async_trait]
impl ContentValidator for StructuralValidator {
    async fn validate(&self, content: &Value) -> ValidationResult<ValidationOutcome> {
        self.check(content)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
