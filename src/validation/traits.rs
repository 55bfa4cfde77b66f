use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ValidationResult;

/// 結構驗證結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

/// 內容驗證器特徵
///
/// 格式正確但不合法的內容必須以 `Ok(ValidationOutcome { is_valid: false, .. })` 返回，
/// 只有災難性失敗（網路、解析、逾時、記憶體不足）才返回 `Err`。
#[async_trait]
pub trait ContentValidator: Send + Sync + 'static {
    async fn validate(&self, content: &Value) -> ValidationResult<ValidationOutcome>;
}

