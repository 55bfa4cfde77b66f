use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::context::DegradationContext;

/// 場景類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    Dialogue,
    Quiz,
    Error,
}

/// 場景按鈕對應的動作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Retry,
    Skip,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneAction {
    pub label: String,
    pub action: ActionKind,
}

impl SceneAction {
    pub fn new(label: &str, action: ActionKind) -> Self {
        Self {
            label: label.to_string(),
            action,
        }
    }
}

/// 替代內容中的單一場景
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackScene {
    pub id: String,
    pub kind: SceneKind,
    pub title: String,
    pub message: String,
    pub actions: Vec<SceneAction>,
}

impl FallbackScene {
    /// 是否提供至少一個可操作的按鈕
    pub fn is_actionable(&self) -> bool {
        !self.actions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackMetadata {
    pub title: String,
    pub description: String,
    /// 預估時長（秒）
    pub duration: u32,
    pub audience: String,
    pub language: String,
}

/// 合成的替代內容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackContent {
    pub content_id: String,
    pub version: String,
    pub metadata: FallbackMetadata,
    pub scenes: Vec<FallbackScene>,
    pub degradation_info: DegradationContext,
}

/// 恢復內容的來源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoverySource {
    /// 先前驗證成功並快取的版本
    Cache,
    /// 經結構修復後重新通過驗證的版本
    Repair,
}

/// 降級後的內容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DegradedContent {
    /// 從快取或修復取回的真實內容
    Recovered {
        content: Value,
        source: RecoverySource,
        #[serde(rename = "degradationInfo")]
        degradation_info: DegradationContext,
    },
    /// 合成的替代內容
    Fallback(FallbackContent),
}

impl DegradedContent {
    pub fn degradation_info(&self) -> &DegradationContext {
        match self {
            DegradedContent::Recovered {
                degradation_info, ..
            } => degradation_info,
            DegradedContent::Fallback(fallback) => &fallback.degradation_info,
        }
    }

    /// 內容識別碼
    pub fn content_id(&self) -> Option<&str> {
        match self {
            DegradedContent::Recovered { content, .. } => content.get("id").and_then(Value::as_str),
            DegradedContent::Fallback(fallback) => Some(&fallback.content_id),
        }
    }

    pub fn as_fallback(&self) -> Option<&FallbackContent> {
        match self {
            DegradedContent::Fallback(fallback) => Some(fallback),
            DegradedContent::Recovered { .. } => None,
        }
    }
}

/// `handle_content` 的結果
///
/// 驗證通過時原樣返回輸入內容，否則返回帶有降級資訊的內容。
#[derive(Debug, Clone, PartialEq)]
pub enum ContentOutcome {
    Original(Value),
    Degraded(DegradedContent),
}

impl ContentOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, ContentOutcome::Degraded(_))
    }

    pub fn degradation_info(&self) -> Option<&DegradationContext> {
        match self {
            ContentOutcome::Original(_) => None,
            ContentOutcome::Degraded(degraded) => Some(degraded.degradation_info()),
        }
    }

    pub fn as_original(&self) -> Option<&Value> {
        match self {
            ContentOutcome::Original(content) => Some(content),
            ContentOutcome::Degraded(_) => None,
        }
    }

    pub fn as_degraded(&self) -> Option<&DegradedContent> {
        match self {
            ContentOutcome::Original(_) => None,
            ContentOutcome::Degraded(degraded) => Some(degraded),
        }
    }
}
