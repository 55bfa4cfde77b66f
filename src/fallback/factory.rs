use serde_json::Value;

use crate::config::types::FallbackConfig;
use crate::domain_types::{
    ActionKind, DegradationContext, DegradationReason, FallbackContent, FallbackMetadata,
    FallbackScene, RecoveryStrategy, SceneAction, SceneKind,
};
use crate::utils::time_utils::current_timestamp_ms;

/// 合成內容的版本號
pub const FALLBACK_VERSION: &str = "1.0.0";

/// 替代內容的終端情境
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackScenario {
    Error,
    Offline,
    Maintenance,
    Simplified,
}

impl FallbackScenario {
    /// 根據降級上下文選擇情境
    pub fn for_context(context: &DegradationContext) -> Self {
        if context.strategy() == RecoveryStrategy::Offline {
            return FallbackScenario::Offline;
        }

        match context.reason() {
            DegradationReason::ServiceDisruption => FallbackScenario::Maintenance,
            DegradationReason::MalformedContent | DegradationReason::ValidationError => {
                FallbackScenario::Simplified
            }
            _ => FallbackScenario::Error,
        }
    }

    /// 內容 ID 前綴
    pub fn id_prefix(&self) -> &'static str {
        match self {
            FallbackScenario::Error => "error",
            FallbackScenario::Offline => "offline",
            FallbackScenario::Maintenance => "maintenance",
            FallbackScenario::Simplified => "simplified",
        }
    }
}

/// 替代內容工廠
///
/// 每個構造函數都產生至少一個提供 重試/跳過/離開 按鈕的場景，
/// 並附帶觸發降級的上下文。
#[derive(Debug, Clone)]
pub struct FallbackFactory {
    language: String,
    audience: String,
    duration_secs: u32,
}

impl FallbackFactory {
    pub fn new(config: &FallbackConfig) -> Self {
        Self {
            language: config.language.clone(),
            audience: config.audience.clone(),
            duration_secs: config.duration_secs,
        }
    }

    /// 依上下文選擇情境並產生內容
    pub fn for_context(&self, context: &DegradationContext, original: Option<&Value>) -> FallbackContent {
        match FallbackScenario::for_context(context) {
            FallbackScenario::Offline => self.offline(context),
            FallbackScenario::Maintenance => self.maintenance(context),
            FallbackScenario::Simplified => self.simplified(context, original),
            FallbackScenario::Error => self.error(context),
        }
    }

    pub fn error(&self, context: &DegradationContext) -> FallbackContent {
        self.build(
            FallbackScenario::Error,
            context,
            "Content Unavailable",
            "This content could not be loaded.",
            FallbackScene {
                id: "error-scene".to_string(),
                kind: SceneKind::Error,
                title: "Something went wrong".to_string(),
                message: "We couldn't load this content. You can try again or skip ahead."
                    .to_string(),
                actions: standard_actions(),
            },
        )
    }

    pub fn offline(&self, context: &DegradationContext) -> FallbackContent {
        self.build(
            FallbackScenario::Offline,
            context,
            "Offline Mode",
            "This content needs a network connection.",
            FallbackScene {
                id: "offline-scene".to_string(),
                kind: SceneKind::Dialogue,
                title: "You're offline".to_string(),
                message: "Reconnect to the internet to continue with this content.".to_string(),
                actions: standard_actions(),
            },
        )
    }

    pub fn maintenance(&self, context: &DegradationContext) -> FallbackContent {
        self.build(
            FallbackScenario::Maintenance,
            context,
            "Under Maintenance",
            "The content service is temporarily unavailable.",
            FallbackScene {
                id: "maintenance-scene".to_string(),
                kind: SceneKind::Dialogue,
                title: "We'll be right back".to_string(),
                message: "The content service is undergoing maintenance. Please try again shortly."
                    .to_string(),
                actions: standard_actions(),
            },
        )
    }

    /// 簡化版內容，原始內容帶有標題時沿用
    pub fn simplified(&self, context: &DegradationContext, original: Option<&Value>) -> FallbackContent {
        let title = original
            .and_then(|content| content.pointer("/metadata/title"))
            .and_then(Value::as_str)
            .filter(|title| !title.trim().is_empty())
            .unwrap_or("Simplified Content");

        self.build(
            FallbackScenario::Simplified,
            context,
            title,
            "A simplified version of this content.",
            FallbackScene {
                id: "simplified-scene".to_string(),
                kind: SceneKind::Dialogue,
                title: title.to_string(),
                message: "Part of this content couldn't be displayed, so a simplified version is shown instead."
                    .to_string(),
                actions: standard_actions(),
            },
        )
    }

    fn build(
        &self,
        scenario: FallbackScenario,
        context: &DegradationContext,
        title: &str,
        description: &str,
        scene: FallbackScene,
    ) -> FallbackContent {
        FallbackContent {
            content_id: format!("{}-{}", scenario.id_prefix(), current_timestamp_ms()),
            version: FALLBACK_VERSION.to_string(),
            metadata: FallbackMetadata {
                title: title.to_string(),
                description: description.to_string(),
                duration: self.duration_secs,
                audience: self.audience.clone(),
                language: self.language.clone(),
            },
            scenes: vec![scene],
            degradation_info: context.clone(),
        }
    }
}

impl Default for FallbackFactory {
    fn default() -> Self {
        Self::new(&FallbackConfig::default())
    }
}

fn standard_actions() -> Vec<SceneAction> {
    vec![
        SceneAction::new("Try again", ActionKind::Retry),
        SceneAction::new("Skip", ActionKind::Skip),
        SceneAction::new("Exit", ActionKind::Exit),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_types::{DegradationLevel, DegradationMetadata};
    use rstest::rstest;
    use serde_json::json;

    fn context(reason: DegradationReason, strategy: RecoveryStrategy) -> DegradationContext {
        DegradationContext::new(
            reason,
            DegradationLevel::Moderate,
            strategy,
            DegradationMetadata::explicit(),
            0,
            3,
        )
    }

    #[rstest]
    #[case(DegradationReason::NetworkFailure, RecoveryStrategy::Offline, "offline-")]
    #[case(DegradationReason::MemoryPressure, RecoveryStrategy::Offline, "offline-")]
    #[case(DegradationReason::ServiceDisruption, RecoveryStrategy::Retry, "maintenance-")]
    #[case(DegradationReason::MalformedContent, RecoveryStrategy::Fallback, "simplified-")]
    #[case(DegradationReason::ValidationError, RecoveryStrategy::Fallback, "simplified-")]
    #[case(DegradationReason::TimeoutError, RecoveryStrategy::Default, "error-")]
    #[case(DegradationReason::RenderingError, RecoveryStrategy::Default, "error-")]
    fn test_scenario_selection(
        #[case] reason: DegradationReason,
        #[case] strategy: RecoveryStrategy,
        #[case] prefix: &str,
    ) {
        let factory = FallbackFactory::default();
        let content = factory.for_context(&context(reason, strategy), None);

        assert!(content.content_id.starts_with(prefix), "{}", content.content_id);
        assert_eq!(content.degradation_info.reason(), reason);
    }

    #[test]
    fn test_every_scene_is_actionable() {
        let factory = FallbackFactory::default();
        let ctx = context(DegradationReason::TimeoutError, RecoveryStrategy::Default);

        for content in [
            factory.error(&ctx),
            factory.offline(&ctx),
            factory.maintenance(&ctx),
            factory.simplified(&ctx, None),
        ] {
            assert!(!content.scenes.is_empty());
            let actions: Vec<ActionKind> = content.scenes[0]
                .actions
                .iter()
                .map(|action| action.action)
                .collect();
            assert_eq!(actions, vec![ActionKind::Retry, ActionKind::Skip, ActionKind::Exit]);
        }
    }

    #[test]
    fn test_simplified_reuses_original_title() {
        let factory = FallbackFactory::default();
        let ctx = context(DegradationReason::ValidationError, RecoveryStrategy::Fallback);
        let original = json!({ "metadata": { "title": "Fractions 101" } });

        let content = factory.simplified(&ctx, Some(&original));
        assert_eq!(content.metadata.title, "Fractions 101");

        let untitled = factory.simplified(&ctx, Some(&json!({ "id": "x" })));
        assert_eq!(untitled.metadata.title, "Simplified Content");
    }

    #[test]
    fn test_metadata_comes_from_config() {
        let factory = FallbackFactory::new(&FallbackConfig {
            language: "zh-TW".to_string(),
            audience: "students".to_string(),
            duration_secs: 90,
        });
        let content = factory.error(&context(DegradationReason::RenderingError, RecoveryStrategy::Default));

        assert_eq!(content.metadata.language, "zh-TW");
        assert_eq!(content.metadata.audience, "students");
        assert_eq!(content.metadata.duration, 90);
        assert_eq!(content.version, FALLBACK_VERSION);
    }
}
