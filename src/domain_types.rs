//! 領域類型模組
//!
//! 定義降級原因、等級與恢復策略的封閉枚舉，
//! 以及降級上下文和替代內容的資料結構。

pub mod content;
pub mod context;
pub mod reason;

// 重新導出常用類型
pub use content::{
    ActionKind, ContentOutcome, DegradedContent, FallbackContent, FallbackMetadata, FallbackScene,
    RecoverySource, SceneAction, SceneKind,
};
pub use context::{DegradationContext, DegradationMetadata, MetadataDetail};
pub use reason::{DegradationLevel, DegradationReason, RecoveryStrategy};
