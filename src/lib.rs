// 模組定義
pub mod cache;
pub mod config;
pub mod degradation;
pub mod domain_types;
pub mod engine;
pub mod fallback;
pub mod monitor;
pub mod network;
pub mod redis;
pub mod utils;
pub mod validation;

// 重新導出常用類型
pub use domain_types::{
    ContentOutcome, DegradationContext, DegradationLevel, DegradationMetadata, DegradationReason,
    DegradedContent, FallbackContent, MetadataDetail, RecoveryStrategy,
};
pub use engine::{
    ContentResilienceEngine, ContentResilienceEngineBuilder, DegradeOptions, EngineError,
    HandleOptions,
};
pub use validation::{ContentFailure, ContentValidator, ValidationOutcome};
