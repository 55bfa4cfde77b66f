//! 內容韌性引擎
//!
//! 將分類、等級、策略、快取、修復與替代內容組合成對外的單一服務。
//!
//! # 使用範例
//!
//! ```rust,ignore
//! use content_resilience::engine::{ContentResilienceEngineBuilder, HandleOptions};
//!
//! let engine = ContentResilienceEngineBuilder::new()
//!     .with_validator(validator)
//!     .build()?;
//!
//! let outcome = engine
//!     .handle_content(content, HandleOptions::default().with_content_id("lesson-1"))
//!     .await;
//! if let Some(info) = outcome.degradation_info() {
//!     println!("已降級: {} ({})", info.reason(), info.strategy());
//! }
//! ```

pub mod builder;
pub mod error;
pub mod handler;
pub mod options;

pub use builder::ContentResilienceEngineBuilder;
pub use error::{EngineError, EngineResult};
pub use handler::ContentResilienceEngine;
pub use options::{DegradeOptions, HandleOptions};
