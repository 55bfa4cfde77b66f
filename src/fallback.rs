//! 替代內容模組
//!
//! 在驗證、快取都無法提供內容時，負責產生可安全呈現的替代內容：
//! 內建工廠、結構修補，以及呼叫端按降級原因註冊的提供者與恢復回調。

pub mod factory;
pub mod registry;
pub mod repair;

pub use factory::{FallbackFactory, FallbackScenario, FALLBACK_VERSION};
pub use registry::{FallbackProvider, ProviderRegistry, ReasonTable, RecoveryCallback, RecoveryRegistry};
pub use repair::{repair_structure, RESTORED_ID_PREFIX};
