//! 內容驗證模組
//!
//! 定義外部驗證器的介面（`ContentValidator`）以及驗證失敗的錯誤類型，
//! 並提供一個結構驗證器作為預設實現。
//!
//! # 使用範例
//!
//! ```rust,ignore
//! use content_resilience::validation::{ContentValidator, StructuralValidator};
//!
//! let validator = StructuralValidator::new();
//! let outcome = validator.validate(&content).await?;
//! if !outcome.is_valid {
//!     println!("結構錯誤: {:?}", outcome.errors);
//! }
//! ```

pub mod error;
pub mod structural;
pub mod traits;

// 重新導出常用類型
pub use error::{ContentFailure, ValidationResult};
pub use structural::StructuralValidator;
pub use traits::{ContentValidator, ValidationOutcome};
