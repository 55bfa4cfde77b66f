/// 配置管理模組
///
/// 本模組負責加載、驗證和管理引擎配置。
/// 預設值、環境配置文件與環境變數依序疊加。
// 宣告子模組
pub mod loader;
pub mod manager;
pub mod types;
pub mod validation;

// 重新導出常用組件
pub use loader::{ConfigLoader, Environment};
pub use manager::{get_config, init_config};
pub use types::*;
pub use validation::{ValidationError, ValidationUtils, Validator};
