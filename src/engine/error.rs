use thiserror::Error;

use crate::config::validation::ValidationError;
use crate::redis::pool::RedisPoolError;

/// 引擎構建錯誤
///
/// 只在組裝階段出現；引擎建立後的 `handle_content` 與 `degrade_content` 不會失敗。
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("配置錯誤: {0}")]
    Config(String),

    #[error("配置驗證失敗: {0}")]
    InvalidConfig(#[from] ValidationError),

    #[error("持久層初始化失敗: {0}")]
    Store(#[from] RedisPoolError),
}

pub type EngineResult<T> = Result<T, EngineError>;
