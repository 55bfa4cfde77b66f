use config::ConfigError;
use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::config::loader::{ConfigLoader, Environment};
use crate::config::types::ResilienceConfig;
use crate::config::validation::Validator;

// 全局配置實例
static CONFIG: OnceCell<ResilienceConfig> = OnceCell::new();

/// 獲取配置實例
///
/// 尚未初始化時嘗試從環境載入；載入失敗則記錄警告並使用預設值。
pub fn get_config() -> &'static ResilienceConfig {
    CONFIG.get_or_init(|| {
        ResilienceConfig::load_from_env().unwrap_or_else(|err| {
            warn!("無法加載配置，使用預設值: {}", err);
            ResilienceConfig::default()
        })
    })
}

/// 初始化配置（在應用程序啟動時調用）
pub fn init_config() -> Result<&'static ResilienceConfig, ConfigError> {
    let config = ResilienceConfig::load_from_env()?;

    if CONFIG.set(config).is_err() {
        warn!("配置已經被初始化，跳過重複初始化");
    } else {
        debug!("配置初始化成功，環境：{:?}", Environment::from_env());
    }

    Ok(get_config())
}

impl ResilienceConfig {
    /// 從環境變數指定的環境加載配置
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let env = Environment::from_env();
        debug!("從環境加載配置: {:?}", env);
        Self::load(env)
    }

    /// 從指定環境加載配置
    ///
    /// 驗證失敗時返回錯誤，避免以不合法的參數啟動引擎。
    pub fn load(env: Environment) -> Result<Self, ConfigError> {
        let config: ResilienceConfig = ConfigLoader::load(env)?.try_deserialize()?;

        config
            .validate()
            .map_err(|err| ConfigError::Message(format!("配置驗證失敗: {}", err)))?;
        debug!("配置驗證通過");

        Ok(config)
    }
}
