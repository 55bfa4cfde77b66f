use anyhow::{anyhow, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::types::LogConfig;

/// 初始化日誌系統
///
/// `RUST_LOG` 存在時優先使用，否則以 `LogConfig::level` 作為過濾條件；
/// `format` 為 `json` 時輸出結構化日誌。全局訂閱者已存在時返回錯誤。
pub fn init_logging(log_config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&log_config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = if uses_json(log_config) {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow!("設置日誌系統失敗: {}", e))?;

    info!("日誌系統初始化完成");
    Ok(())
}

// 與 `LogConfig::validate` 一致，不分大小寫
fn uses_json(log_config: &LogConfig) -> bool {
    log_config.format.eq_ignore_ascii_case("json")
}
