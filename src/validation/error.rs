use thiserror::Error;

/// 驗證過程中拋出的失敗
///
/// 與結構錯誤不同：結構錯誤透過 `ValidationOutcome` 返回，
/// 這裡只表示驗證本身無法完成（網路、解析、逾時、記憶體等）。
/// 錯誤訊息會交給分類器判斷降級原因。
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentFailure {
    /// 驗證未在時限內完成
    #[error("Validation timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// 內容無法解析
    #[error("Malformed content: {0}")]
    Malformed(String),

    /// 其他失敗，訊息原樣保留
    #[error("{0}")]
    Failed(String),
}

impl ContentFailure {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}

/// 驗證結果類型
pub type ValidationResult<T> = Result<T, ContentFailure>;
