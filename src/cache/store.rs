use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;

/// 持久層操作錯誤
#[derive(Error, Debug)]
pub enum StoreError {
    /// 連接錯誤
    #[error("持久層連接錯誤: {0}")]
    ConnectionError(String),

    /// 讀寫錯誤
    #[error("持久層操作錯誤: {0}")]
    OperationError(String),

    /// 儲存空間已滿
    #[error("持久層空間不足: {0}")]
    QuotaExceeded(String),
}

/// 持久層鍵值儲存接口
///
/// 值為序列化後的字串，鍵不存在時 `get` 返回 `Ok(None)`。
#[async_trait]
pub trait DurableStore: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
}

/// 進程內的持久層實現
///
/// 適用於測試以及不需要跨進程共享的單機部署。
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries.remove(key).map(|(_, value)| value)
    }
}

#[async_trait]
impl DurableStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).map(|value| value.clone()))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}
