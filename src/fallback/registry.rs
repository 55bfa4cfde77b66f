use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

use crate::domain_types::{DegradationContext, DegradationReason, FallbackContent};

/// 針對特定降級原因產生替代內容的函數
pub type FallbackProvider =
    Arc<dyn Fn(&DegradationContext) -> anyhow::Result<FallbackContent> + Send + Sync>;

/// 針對特定降級原因的恢復回調
pub type RecoveryCallback = Arc<dyn Fn() -> anyhow::Result<()> + Send + Sync>;

/// 以降級原因為索引的固定大小表
///
/// 每個原因至多一個項目，重複註冊時後者覆蓋前者。
pub struct ReasonTable<T: Clone> {
    slots: RwLock<[Option<T>; DegradationReason::COUNT]>,
}

impl<T: Clone> ReasonTable<T> {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(std::array::from_fn(|_| None)),
        }
    }

    /// 註冊項目，返回是否覆蓋了既有項目
    pub fn register(&self, reason: DegradationReason, item: T) -> bool {
        let replaced = self.slots.write()[reason.index()].replace(item).is_some();
        debug!("註冊 {} 處理函數 (覆蓋: {})", reason, replaced);
        replaced
    }

    pub fn get(&self, reason: DegradationReason) -> Option<T> {
        self.slots.read()[reason.index()].clone()
    }

    pub fn contains(&self, reason: DegradationReason) -> bool {
        self.slots.read()[reason.index()].is_some()
    }

    pub fn remove(&self, reason: DegradationReason) -> Option<T> {
        self.slots.write()[reason.index()].take()
    }

    /// 已註冊項目數
    pub fn len(&self) -> usize {
        self.slots.read().iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> Default for ReasonTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub type ProviderRegistry = ReasonTable<FallbackProvider>;
pub type RecoveryRegistry = ReasonTable<RecoveryCallback>;
