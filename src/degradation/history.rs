use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};

use crate::domain_types::{DegradationContext, DegradationLevel, DegradationReason};

/// 預設歷史紀錄容量
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;
/// 統計中返回的最近事件數量
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// 降級統計
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DegradationStats {
    /// 歷史中的事件總數
    pub total: usize,
    pub by_reason: BTreeMap<DegradationReason, usize>,
    pub by_level: BTreeMap<DegradationLevel, usize>,
    /// 最近的事件，最新的在最後
    pub recent: Vec<DegradationContext>,
}

/// 有界的降級事件歷史（先進先出）
#[derive(Debug)]
pub struct DegradationHistory {
    entries: VecDeque<DegradationContext>,
    capacity: usize,
    recent_limit: usize,
}

impl DegradationHistory {
    pub fn new(capacity: usize, recent_limit: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            recent_limit,
        }
    }

    /// 追加事件，超出容量時淘汰最舊的紀錄
    pub fn push(&mut self, context: DegradationContext) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(context);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &DegradationContext> {
        self.entries.iter()
    }

    /// 計算彙總統計
    pub fn stats(&self) -> DegradationStats {
        let mut by_reason = BTreeMap::new();
        let mut by_level = BTreeMap::new();

        for ctx in &self.entries {
            *by_reason.entry(ctx.reason()).or_insert(0) += 1;
            *by_level.entry(ctx.level()).or_insert(0) += 1;
        }

        let skip = self.entries.len().saturating_sub(self.recent_limit);
        let recent = self.entries.iter().skip(skip).cloned().collect();

        DegradationStats {
            total: self.entries.len(),
            by_reason,
            by_level,
            recent,
        }
    }
}

impl Default for DegradationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY, DEFAULT_RECENT_LIMIT)
    }
}
