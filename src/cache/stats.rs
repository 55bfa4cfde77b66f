/// 內容快取統計信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// 內存層項目數（近似值）
    pub size: usize,
    /// 內存層容量
    pub capacity: usize,
    /// 是否配置了持久層
    pub durable: bool,
}
