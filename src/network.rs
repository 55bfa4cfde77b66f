//! 網路狀態模組
//!
//! 連線狀態來源的介面與參考實現，以及追蹤連線轉換的監控器。

pub mod monitor;
pub mod signal;

pub use monitor::NetworkMonitor;
pub use signal::{ConnectivitySignal, WatchConnectivity};
