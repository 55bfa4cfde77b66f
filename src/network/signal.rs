use tokio::sync::watch;

/// 平台連線狀態來源
pub trait ConnectivitySignal: Send + Sync + 'static {
    /// 目前是否在線
    fn is_online(&self) -> bool;

    /// 訂閱連線狀態變化
    fn subscribe(&self) -> watch::Receiver<bool>;
}

/// 以 `watch` 通道實現的連線狀態來源
///
/// 宿主程式在偵測到平台連線變化時呼叫 `set_online`。
#[derive(Debug)]
pub struct WatchConnectivity {
    sender: watch::Sender<bool>,
}

impl WatchConnectivity {
    pub fn new(online: bool) -> Self {
        let (sender, _) = watch::channel(online);
        Self { sender }
    }

    /// 更新連線狀態，返回狀態是否改變
    pub fn set_online(&self, online: bool) -> bool {
        self.sender.send_if_modified(|current| {
            if *current == online {
                false
            } else {
                *current = online;
                true
            }
        })
    }
}

impl Default for WatchConnectivity {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ConnectivitySignal for WatchConnectivity {
    fn is_online(&self) -> bool {
        *self.sender.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }
}
