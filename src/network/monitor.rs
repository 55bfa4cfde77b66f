use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::domain_types::DegradationReason;
use crate::fallback::registry::RecoveryRegistry;

/// 網路狀態監控
///
/// 兩態狀態機（在線/離線）。恢復連線時呼叫為 `network_failure` 註冊的恢復回調；
/// 斷線只更新狀態並記錄警告，不中斷進行中的工作。
pub struct NetworkMonitor {
    online: AtomicBool,
    recovery: Arc<RecoveryRegistry>,
}

impl NetworkMonitor {
    pub fn new(initial_online: bool, recovery: Arc<RecoveryRegistry>) -> Self {
        Self {
            online: AtomicBool::new(initial_online),
            recovery,
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }

    /// 處理一次連線狀態通知，返回狀態是否改變
    pub fn on_transition(&self, online: bool) -> bool {
        let previous = self.online.swap(online, Ordering::AcqRel);
        if previous == online {
            debug!("忽略重複的連線狀態通知: online={}", online);
            return false;
        }

        if online {
            self.run_recovery();
            info!("網路連線已恢復");
        } else {
            warn!("網路連線中斷，進入離線模式");
        }
        true
    }

    /// 從 `watch` 通道驅動狀態機，通道關閉時結束
    pub fn spawn_listener(self: Arc<Self>, mut rx: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let initial = *rx.borrow_and_update();
            self.on_transition(initial);

            while rx.changed().await.is_ok() {
                let online = *rx.borrow_and_update();
                self.on_transition(online);
            }

            debug!("連線狀態通道已關閉，停止監聽");
        })
    }

    fn run_recovery(&self) {
        let Some(callback) = self.recovery.get(DegradationReason::NetworkFailure) else {
            return;
        };

        if let Err(e) = callback() {
            error!("網路恢復回調執行失敗: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::signal::{ConnectivitySignal, WatchConnectivity};
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    fn counting_registry() -> (Arc<RecoveryRegistry>, Arc<AtomicUsize>) {
        let registry = Arc::new(RecoveryRegistry::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        registry.register(
            DegradationReason::NetworkFailure,
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        );
        (registry, calls)
    }

    #[test]
    fn test_recovery_runs_only_on_offline_to_online() {
        let (registry, calls) = counting_registry();
        let monitor = NetworkMonitor::new(true, registry);

        assert!(!monitor.on_transition(true));
        assert!(monitor.on_transition(false));
        assert!(!monitor.is_online());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(!monitor.on_transition(false));
        assert!(monitor.on_transition(true));
        assert!(!monitor.on_transition(true));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failing_callback_is_swallowed() {
        let registry = Arc::new(RecoveryRegistry::new());
        registry.register(
            DegradationReason::NetworkFailure,
            Arc::new(|| Err(anyhow::anyhow!("reconnect failed"))),
        );
        let monitor = NetworkMonitor::new(false, registry);

        assert!(monitor.on_transition(true));
        assert!(monitor.is_online());
    }

    #[tokio::test]
    async fn test_listener_follows_signal() {
        let (registry, calls) = counting_registry();
        let signal = WatchConnectivity::new(true);
        let monitor = Arc::new(NetworkMonitor::new(signal.is_online(), registry));
        let handle = monitor.clone().spawn_listener(signal.subscribe());

        signal.set_online(false);
        wait_until(|| !monitor.is_online()).await;

        signal.set_online(true);
        wait_until(|| monitor.is_online()).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        drop(signal);
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("監聽任務未結束")
            .unwrap();
    }

    async fn wait_until(condition: impl Fn() -> bool) {
        for _ in 0..100 {
            if condition() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("等待狀態變化逾時");
    }
}
