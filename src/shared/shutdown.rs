//! Graceful shutdown handling
//!
//! One broadcast signal shared by the HTTP server and background tasks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{error, info, warn};

/// Cloneable shutdown flag with a wake-up channel
#[derive(Clone)]
pub struct ShutdownSignal {
    sender: broadcast::Sender<()>,
    triggered: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1);
        Self {
            sender,
            triggered: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    pub fn trigger(&self) {
        if !self.triggered.swap(true, Ordering::SeqCst) {
            info!("🛑 Shutdown signal triggered");
            let _ = self.sender.send(());
        }
    }

    /// Resolves once the signal has fired, including when it fired earlier.
    pub async fn wait(&self) {
        self.notified().wait().await;
    }

    pub fn notified(&self) -> ShutdownNotified {
        ShutdownNotified {
            receiver: self.sender.subscribe(),
            triggered: self.triggered.clone(),
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ShutdownNotified {
    receiver: broadcast::Receiver<()>,
    triggered: Arc<AtomicBool>,
}

impl ShutdownNotified {
    pub async fn wait(mut self) {
        if self.triggered.load(Ordering::SeqCst) {
            return;
        }
        let _ = self.receiver.recv().await;
    }
}

/// Listen for SIGTERM / SIGINT (Ctrl+C elsewhere) and trigger `shutdown`.
pub async fn listen_for_shutdown_signals(shutdown: ShutdownSignal) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let (mut sigterm, mut sigint) =
            match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(term), Ok(int)) => (term, int),
                (Err(e), _) | (_, Err(e)) => {
                    error!(error = %e, "Failed to install signal handlers");
                    return;
                }
            };

        tokio::select! {
            _ = sigterm.recv() => info!("📡 Received SIGTERM signal"),
            _ = sigint.recv() => info!("📡 Received SIGINT signal (Ctrl+C)"),
        }
        shutdown.trigger();
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            return;
        }
        info!("📡 Received Ctrl+C signal");
        shutdown.trigger();
    }
}

pub struct ShutdownCoordinator {
    signal: ShutdownSignal,
    timeout_secs: u64,
}

impl ShutdownCoordinator {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            signal: ShutdownSignal::new(),
            timeout_secs,
        }
    }

    pub fn signal(&self) -> ShutdownSignal {
        self.signal.clone()
    }

    pub fn start_signal_listener(&self) {
        let signal = self.signal.clone();
        tokio::spawn(async move {
            listen_for_shutdown_signals(signal).await;
        });
    }

    /// Wait for the signal, then run `cleanup` bounded by the timeout.
    /// Returns false when the cleanup timed out.
    pub async fn shutdown_with_cleanup<F, Fut>(&self, cleanup: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = ()>,
    {
        self.signal.wait().await;
        info!("⏳ Starting graceful shutdown (timeout: {}s)...", self.timeout_secs);

        match tokio::time::timeout(
            tokio::time::Duration::from_secs(self.timeout_secs),
            cleanup(),
        )
        .await
        {
            Ok(()) => {
                info!("✅ Graceful shutdown completed");
                true
            }
            Err(_) => {
                warn!("⚠️ Graceful shutdown timed out after {}s", self.timeout_secs);
                false
            }
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new(30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wait_returns_after_earlier_trigger() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        assert!(signal.is_triggered());
        tokio::time::timeout(std::time::Duration::from_secs(1), signal.wait())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn clones_share_the_signal() {
        let signal = ShutdownSignal::new();
        let waiter = signal.notified();
        let handle = tokio::spawn(waiter.wait());
        signal.clone().trigger();
        tokio::time::timeout(std::time::Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn cleanup_timeout_is_reported() {
        let coordinator = ShutdownCoordinator::new(0);
        coordinator.signal().trigger();
        let finished = coordinator
            .shutdown_with_cleanup(|| async {
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
            })
            .await;
        assert!(!finished);
    }

    #[tokio::test]
    async fn cleanup_runs_once_the_signal_fires() {
        let coordinator = ShutdownCoordinator::new(1);
        let signal = coordinator.signal();
        let ran = Arc::new(AtomicBool::new(false));

        let flag = ran.clone();
        let drain = tokio::spawn(async move {
            coordinator
                .shutdown_with_cleanup(|| async move {
                    flag.store(true, Ordering::SeqCst);
                })
                .await
        });
        tokio::task::yield_now().await;
        assert!(!ran.load(Ordering::SeqCst));

        signal.trigger();
        assert!(drain.await.unwrap());
        assert!(ran.load(Ordering::SeqCst));
    }
}
