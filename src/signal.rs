//! Shutdown signal handling.
//!
//! A signal source that cannot be registered never fires; it must not be
//! mistaken for a delivered signal and cancel the scan at startup.

use std::future::Future;
use std::io;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Cancel `cancel` on Ctrl+C, or SIGTERM on Unix.
pub fn spawn_listener(cancel: CancellationToken) {
    tokio::spawn(async move {
        wait_for_signal().await;
        cancel.cancel();
    });
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let term = async {
        let mut term = signal(SignalKind::terminate())?;
        term.recv().await;
        Ok::<(), io::Error>(())
    };

    tokio::select! {
        _ = wait_or_pending("ctrl-c", tokio::signal::ctrl_c()) => {}
        _ = wait_or_pending("SIGTERM", term) => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    wait_or_pending("ctrl-c", tokio::signal::ctrl_c()).await;
}

/// Resolve when `signal` fires. If the handler fails to register, log it
/// and stay pending forever.
async fn wait_or_pending<F>(name: &str, signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(err) = signal.await {
        warn!(signal = name, error = %err, "failed to listen for signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_failed_registration_never_fires() {
        let failed = async { Err::<(), _>(io::Error::new(io::ErrorKind::Other, "no handler")) };
        let res = tokio::time::timeout(
            Duration::from_millis(100),
            wait_or_pending("test", failed),
        )
        .await;
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn test_delivered_signal_resolves() {
        let delivered = async { Ok::<(), io::Error>(()) };
        tokio::time::timeout(Duration::from_millis(100), wait_or_pending("test", delivered))
            .await
            .expect("delivered signal should resolve");
    }

    #[tokio::test]
    async fn test_listener_leaves_scan_running() {
        let cancel = CancellationToken::new();
        spawn_listener(cancel.clone());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!cancel.is_cancelled());
    }
}
