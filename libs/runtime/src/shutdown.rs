use anyhow::Result;
use tokio_util::sync::CancellationToken;

/// Resolves on SIGTERM / SIGINT (Ctrl+C on Windows).
pub async fn wait_for_shutdown() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::select! {
            _ = sigterm.recv() => tracing::info!("shutdown: SIGTERM received"),
            _ = sigint.recv() => tracing::info!("shutdown: SIGINT received"),
        }
        Ok(())
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        tracing::info!("shutdown: Ctrl+C received");
        Ok(())
    }
}

/// Cancels `token` once a shutdown signal arrives, or returns early if the
/// token is cancelled by someone else first.
pub async fn cancel_on_shutdown(token: CancellationToken) {
    tokio::select! {
        res = wait_for_shutdown() => {
            if let Err(e) = res {
                tracing::warn!(error = %e, "shutdown: signal handler failed; stopping");
            }
            token.cancel();
        }
        _ = token.cancelled() => {}
    }
}
