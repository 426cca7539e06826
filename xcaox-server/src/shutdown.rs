use tokio::signal;

/// Resolves on the first SIGINT or SIGTERM.
///
/// If a handler can't be installed the corresponding branch never resolves,
/// so the server keeps running instead of exiting straight away.
pub async fn signal() {
    let interrupt = async {
        if let Err(error) = signal::ctrl_c().await {
            log::warn!("error setting up SIGINT handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                log::warn!("error setting up SIGTERM handler, can't shut down gracefully: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {}
        _ = terminate => {}
    }

    log::info!("shutdown signal received, shutting down gracefully");
}
