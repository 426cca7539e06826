use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use xcaox_maps::{DataService, FileFetcher, ManifestResolver};

mod config;
mod routes;
mod shutdown;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    describe_tiles(&config).await;

    let addr = config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    log::info!("{} running on port {}", routes::SERVICE_NAME, config.port);
    log::info!("  local:  http://localhost:{}", config.port);
    log::info!("  health: http://localhost:{}/health", config.port);

    axum::serve(listener, routes::app(&config.root))
        .with_graceful_shutdown(shutdown::signal())
        .await
        .context("server error")?;

    log::info!("server closed");
    Ok(())
}

/// Logs what the viewer will make of the tile tree being served
async fn describe_tiles(config: &Config) {
    let data = DataService::new(Arc::new(FileFetcher::new(config.root.clone())));
    let manifest = data.fetch_manifest().await;
    let setup = ManifestResolver::resolve(manifest.as_ref());

    if setup.is_fallback() {
        log::warn!(
            "no tile manifest under {}, the viewer will start at the default view",
            config.root.display()
        );
    } else {
        log::info!(
            "tiles: native z{}-{}, displayed up to z{} ({:?})",
            setup.zoom.min_native_zoom,
            setup.zoom.max_native_zoom,
            setup.zoom.display_max_zoom,
            setup.origin
        );
    }
}
