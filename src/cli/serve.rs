//! Start the Pagevault archive server.

use crate::archive::Archiver;
use crate::config::Config;
use crate::renderer::chromium::ChromiumRenderer;
use crate::renderer::Renderer;
use crate::rest;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Launch the browser, build the pipeline, and serve the REST API.
///
/// A browser that fails to start is fatal: the process never begins
/// accepting traffic.
pub async fn run(cfg: Config) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pagevault=info".parse()?),
        )
        .init();

    info!("starting Pagevault v{}", env!("CARGO_PKG_VERSION"));

    std::fs::create_dir_all(&cfg.archive_root).with_context(|| {
        format!("failed to create archive root {}", cfg.archive_root.display())
    })?;

    let renderer: Arc<dyn Renderer> = Arc::new(
        ChromiumRenderer::new()
            .await
            .context("browser failed to start; refusing to serve")?,
    );
    info!("Chromium renderer initialized");

    let port = cfg.port;
    let archiver = Arc::new(Archiver::new(cfg, renderer)?);

    rest::serve(port, archiver).await
}
