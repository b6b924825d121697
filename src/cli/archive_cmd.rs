//! One-shot archive of a single URL from the terminal.

use crate::archive::Archiver;
use crate::config::Config;
use crate::renderer::chromium::ChromiumRenderer;
use crate::renderer::Renderer;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Archive one URL and print the artifact record as pretty JSON.
pub async fn run(url: &str, cfg: Config) -> Result<()> {
    std::fs::create_dir_all(&cfg.archive_root).with_context(|| {
        format!("failed to create archive root {}", cfg.archive_root.display())
    })?;

    let renderer: Arc<dyn Renderer> = Arc::new(
        ChromiumRenderer::new()
            .await
            .context("browser failed to start")?,
    );

    let archiver = Archiver::new(cfg, Arc::clone(&renderer))?;
    let record = archiver
        .archive(url)
        .await
        .with_context(|| format!("archiving {url} failed"))?;

    println!("{}", serde_json::to_string_pretty(&record)?);

    renderer.shutdown().await?;
    Ok(())
}
