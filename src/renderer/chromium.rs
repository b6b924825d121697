//! Chromium-based renderer using chromiumoxide.

use super::{PageSession, Renderer};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Extra settle time after the load event, for late-rendering content.
const RENDER_SETTLE: Duration = Duration::from_millis(500);

/// Find the Chromium binary path.
pub fn find_chromium() -> Option<PathBuf> {
    // 1. PAGEVAULT_CHROMIUM_PATH env
    if let Ok(p) = std::env::var("PAGEVAULT_CHROMIUM_PATH") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    // 2. ~/.pagevault/chromium/
    if let Some(home) = dirs::home_dir() {
        let candidates = if cfg!(target_os = "macos") {
            vec![
                home.join(".pagevault/chromium/chrome-mac-arm64/Google Chrome for Testing.app/Contents/MacOS/Google Chrome for Testing"),
                home.join(".pagevault/chromium/chrome-mac-x64/Google Chrome for Testing.app/Contents/MacOS/Google Chrome for Testing"),
                home.join(".pagevault/chromium/chrome"),
            ]
        } else {
            vec![
                home.join(".pagevault/chromium/chrome-linux64/chrome"),
                home.join(".pagevault/chromium/chrome"),
            ]
        };
        for c in candidates {
            if c.exists() {
                return Some(c);
            }
        }
    }

    // 3. System PATH
    for name in ["google-chrome", "chromium", "chromium-browser"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    // 4. Common macOS location
    if cfg!(target_os = "macos") {
        let common =
            PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

/// Chromium-based renderer.
pub struct ChromiumRenderer {
    browser: Browser,
    active_count: Arc<AtomicUsize>,
}

impl ChromiumRenderer {
    /// Launch a headless Chromium instance shared by all sessions.
    pub async fn new() -> Result<Self> {
        let chrome_path = find_chromium()
            .context("Chromium not found. Install it or set PAGEVAULT_CHROMIUM_PATH.")?;

        let config = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .arg("--hide-scrollbars")
            .arg("--mute-audio")
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch Chromium")?;

        // Drain CDP events for the lifetime of the browser
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("browser handler error: {e}");
                }
            }
        });

        Ok(Self {
            browser,
            active_count: Arc::new(AtomicUsize::new(0)),
        })
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn new_session(&self) -> Result<Box<dyn PageSession>> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("failed to create new page")?;

        self.active_count.fetch_add(1, Ordering::Relaxed);

        Ok(Box::new(ChromiumSession {
            page,
            active_count: Arc::clone(&self.active_count),
        }))
    }

    async fn shutdown(&self) -> Result<()> {
        // Browser process exits when ChromiumRenderer is dropped
        Ok(())
    }

    fn active_sessions(&self) -> usize {
        self.active_count.load(Ordering::Relaxed)
    }
}

/// A single Chromium page session.
pub struct ChromiumSession {
    page: Page,
    active_count: Arc<AtomicUsize>,
}

#[async_trait]
impl PageSession for ChromiumSession {
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<()> {
        let result = tokio::time::timeout(
            Duration::from_millis(timeout_ms),
            async {
                self.page.goto(url).await?;
                self.page.wait_for_navigation().await?;
                Ok::<_, anyhow::Error>(())
            },
        )
        .await;

        match result {
            Ok(Ok(())) => {
                // Late-loading scripts get a short grace period
                tokio::time::sleep(RENDER_SETTLE).await;
                Ok(())
            }
            Ok(Err(e)) => bail!("navigation failed: {e}"),
            Err(_) => bail!("navigation timed out after {timeout_ms}ms"),
        }
    }

    async fn html(&self) -> Result<String> {
        self.page
            .content()
            .await
            .context("failed to get page HTML")
    }

    async fn pdf(&self) -> Result<Vec<u8>> {
        let params = PrintToPdfParams::builder().print_background(true).build();
        self.page.pdf(params).await.context("failed to generate PDF")
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        let params = ScreenshotParams::builder().full_page(true).build();
        self.page
            .screenshot(params)
            .await
            .context("failed to capture screenshot")
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.active_count.fetch_sub(1, Ordering::Relaxed);
        let _ = self.page.close().await;
        Ok(())
    }
}
