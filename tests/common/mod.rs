#![allow(dead_code)]

//! Shared test helpers: a canned renderer so pipeline tests run without
//! a real Chromium.

use anyhow::{bail, Result};
use async_trait::async_trait;
use pagevault::renderer::{PageSession, Renderer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Renderer that serves fixed bytes and tracks session concurrency.
pub struct MockRenderer {
    pub active: Arc<AtomicUsize>,
    pub peak: Arc<AtomicUsize>,
    /// Artificial navigation delay, to make sessions overlap.
    pub nav_delay: Duration,
    /// Fail navigation for URLs containing this substring.
    pub fail_navigation_for: Option<String>,
    /// Fail PDF generation (to exercise partial-save reporting).
    pub fail_pdf: bool,
}

impl Default for MockRenderer {
    fn default() -> Self {
        Self {
            active: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
            nav_delay: Duration::from_millis(0),
            fail_navigation_for: None,
            fail_pdf: false,
        }
    }
}

impl MockRenderer {
    /// Highest number of simultaneously open sessions observed.
    pub fn peak_sessions(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Renderer for MockRenderer {
    async fn new_session(&self) -> Result<Box<dyn PageSession>> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        Ok(Box::new(MockSession {
            active: Arc::clone(&self.active),
            nav_delay: self.nav_delay,
            fail_navigation_for: self.fail_navigation_for.clone(),
            fail_pdf: self.fail_pdf,
        }))
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    fn active_sessions(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

pub struct MockSession {
    active: Arc<AtomicUsize>,
    nav_delay: Duration,
    fail_navigation_for: Option<String>,
    fail_pdf: bool,
}

#[async_trait]
impl PageSession for MockSession {
    async fn navigate(&mut self, url: &str, _timeout_ms: u64) -> Result<()> {
        tokio::time::sleep(self.nav_delay).await;
        if let Some(ref marker) = self.fail_navigation_for {
            if url.contains(marker.as_str()) {
                bail!("mock navigation failure for {url}");
            }
        }
        Ok(())
    }

    async fn html(&self) -> Result<String> {
        Ok("<html><body>rendered by mock</body></html>".to_string())
    }

    async fn pdf(&self) -> Result<Vec<u8>> {
        if self.fail_pdf {
            bail!("mock PDF generation failure");
        }
        Ok(b"%PDF-1.4 mock".to_vec())
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        Ok(vec![0x89, b'P', b'N', b'G'])
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}
