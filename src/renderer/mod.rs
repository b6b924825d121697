//! Renderer abstraction for browser-based page capture.
//!
//! Defines the `Renderer` and `PageSession` traits that abstract over
//! the browser engine (currently Chromium via chromiumoxide). The
//! archiver only ever talks to these traits, so tests can substitute a
//! canned implementation.

pub mod chromium;

use anyhow::Result;
use async_trait::async_trait;

/// A browser engine that can open page sessions.
///
/// One instance is shared process-wide; it is initialized once at
/// startup before any request is accepted.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Open a fresh page for one in-flight archive request.
    async fn new_session(&self) -> Result<Box<dyn PageSession>>;
    /// Shut down the browser engine.
    async fn shutdown(&self) -> Result<()>;
    /// Number of currently open pages.
    fn active_sessions(&self) -> usize;
}

/// A single browser page bound to one archive request.
///
/// Contract: opened fresh per request and closed unconditionally at the
/// end of processing, success or failure.
#[async_trait]
pub trait PageSession: Send + Sync {
    /// Navigate to a URL and wait for the page to finish loading.
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<()>;
    /// Serialized DOM of the rendered page.
    async fn html(&self) -> Result<String>;
    /// Single-page PDF of the rendered page.
    async fn pdf(&self) -> Result<Vec<u8>>;
    /// Full-page PNG screenshot of the rendered page.
    async fn screenshot(&self) -> Result<Vec<u8>>;
    /// Close this page.
    async fn close(self: Box<Self>) -> Result<()>;
}
