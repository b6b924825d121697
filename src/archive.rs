//! The archival pipeline.
//!
//! One `Archiver` is shared by all requests. Each request flows through:
//! normalize → content hash → concurrency gate → per-hash lock →
//! fetch (headers first) → size guard → format dispatch → saver(s) →
//! record assembly. The gate slot and the browser page are released on
//! every exit path.

use crate::config::Config;
use crate::error::ArchiveError;
use crate::fetch::Fetcher;
use crate::renderer::{PageSession, Renderer};
use crate::saver::{self, SavePlan};
use crate::{address, normalize};
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore};
use tracing::{info, warn};

/// Saved artifacts for one hash: artifact kind → public URL.
pub type ArchiveRecord = BTreeMap<String, String>;

/// Shared archival pipeline.
pub struct Archiver {
    config: Config,
    renderer: Arc<dyn Renderer>,
    fetcher: Fetcher,
    /// Bounds simultaneous fetch/render/save sessions. FIFO admission.
    gate: Arc<Semaphore>,
    /// Serializes writes into the same hash directory (last-writer-wins,
    /// but never interleaved).
    hash_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl Archiver {
    pub fn new(config: Config, renderer: Arc<dyn Renderer>) -> anyhow::Result<Self> {
        let fetcher = Fetcher::new(config.nav_timeout_ms)?;
        let gate = Arc::new(Semaphore::new(config.max_concurrent.max(1)));
        Ok(Self {
            config,
            renderer,
            fetcher,
            gate,
            hash_locks: DashMap::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Archive one URL and return the saved-artifact record.
    pub async fn archive(&self, raw_url: &str) -> Result<ArchiveRecord, ArchiveError> {
        if raw_url.trim().is_empty() {
            return Err(ArchiveError::Input);
        }

        let url = normalize::normalize_url(raw_url.trim());
        let hash = address::content_hash(&url);
        info!(url = %url, hash = %hash, "archive request");

        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| ArchiveError::Save("concurrency gate closed".into()))?;

        let key_lock = self.hash_lock(&hash);
        let result = {
            let _key_guard = key_lock.lock().await;
            self.run_session(&url, &hash).await
        };
        drop(key_lock);
        // Evict the lock entry once nothing else holds it. A concurrent
        // holder keeps a clone, so the strong-count check keeps the
        // entry alive for them.
        self.hash_locks
            .remove_if(&hash, |_, lock| Arc::strong_count(lock) == 1);

        match result {
            Ok(record) => {
                info!(hash = %hash, artifacts = record.len(), "archive complete");
                Ok(record)
            }
            Err(e) => {
                warn!(url = %url, "archive failed: {e}");
                Err(e)
            }
        }
    }

    /// Hash-lock entries currently retained. Entries are evicted when
    /// the last holder releases.
    pub fn pending_hash_locks(&self) -> usize {
        self.hash_locks.len()
    }

    /// Per-hash lock, created on first use.
    fn hash_lock(&self, hash: &str) -> Arc<Mutex<()>> {
        self.hash_locks
            .entry(hash.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// One fetch/render/save session. Runs inside the gate and the
    /// per-hash lock.
    ///
    /// Rendered-page URLs hit the origin twice: the header probe (body
    /// discarded) and the browser navigation. The probe is what lets the
    /// size guard and the dispatcher run before any browser work; the
    /// two responses are assumed consistent.
    async fn run_session(&self, url: &str, hash: &str) -> Result<ArchiveRecord, ArchiveError> {
        let response = self.fetcher.fetch(url).await?;

        // Size guard: declared length first, before any body read.
        let limit = self.config.max_content_length;
        if let Some(length) = response.meta.content_length {
            if length > limit {
                return Err(ArchiveError::SizeLimit { length, limit });
            }
        }

        let plan = saver::plan_for(&response.meta.content_type);
        let dir = self.hash_dir(hash);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| ArchiveError::save(&format!("creating {}", dir.display()), e))?;

        match plan {
            SavePlan::RenderedPage => self.render_and_save(url, hash, &dir, true).await,
            SavePlan::FallbackPage => self.render_and_save(url, hash, &dir, false).await,
            SavePlan::RawBody { ext } => {
                let body = response.body_limited(limit).await?;
                let filename = saver::write_artifact(&dir, hash, &ext, &body).await?;
                let mut record = ArchiveRecord::new();
                record.insert("file".into(), self.config.public_file_url(hash, &filename));
                Ok(record)
            }
        }
    }

    /// Render in a fresh browser page and persist the artifacts. The
    /// page is closed no matter how the save turns out, session budget
    /// expiry included.
    async fn render_and_save(
        &self,
        url: &str,
        hash: &str,
        dir: &std::path::Path,
        full: bool,
    ) -> Result<ArchiveRecord, ArchiveError> {
        let mut session = self
            .renderer
            .new_session()
            .await
            .map_err(|e| ArchiveError::Navigation(format!("failed to open browser page: {e}")))?;

        // The budget wraps capture only, so a hung render is abandoned
        // while close still runs below.
        let session_budget = Duration::from_millis(self.config.session_timeout_ms);
        let result = match tokio::time::timeout(
            session_budget,
            self.capture_artifacts(session.as_mut(), url, hash, dir, full),
        )
        .await
        {
            Ok(inner) => inner,
            Err(_) => {
                let ms = self.config.session_timeout_ms;
                warn!(url = %url, "archive session timed out after {ms}ms");
                Err(ArchiveError::Navigation(format!(
                    "session timed out after {ms}ms"
                )))
            }
        };

        if let Err(e) = session.close().await {
            warn!(url = %url, "failed to close page: {e}");
        }

        result
    }

    async fn capture_artifacts(
        &self,
        session: &mut dyn PageSession,
        url: &str,
        hash: &str,
        dir: &std::path::Path,
        full: bool,
    ) -> Result<ArchiveRecord, ArchiveError> {
        session
            .navigate(url, self.config.nav_timeout_ms)
            .await
            .map_err(|e| ArchiveError::Navigation(e.to_string()))?;

        let mut record = ArchiveRecord::new();

        let html = session
            .html()
            .await
            .map_err(|e| ArchiveError::Save(e.to_string()))?;
        let filename = saver::write_artifact(dir, hash, "html", html.as_bytes()).await?;
        record.insert("html".into(), self.config.public_file_url(hash, &filename));

        if full {
            let pdf = session
                .pdf()
                .await
                .map_err(|e| ArchiveError::Save(e.to_string()))?;
            let filename = saver::write_artifact(dir, hash, "pdf", &pdf).await?;
            record.insert("pdf".into(), self.config.public_file_url(hash, &filename));

            let png = session
                .screenshot()
                .await
                .map_err(|e| ArchiveError::Save(e.to_string()))?;
            let filename = saver::write_artifact(dir, hash, "png", &png).await?;
            record.insert(
                "screenshot".into(),
                self.config.public_file_url(hash, &filename),
            );
        }

        Ok(record)
    }

    fn hash_dir(&self, hash: &str) -> PathBuf {
        self.config.archive_root.join(hash)
    }
}
