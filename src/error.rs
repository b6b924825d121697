//! Error taxonomy for the archival pipeline.
//!
//! Every failure between request admission and response assembly maps to
//! one of these variants. The REST layer turns `Input` into a 400 and
//! everything else into a 500 with a JSON `error` body; `BrowserInit` is
//! only ever fatal at startup.

use thiserror::Error;

/// A failure inside the archival pipeline.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The caller did not supply a URL.
    #[error("URL is required as a query parameter.")]
    Input,

    /// The origin could not be reached or refused the request
    /// (DNS, connect, TLS, timeout, or non-success status).
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// The response body is larger than the configured ceiling.
    #[error("content length {length} exceeds the limit of {limit} bytes")]
    SizeLimit { length: u64, limit: u64 },

    /// Writing an artifact failed, or the browser could not produce
    /// one (PDF or screenshot generation).
    #[error("save failed: {0}")]
    Save(String),

    /// The shared browser did not start. Raised once, before serving.
    #[error("browser failed to start: {0}")]
    BrowserInit(String),
}

impl ArchiveError {
    /// Wrap an I/O error from an artifact write.
    pub fn save(context: &str, err: impl std::fmt::Display) -> Self {
        ArchiveError::Save(format!("{context}: {err}"))
    }
}
