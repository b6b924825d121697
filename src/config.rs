//! Runtime configuration.
//!
//! Every knob has a built-in default, a `PAGEVAULT_*` environment
//! override, and (for the ones exposed on the CLI) a flag override
//! applied in `main`.

use std::path::PathBuf;

/// Default listening port for the REST API.
pub const DEFAULT_PORT: u16 = 3000;

/// Default per-file size ceiling (1 GiB).
pub const DEFAULT_MAX_CONTENT_LENGTH: u64 = 1024 * 1024 * 1024;

/// Default number of simultaneous fetch/render/save sessions.
pub const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Default navigation timeout in milliseconds.
pub const DEFAULT_NAV_TIMEOUT_MS: u64 = 30_000;

/// Default end-to-end session timeout in milliseconds. Covers fetch,
/// render, and save so a hung navigation cannot hold a gate slot forever.
pub const DEFAULT_SESSION_TIMEOUT_MS: u64 = 120_000;

/// Pagevault runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the REST API listens on.
    pub port: u16,
    /// Root directory for archived artifacts.
    pub archive_root: PathBuf,
    /// Base URL under which `/files/...` is publicly reachable.
    pub public_base_url: String,
    /// Per-file size ceiling in bytes.
    pub max_content_length: u64,
    /// Capacity of the concurrency gate.
    pub max_concurrent: usize,
    /// Browser navigation timeout in milliseconds.
    pub nav_timeout_ms: u64,
    /// Whole-session timeout in milliseconds.
    pub session_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            archive_root: default_archive_root(),
            public_base_url: format!("http://localhost:{DEFAULT_PORT}"),
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            nav_timeout_ms: DEFAULT_NAV_TIMEOUT_MS,
            session_timeout_ms: DEFAULT_SESSION_TIMEOUT_MS,
        }
    }
}

/// Default archive root: `~/.pagevault/archive`.
fn default_archive_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".pagevault/archive")
}

impl Config {
    /// Build a config from defaults plus `PAGEVAULT_*` environment overrides.
    pub fn from_env() -> Self {
        let mut cfg = Config::default();
        if let Some(port) = env_parse::<u16>("PAGEVAULT_PORT") {
            cfg.port = port;
            cfg.public_base_url = format!("http://localhost:{port}");
        }
        if let Ok(root) = std::env::var("PAGEVAULT_ARCHIVE_DIR") {
            if !root.is_empty() {
                cfg.archive_root = PathBuf::from(root);
            }
        }
        if let Ok(base) = std::env::var("PAGEVAULT_PUBLIC_URL") {
            if !base.is_empty() {
                cfg.public_base_url = base;
            }
        }
        if let Some(max) = env_parse::<u64>("PAGEVAULT_MAX_BYTES") {
            cfg.max_content_length = max;
        }
        if let Some(n) = env_parse::<usize>("PAGEVAULT_CONCURRENCY") {
            cfg.max_concurrent = n.max(1);
        }
        if let Some(ms) = env_parse::<u64>("PAGEVAULT_NAV_TIMEOUT_MS") {
            cfg.nav_timeout_ms = ms;
        }
        if let Some(ms) = env_parse::<u64>("PAGEVAULT_SESSION_TIMEOUT_MS") {
            cfg.session_timeout_ms = ms;
        }
        cfg
    }

    /// Public URL for one artifact file.
    pub fn public_file_url(&self, hash: &str, filename: &str) -> String {
        format!(
            "{}/files/{hash}/{filename}",
            self.public_base_url.trim_end_matches('/')
        )
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok()?.trim().parse().ok()
}
