//! HTTP fetch half of the fetch/render session.
//!
//! A shared reqwest client issues the request and exposes the response
//! headers before any of the body is read, so the size guard can abort a
//! session without touching the body. Raw bodies are read with a
//! streaming byte-count cutoff: an origin that lies about (or omits)
//! `content-length` still cannot exceed the ceiling.

use crate::error::ArchiveError;
use std::time::Duration;

const USER_AGENT: &str = concat!("pagevault/", env!("CARGO_PKG_VERSION"));

/// Response metadata available before the body is read.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    pub status: u16,
    pub content_type: String,
    pub content_length: Option<u64>,
}

/// An in-flight response: headers inspected, body not yet read.
#[derive(Debug)]
pub struct FetchedResponse {
    pub meta: ResponseMeta,
    response: reqwest::Response,
}

impl FetchedResponse {
    /// Read the full body, failing with `SizeLimit` as soon as more than
    /// `limit` bytes have arrived.
    pub async fn body_limited(mut self, limit: u64) -> Result<Vec<u8>, ArchiveError> {
        let mut body = Vec::with_capacity(
            self.meta.content_length.unwrap_or(0).min(limit) as usize,
        );
        while let Some(chunk) = self
            .response
            .chunk()
            .await
            .map_err(|e| ArchiveError::Navigation(format!("body read failed: {e}")))?
        {
            if body.len() as u64 + chunk.len() as u64 > limit {
                return Err(ArchiveError::SizeLimit {
                    length: body.len() as u64 + chunk.len() as u64,
                    limit,
                });
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

/// Shared HTTP client for header probes and raw-body downloads.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    /// Build a fetcher with the given per-request timeout.
    pub fn new(timeout_ms: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }

    /// Issue the GET and return once headers are available.
    ///
    /// DNS, connect, TLS, and timeout errors, as well as non-success
    /// status codes, surface as `Navigation`.
    pub async fn fetch(&self, url: &str) -> Result<FetchedResponse, ArchiveError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ArchiveError::Navigation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArchiveError::Navigation(format!(
                "{url} responded with status {status}"
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let content_length = response.content_length();

        Ok(FetchedResponse {
            meta: ResponseMeta {
                status: status.as_u16(),
                content_type,
                content_length,
            },
            response,
        })
    }
}
