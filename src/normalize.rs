//! URL normalization.
//!
//! Strips known tracking query parameters to produce the canonical form
//! that feeds the content addressor. Normalization is best-effort, not
//! validating: an unparseable input passes through unchanged and
//! reachability is left to the fetch/render session.

use url::Url;

/// Query parameters that never affect page content.
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "gclid",
    "dclid",
    "fbclid",
    "msclkid",
    "yclid",
];

/// Canonicalize a raw URL by removing tracking parameters.
///
/// Deterministic and idempotent. On parse failure the input is returned
/// as-is.
pub fn normalize_url(raw: &str) -> String {
    let mut parsed = match Url::parse(raw) {
        Ok(u) => u,
        Err(_) => return raw.to_string(),
    };

    if parsed.query().is_some() {
        let kept: Vec<(String, String)> = parsed
            .query_pairs()
            .filter(|(k, _)| !TRACKING_PARAMS.contains(&k.as_ref()))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        if kept.is_empty() {
            parsed.set_query(None);
        } else {
            parsed.query_pairs_mut().clear().extend_pairs(kept);
        }
    }

    parsed.to_string()
}
