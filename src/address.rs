//! Content addressing.
//!
//! The normalized URL is hashed to a stable identifier used as both the
//! storage directory name and the filename stem of every artifact.

use sha1::{Digest, Sha1};

/// SHA-1 digest of the normalized URL, rendered as lowercase hex.
pub fn content_hash(normalized_url: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(normalized_url.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let a = content_hash("https://example.com/");
        let b = content_hash("https://example.com/");
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_urls_distinct_hashes() {
        let a = content_hash("https://example.com/a");
        let b = content_hash("https://example.com/b");
        assert_ne!(a, b);
    }

    #[test]
    fn test_lowercase_hex_160_bits() {
        let h = content_hash("https://example.com/");
        assert_eq!(h.len(), 40);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
