//! Storage key generation.
//!
//! Keys are globally unique per attempt: a millisecond timestamp plus a
//! random suffix means two concurrent uploads of the same title/style can
//! never collide, and a caller retrying an upload always writes to a
//! fresh address.

use rand::distr::{Alphanumeric, SampleString};

/// Key prefix for all artwork content.
const KEY_PREFIX: &str = "art";

/// Length of the random uniqueness suffix.
const SUFFIX_LEN: usize = 6;

/// Build a fresh storage key: `art/{millis}-{suffix}-{descriptor}.{ext}`.
///
/// `descriptor` names the content within the artwork, e.g. `orig` or
/// `1024.png`'s `1024` tier.
pub fn storage_key(descriptor: &str, extension: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = Alphanumeric
        .sample_string(&mut rand::rng(), SUFFIX_LEN)
        .to_lowercase();
    format!("{KEY_PREFIX}/{millis}-{suffix}-{descriptor}.{extension}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_has_prefix_descriptor_and_extension() {
        let key = storage_key("orig", "png");
        assert!(key.starts_with("art/"));
        assert!(key.ends_with("-orig.png"));
    }

    #[test]
    fn keys_are_unique_per_call() {
        // Same descriptor, same instant: the random suffix still has to
        // differ.
        let a = storage_key("1024", "webp");
        let b = storage_key("1024", "webp");
        assert_ne!(a, b);
    }

    #[test]
    fn suffix_is_lowercase_alphanumeric() {
        let key = storage_key("orig", "png");
        let middle = key
            .strip_prefix("art/")
            .and_then(|k| k.strip_suffix("-orig.png"))
            .unwrap();
        let (_millis, suffix) = middle.split_once('-').unwrap();
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}
