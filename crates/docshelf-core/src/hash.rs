//! Content fingerprints for change detection.
//!
//! A fingerprint is the MD5 digest of the text's UTF-8 bytes rendered as
//! 32 uppercase hex characters. It is used to answer "has this document
//! changed since it was saved", not for authentication.

use md5::{Digest, Md5};

/// Width of a rendered fingerprint in hex characters.
pub const HASH_HEX_LEN: usize = 32;

/// Fingerprint of the empty string.
pub const EMPTY_HASH: &str = "D41D8CD98F00B204E9800998ECF8427E";

/// Compute the uppercase hex MD5 fingerprint of `text`.
pub fn content_hash(text: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(text.as_bytes());
    hex::encode_upper(hasher.finalize())
}

/// True when `text` no longer matches a previously stored fingerprint.
pub fn has_changed(stored_hash: &str, text: &str) -> bool {
    !content_hash(text).eq_ignore_ascii_case(stored_hash)
}
