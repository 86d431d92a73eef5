//! Keyed single-character checksum.
//!
//! The checksum is the first hex digit of `MD5(secret || body)`, upper-cased,
//! the same digit existing Fortifi generators append.
//! One hex digit gives a 1-in-16 chance of accepting a forged ID, so this only
//! makes tampering and wrong-secret mistakes evident. It is not authentication.

use md5::{Digest, Md5};

/// Computes the checksum character for the first 31 characters of an ID.
pub fn checksum(secret: &str, body: &str) -> char {
    let mut hasher = Md5::new();
    hasher.update(secret.as_bytes());
    hasher.update(body.as_bytes());
    let digest = hasher.finalize();

    let encoded = hex::encode(&digest[..1]);
    encoded
        .chars()
        .next()
        .map_or('0', |c| c.to_ascii_uppercase())
}

/// Returns true if `actual` is the checksum of `body` under `secret`.
pub(crate) fn matches(secret: &str, body: &str, actual: char) -> bool {
    checksum(secret, body).eq_ignore_ascii_case(&actual)
}
