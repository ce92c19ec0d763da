use sha2::{Digest, Sha256};

use crate::types::FactKind;

/// Compute SHA-256 hash of bytes, returning lowercase hex string.
fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Dedup key for a fact: `sha256("<kind>\0<text>")`.
///
/// Depends only on the kind and the text, so the same fact yields the same
/// key no matter where in the log it was found or which process computed it.
pub fn fingerprint(kind: FactKind, text: &str) -> String {
    let tag = kind.tag();
    let mut buf = Vec::with_capacity(tag.len() + 1 + text.len());
    buf.extend_from_slice(tag.as_bytes());
    buf.push(0);
    buf.extend_from_slice(text.as_bytes());
    sha256_hex(&buf)
}
