//! Char-safe text helpers shared by the extractor and the composer.
//!
//! Every bound in this workspace counts Unicode scalar values, never bytes,
//! so a cut can never land inside a multi-byte character.

/// Ellipsis appended by [`truncate_ellipsis`].
pub const ELLIPSIS: char = '…';

/// Number of chars in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The first `max_chars` chars of `s`.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Like [`truncate_chars`], but marks a cut with a trailing `…`.
pub fn truncate_ellipsis(s: &str, max_chars: usize) -> String {
    let cut = truncate_chars(s, max_chars);
    if cut.len() < s.len() {
        format!("{cut}{ELLIPSIS}")
    } else {
        s.to_string()
    }
}

/// Last path component; accepts both `/` and `\` separators.
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    match trimmed.rfind(['/', '\\']) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}
