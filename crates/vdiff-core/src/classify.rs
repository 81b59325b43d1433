//! Role classification for raw diff rows
//!
//! Rules are substring tests evaluated in a fixed precedence order; the
//! first rule that matches wins.

use crate::line::LineRole;

/// Shortest `---` row that is still treated as a header. A bare `---`
/// (or `---` plus one byte) is a deleted line, not an old-file header.
const MIN_OLD_HEADER_LEN: usize = 5;

/// Classify a raw row (no line terminator)
pub fn classify(text: &[u8]) -> LineRole {
    if contains(text, b"+++") {
        LineRole::FileHeader
    } else if contains(text, b"---") && text.len() >= MIN_OLD_HEADER_LEN {
        LineRole::FileHeader
    } else if contains(text, b"@@") {
        LineRole::HunkSeparator
    } else if text.contains(&b'+') {
        LineRole::Addition
    } else if text.contains(&b'-') {
        LineRole::Deletion
    } else {
        LineRole::Context
    }
}

pub(crate) fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    find(haystack, needle).is_some()
}

pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
