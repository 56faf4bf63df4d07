//! Bounded text
//!
//! Text fields live in fixed-capacity blocks on disk. One byte of every block
//! is reserved for a NUL terminator, so a field keeps at most
//! `capacity - 1` bytes of text.

use crate::config::TextPolicy;
use crate::error::{Result, SlotError};

/// Longest prefix of `text` that is at most `max` bytes and ends on a char boundary
pub fn truncate_to(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }

    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Fit `text` into a block of `capacity` bytes according to `policy`.
///
/// Returns the text that will be stored. Under `TextPolicy::Reject` oversized
/// input fails with `SlotError::FieldTooLong`.
pub fn bound(field: &'static str, text: &str, capacity: usize, policy: TextPolicy) -> Result<String> {
    let max = capacity.saturating_sub(1);
    if text.len() <= max {
        return Ok(text.to_string());
    }

    match policy {
        TextPolicy::Reject => Err(SlotError::FieldTooLong {
            field,
            len: text.len(),
            max,
        }),
        TextPolicy::Truncate => {
            let kept = truncate_to(text, max);
            tracing::warn!(
                field,
                original = text.len(),
                kept = kept.len(),
                "text truncated to field capacity"
            );
            Ok(kept.to_string())
        }
    }
}
