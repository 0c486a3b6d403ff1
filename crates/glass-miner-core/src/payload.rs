//! Slicing the answer out of a raw model generation.
//!
//! Thinking-mode models emit a reasoning preamble terminated by a literal
//! `</think>` marker, followed by the answer. The answer itself embeds the
//! JSON payload somewhere in free-form prose. Both slicing steps must be
//! total: arbitrary (possibly truncated) generations never panic here.

/// Marker terminating the reasoning preamble.
pub const REASONING_END: &str = "</think>";

/// Return the answer portion of a generation.
///
/// Everything after the first `</think>` marker. When the marker is absent
/// the entire generation is treated as the answer.
pub fn strip_reasoning(generation: &str) -> &str {
    match generation.find(REASONING_END) {
        Some(idx) => &generation[idx + REASONING_END.len()..],
        None => generation,
    }
}

/// Locate the brace-bounded candidate payload within an answer.
///
/// The span from the first `{` to the last `}`, inclusive. Returns `None`
/// when no opening brace exists or the braces are out of order (a degenerate
/// span); the caller decides whether that is an error.
pub fn find_payload(answer: &str) -> Option<&str> {
    let start = answer.find('{')?;
    let end = answer.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&answer[start..=end])
}
