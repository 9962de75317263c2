/// Default token count a line must exceed before a context snippet is produced.
pub const DEFAULT_MIN_TOKENS: usize = 10;
/// Default number of trailing tokens kept in the snippet.
pub const DEFAULT_TAIL_TOKENS: usize = 5;

/// Trailing context snippet for display, using the default thresholds.
pub fn extract_context(line: &str) -> Option<String> {
    extract_context_with(line, DEFAULT_MIN_TOKENS, DEFAULT_TAIL_TOKENS)
}

/// Returns the last `tail_tokens` whitespace-separated tokens re-joined with
/// single spaces, or `None` when the line has `min_tokens` tokens or fewer.
/// A zero tail never yields an empty snippet.
pub fn extract_context_with(line: &str, min_tokens: usize, tail_tokens: usize) -> Option<String> {
    if tail_tokens == 0 {
        return None;
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() <= min_tokens {
        return None;
    }

    let start = tokens.len().saturating_sub(tail_tokens);
    Some(tokens[start..].join(" "))
}
