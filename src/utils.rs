//! Shared utility functions

/// Truncate a string to `max_len` characters, appending an ellipsis when
/// anything was cut
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_short_passes_through() {
        assert_eq!(truncate_str("Quiz", 10), "Quiz");
        assert_eq!(truncate_str("Quiz", 4), "Quiz");
    }

    #[test]
    fn test_truncate_str_long_gets_ellipsis() {
        assert_eq!(truncate_str("Algebra quiz", 8), "Algebra…");
    }

    #[test]
    fn test_truncate_str_counts_chars_not_bytes() {
        assert_eq!(truncate_str("héllo wörld", 11), "héllo wörld");
    }
}
