/// Opening marker of a reasoning block
pub const THINK_OPEN: &str = "<think>";

/// Closing marker of a reasoning block
pub const THINK_CLOSE: &str = "</think>";

/// Drop a `<think>…</think>` preamble from model output
///
/// When both markers are present, everything up to and including the first
/// closing marker is discarded and the remainder is trimmed. Content without
/// a complete block is returned untouched.
pub fn strip_reasoning(content: &str) -> &str {
    if !content.contains(THINK_OPEN) {
        return content;
    }
    match content.split_once(THINK_CLOSE) {
        Some((_, answer)) => answer.trim(),
        None => content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_reasoning() {
        assert_eq!(
            strip_reasoning("<think>ignore this</think>  Actual answer"),
            "Actual answer"
        );
    }

    #[test]
    fn test_multiline_block() {
        let content = "<think>\nstep one\nstep two\n</think>\n\n{\"0-10\": \"Opening\"}\n";
        assert_eq!(strip_reasoning(content), "{\"0-10\": \"Opening\"}");
    }

    #[test]
    fn test_without_block_untouched() {
        assert_eq!(strip_reasoning("  plain answer "), "  plain answer ");
    }

    #[test]
    fn test_unclosed_block_untouched() {
        assert_eq!(strip_reasoning("<think>never closed"), "<think>never closed");
    }

    #[test]
    fn test_closing_marker_alone_untouched() {
        assert_eq!(strip_reasoning("answer</think>"), "answer</think>");
    }
}
