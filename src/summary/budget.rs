//! Output size check for length-limited targets such as PR comments

use serde::Serialize;

/// Default maximum comment length accepted by GitHub
pub const DEFAULT_CHAR_LIMIT: usize = 65536;

/// Result of measuring rendered output against a character limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LimitCheck {
    /// Length of the rendered text in characters
    pub length: usize,

    /// Configured limit
    pub limit: usize,

    /// Whether the text is longer than the limit
    pub exceeded: bool,
}

impl LimitCheck {
    /// Lines of the advisory warning, empty when within the limit
    pub fn warning_lines(&self) -> Vec<String> {
        if !self.exceeded {
            return Vec::new();
        }

        vec![
            format!(
                "Output is {} characters, over the {} character limit",
                self.length, self.limit
            ),
            "The comment may be rejected or truncated by the target".to_string(),
            "Use --short for a compact listing".to_string(),
        ]
    }
}

/// Measure rendered text against a limit. The text itself is never altered.
pub fn check_limit(rendered: &str, limit: usize) -> LimitCheck {
    let length = rendered.chars().count();
    LimitCheck {
        length,
        limit,
        exceeded: length > limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_limit() {
        let check = check_limit("short body", DEFAULT_CHAR_LIMIT);
        assert!(!check.exceeded);
        assert_eq!(check.length, 10);
        assert!(check.warning_lines().is_empty());
    }

    #[test]
    fn test_exactly_at_limit_is_not_exceeded() {
        let text = "x".repeat(100);
        assert!(!check_limit(&text, 100).exceeded);
        assert!(check_limit(&text, 99).exceeded);
    }

    #[test]
    fn test_over_default_limit() {
        let text = "a".repeat(70000);
        let check = check_limit(&text, DEFAULT_CHAR_LIMIT);

        assert!(check.exceeded);
        assert_eq!(check.length, 70000);
        assert_eq!(check.limit, 65536);

        let warning = check.warning_lines().join("\n");
        assert!(warning.contains("70000"));
        assert!(warning.contains("65536"));
        assert!(warning.contains("--short"));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let check = check_limit("≤≤≤", 3);
        assert_eq!(check.length, 3);
        assert!(!check.exceeded);
    }
}
