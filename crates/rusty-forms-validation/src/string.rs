//! String constraint checks
//!
//! Lengths are counted in characters, not bytes.

use crate::numeric::leading_integer;

/// Number of characters in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Content is present (non-empty). Whitespace counts as content.
pub fn is_present(s: &str) -> bool {
    !s.is_empty()
}

pub fn has_min_length(s: &str, min: usize) -> bool {
    char_len(s) >= min
}

pub fn has_max_length(s: &str, max: usize) -> bool {
    char_len(s) <= max
}

/// Parses a length bound attribute such as `minStrLength="3"`.
///
/// The leading integer counts (`"3 chars"` is 3). Text without one, or a
/// negative value, means "no bound".
pub fn parse_length_bound(attr: &str) -> Option<usize> {
    leading_integer(attr).and_then(|n| usize::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_validators() {
        assert!(has_min_length("hello", 3));
        assert!(!has_min_length("hi", 3));

        assert!(has_max_length("hello", 10));
        assert!(!has_max_length("verylongstring", 5));
    }

    #[test]
    fn test_lengths_count_characters() {
        assert_eq!(char_len("äöü"), 3);
        assert!(has_max_length("äöü", 3));
    }

    #[test]
    fn test_presence() {
        assert!(is_present("x"));
        assert!(is_present(" "));
        assert!(!is_present(""));
    }

    #[test]
    fn test_parse_length_bound() {
        assert_eq!(parse_length_bound("8"), Some(8));
        assert_eq!(parse_length_bound(" 2 "), Some(2));
        assert_eq!(parse_length_bound("3 chars"), Some(3));
        assert_eq!(parse_length_bound("-1"), None);
        assert_eq!(parse_length_bound("many"), None);
    }
}
