//! Regex pattern constraint
//!
//! Patterns are compiled once and shared through a process-wide cache, so
//! many fields declaring the same pattern compile it a single time. The
//! cache holds one entry per distinct pattern source and is never evicted.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::RuleError;

static REGEX_CACHE: Lazy<Mutex<HashMap<String, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// A compiled pattern constraint.
///
/// Matching is a search: the pattern may match anywhere in the content unless
/// it anchors itself with `^`/`$`.
#[derive(Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, RuleError> {
        let mut cache = REGEX_CACHE
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(regex) = cache.get(source) {
            return Ok(Self {
                regex: regex.clone(),
            });
        }

        let regex = Regex::new(source).map_err(|source_err| RuleError::InvalidPattern {
            pattern: source.to_string(),
            source: source_err,
        })?;
        cache.insert(source.to_string(), regex.clone());

        Ok(Self { regex })
    }

    pub fn is_match(&self, content: &str) -> bool {
        self.regex.is_match(content)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_semantics() {
        let digits = Pattern::new(r"\d+").unwrap();
        assert!(digits.is_match("abc123"));
        assert!(!digits.is_match("abc"));

        let anchored = Pattern::new(r"^\d+$").unwrap();
        assert!(anchored.is_match("123"));
        assert!(!anchored.is_match("abc123"));
        assert!(!anchored.is_match(""));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Pattern::new("(unclosed").unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn test_cached_patterns_are_equal() {
        let a = Pattern::new("^[a-z]+$").unwrap();
        let b = Pattern::new("^[a-z]+$").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "^[a-z]+$");
    }
}
