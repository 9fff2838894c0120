//! Email shape check

use once_cell::sync::Lazy;
use regex::Regex;

/// Word characters are ASCII only: `[0-9A-Za-z_]`.
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[0-9A-Za-z_]+(?:[.-]?[0-9A-Za-z_]+)*@[0-9A-Za-z_]+(?:[.-]?[0-9A-Za-z_]+)*(?:\.[0-9A-Za-z_]{2,3})+$",
    )
    .expect("email shape pattern compiles")
});

/// Validates that content is email-shaped.
///
/// Checks for:
/// - exactly one `@` with word characters on both sides
/// - dots or hyphens only between word characters
/// - a domain ending in one or more `.xx` / `.xxx` labels
///
/// This is a shape check, not RFC 5322 validation.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}
