//! Numeric constraint checks

/// Parses field content as a number.
///
/// Surrounding whitespace is ignored. Empty content and anything that is not
/// a finite number yields `None`.
pub fn parse_number(content: &str) -> Option<f64> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Reads the leading integer of `s`, e.g. `5` from `"5px"`.
///
/// Leading whitespace and one sign are accepted; `None` when no digit
/// follows.
pub(crate) fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign = usize::from(s.starts_with(['-', '+']));
    let digits = s[sign..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}

/// Parses a bound attribute such as `min="5"`.
///
/// A full number is taken as is; otherwise its leading integer is used
/// (`"5px"` bounds at 5). Text without one means "no bound".
pub fn parse_bound(attr: &str) -> Option<f64> {
    parse_number(attr).or_else(|| leading_integer(attr).map(|n| n as f64))
}

/// Content holds no value to compare: empty or whitespace only.
fn is_blank(content: &str) -> bool {
    content.trim().is_empty()
}

/// Content satisfies a lower bound (inclusive).
///
/// Blank content has nothing to compare and passes; leave presence to
/// `required`. Other non-numeric content fails.
pub fn is_at_least(content: &str, min: f64) -> bool {
    if is_blank(content) {
        return true;
    }
    match parse_number(content) {
        Some(value) => value >= min,
        None => false,
    }
}

/// Content satisfies an upper bound (inclusive). Same blank rule as
/// [`is_at_least`].
pub fn is_at_most(content: &str, max: f64) -> bool {
    if is_blank(content) {
        return true;
    }
    match parse_number(content) {
        Some(value) => value <= max,
        None => false,
    }
}
