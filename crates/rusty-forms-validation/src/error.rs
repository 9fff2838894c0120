//! Rule construction errors

use thiserror::Error;

/// Failure to build a rule from its declarative form.
///
/// Evaluating a rule never fails; only turning attribute text into a rule can.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
