//! Declarative rule set for a single field

use std::fmt;

use serde::Serialize;

use crate::email::is_valid_email;
use crate::error::RuleError;
use crate::numeric::{is_at_least, is_at_most};
use crate::pattern::Pattern;
use crate::string::{has_max_length, has_min_length, is_present};

/// One kind of constraint a field may declare.
///
/// Variants are listed in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Constraint {
    Required,
    Pattern,
    Min,
    Max,
    MinLength,
    MaxLength,
    Email,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Constraint::Required => "required",
            Constraint::Pattern => "pattern",
            Constraint::Min => "min",
            Constraint::Max => "max",
            Constraint::MinLength => "minLength",
            Constraint::MaxLength => "maxLength",
            Constraint::Email => "email",
        };
        f.write_str(name)
    }
}

/// The constraints declared on a field.
///
/// Absent bounds are `None`, meaning "no constraint", never zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldRules {
    pub required: bool,
    pub pattern: Option<Pattern>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub email: bool,
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn pattern(mut self, source: &str) -> Result<Self, RuleError> {
        self.pattern = Some(Pattern::new(source)?);
        Ok(self)
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    /// Declared constraints, in evaluation order.
    pub fn constraints(&self) -> Vec<Constraint> {
        let mut declared = Vec::new();
        if self.required {
            declared.push(Constraint::Required);
        }
        if self.pattern.is_some() {
            declared.push(Constraint::Pattern);
        }
        if self.min.is_some() {
            declared.push(Constraint::Min);
        }
        if self.max.is_some() {
            declared.push(Constraint::Max);
        }
        if self.min_length.is_some() {
            declared.push(Constraint::MinLength);
        }
        if self.max_length.is_some() {
            declared.push(Constraint::MaxLength);
        }
        if self.email {
            declared.push(Constraint::Email);
        }
        declared
    }

    /// Checks a single constraint. Undeclared constraints always pass.
    pub fn check(&self, constraint: Constraint, content: &str) -> bool {
        match constraint {
            Constraint::Required => !self.required || is_present(content),
            Constraint::Pattern => self.pattern.as_ref().map_or(true, |p| p.is_match(content)),
            Constraint::Min => self.min.map_or(true, |min| is_at_least(content, min)),
            Constraint::Max => self.max.map_or(true, |max| is_at_most(content, max)),
            Constraint::MinLength => self
                .min_length
                .map_or(true, |min| has_min_length(content, min)),
            Constraint::MaxLength => self
                .max_length
                .map_or(true, |max| has_max_length(content, max)),
            Constraint::Email => !self.email || is_valid_email(content),
        }
    }

    /// True when every declared constraint holds for `content`.
    pub fn evaluate(&self, content: &str) -> bool {
        self.constraints()
            .into_iter()
            .all(|constraint| self.check(constraint, content))
    }

    /// Declared constraints that `content` violates, in evaluation order.
    pub fn failures(&self, content: &str) -> Vec<Constraint> {
        self.constraints()
            .into_iter()
            .filter(|constraint| !self.check(*constraint, content))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints().is_empty()
    }
}
