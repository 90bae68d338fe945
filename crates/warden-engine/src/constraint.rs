//! # Constraint Rules
//!
//! Declarative, serde-tagged rules with fixed message texts. A rule is
//! a predicate over a `serde_json::Value` plus a message template; rules
//! are immutable once registered.
//!
//! ## Null Semantics
//!
//! Only `not_null` fails on a null (or absent) value. Every other rule
//! passes on null — presence is `not_null`'s job, and combining the two
//! concerns would double-report a single missing value. Rules whose
//! value type does not apply (e.g. `email` on a number) also pass;
//! `digits` is the exception and rejects unparseable strings, since its
//! whole purpose is to gate stringly-typed numeric input.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EngineError;

/// Default upper bound for `length`, matching the conventional
/// "unbounded" declaration (`i32::MAX`).
pub const MAX_LENGTH: u64 = i32::MAX as u64;

fn default_max_length() -> u64 {
    MAX_LENGTH
}

/// A declarative constraint rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Constraint {
    /// The value must be present and non-null.
    NotNull,
    /// The string must be a well-formed email address.
    Email,
    /// The string's character count must lie within `[min, max]`.
    Length {
        /// Minimum length, inclusive.
        #[serde(default)]
        min: u64,
        /// Maximum length, inclusive. Defaults to [`MAX_LENGTH`].
        #[serde(default = "default_max_length")]
        max: u64,
    },
    /// The number must be greater than or equal to `value`.
    Min {
        /// Lower bound, inclusive.
        value: i64,
    },
    /// The number must be less than or equal to `value`.
    Max {
        /// Upper bound, inclusive.
        value: i64,
    },
    /// The value must be numeric with at most `integer` digits before
    /// and `fraction` digits after the decimal point.
    Digits {
        /// Maximum integer digits.
        integer: u32,
        /// Maximum fraction digits.
        fraction: u32,
    },
    /// The string must match the given regex in full.
    Pattern {
        /// Regex source, compiled once at registry build.
        regex: String,
    },
}

/// Email shape check: non-empty local part, `@`, non-empty domain.
/// Deliberately lenient; full address-spec parsing is out of scope.
const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+$";

impl Constraint {
    /// `length` with only a lower bound.
    pub fn length_min(min: u64) -> Self {
        Self::Length {
            min,
            max: MAX_LENGTH,
        }
    }

    /// Stable rule identifier, used for duplicate detection at registry
    /// build time.
    pub fn id(&self) -> &'static str {
        match self {
            Self::NotNull => "not_null",
            Self::Email => "email",
            Self::Length { .. } => "length",
            Self::Min { .. } => "min",
            Self::Max { .. } => "max",
            Self::Digits { .. } => "digits",
            Self::Pattern { .. } => "pattern",
        }
    }

    /// The human-readable message rendered into a violation when this
    /// rule fails. These texts are part of the output contract.
    pub fn message(&self) -> String {
        match self {
            Self::NotNull => "must not be null".to_string(),
            Self::Email => "must be a well-formed email address".to_string(),
            Self::Length { min, max } => {
                format!("length must be between {min} and {max}")
            }
            Self::Min { value } => {
                format!("must be greater than or equal to {value}")
            }
            Self::Max { value } => {
                format!("must be less than or equal to {value}")
            }
            Self::Digits { integer, fraction } => {
                format!("numeric value out of bounds (<{integer} digits>.<{fraction} digits> expected)")
            }
            Self::Pattern { regex } => format!("must match \"{regex}\""),
        }
    }
}

/// A constraint with its regex (if any) pre-compiled.
///
/// Compilation happens exactly once, at registry build; validation calls
/// only ever match.
#[derive(Debug, Clone)]
pub struct CompiledConstraint {
    decl: Constraint,
    pattern: Option<Regex>,
}

impl CompiledConstraint {
    /// Compile a declarative rule, building its regex where one applies.
    pub fn compile(decl: Constraint) -> Result<Self, EngineError> {
        let pattern = match &decl {
            Constraint::Email => Some(Regex::new(EMAIL_PATTERN).map_err(|e| {
                EngineError::InvalidPattern {
                    pattern: EMAIL_PATTERN.to_string(),
                    reason: e.to_string(),
                }
            })?),
            Constraint::Pattern { regex } => {
                // User patterns match in full, so anchor them.
                let anchored = format!("^(?:{regex})$");
                Some(
                    Regex::new(&anchored).map_err(|e| EngineError::InvalidPattern {
                        pattern: regex.clone(),
                        reason: e.to_string(),
                    })?,
                )
            }
            _ => None,
        };
        Ok(Self { decl, pattern })
    }

    /// The declarative rule this was compiled from.
    pub fn decl(&self) -> &Constraint {
        &self.decl
    }

    /// Check whether `value` satisfies this rule.
    pub fn is_satisfied_by(&self, value: &Value) -> bool {
        match (&self.decl, value) {
            (Constraint::NotNull, Value::Null) => false,
            (_, Value::Null) => true,
            (Constraint::NotNull, _) => true,
            (Constraint::Email, Value::String(s)) | (Constraint::Pattern { .. }, Value::String(s)) => {
                match &self.pattern {
                    Some(re) => re.is_match(s),
                    // Unreachable by construction; fail closed.
                    None => false,
                }
            }
            (Constraint::Email | Constraint::Pattern { .. }, _) => true,
            (Constraint::Length { min, max }, Value::String(s)) => {
                let len = s.chars().count() as u64;
                *min <= len && len <= *max
            }
            (Constraint::Length { .. }, _) => true,
            (Constraint::Min { value: bound }, v) => match as_f64(v) {
                Some(n) => n >= *bound as f64,
                None => true,
            },
            (Constraint::Max { value: bound }, v) => match as_f64(v) {
                Some(n) => n <= *bound as f64,
                None => true,
            },
            (Constraint::Digits { integer, fraction }, Value::String(s)) => {
                digits_within(s, *integer, *fraction)
            }
            (Constraint::Digits { integer, fraction }, Value::Number(n)) => {
                digits_within(&n.to_string(), *integer, *fraction)
            }
            (Constraint::Digits { .. }, _) => true,
        }
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    value.as_f64()
}

/// Decimal digit-count check. Unparseable text fails outright: `digits`
/// gates stringly-typed numeric input, so "not a number" is out of
/// bounds by definition. Leading zeros do not count as integer digits.
fn digits_within(text: &str, integer: u32, fraction: u32) -> bool {
    let unsigned = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);
    if unsigned.is_empty() {
        return false;
    }

    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, f),
        None => (unsigned, ""),
    };
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
        || (int_part.is_empty() && frac_part.is_empty())
    {
        return false;
    }

    let int_digits = int_part.trim_start_matches('0').len() as u32;
    let frac_digits = frac_part.len() as u32;
    int_digits <= integer && frac_digits <= fraction
}
