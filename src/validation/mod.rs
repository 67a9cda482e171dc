//! Structural validation of request payloads.
//!
//! Each payload is checked against a declarative table of [`FieldRules`].
//! Rules for a field are evaluated in order and the first failing rule is
//! reported; every field is checked, so one call returns all violations.

mod pagination;
mod rules;


use serde::Serialize;
use utoipa::ToSchema;

pub use pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, normalize_pagination};
pub use rules::{CREATE_USER_RULES, FieldRules, Rule};

/// A single failed rule for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    /// Name of the offending field
    #[schema(example = "phone")]
    pub field: String,
    /// Human-readable description of the violated rule
    #[schema(example = "phone must be exactly 10 characters")]
    pub message: String,
}

/// Evaluate `table` against a payload, reading field values through `value_of`.
pub fn validate<'a, F>(table: &[FieldRules], value_of: F) -> Vec<FieldViolation>
where
    F: Fn(&str) -> &'a str,
{
    table
        .iter()
        .filter_map(|entry| {
            let value = value_of(entry.field);
            entry
                .first_failure(value)
                .map(|rule| FieldViolation {
                    field: entry.field.to_string(),
                    message: rule.message(entry.field),
                })
        })
        .collect()
}
