//! Rule kinds and the per-field rule table for user payloads.

use std::sync::LazyLock;

use regex::Regex;

use crate::db::Gender;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
        .expect("valid email regex")
});

/// A single validation rule. Lengths are counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Non-empty after trimming whitespace.
    Required,
    MinLen(usize),
    MaxLen(usize),
    ExactLen(usize),
    /// ASCII digits only.
    Numeric,
    Email,
    OneOf(&'static [&'static str]),
}

impl Rule {
    pub fn check(&self, value: &str) -> bool {
        match self {
            Rule::Required => !value.trim().is_empty(),
            Rule::MinLen(min) => value.chars().count() >= *min,
            Rule::MaxLen(max) => value.chars().count() <= *max,
            Rule::ExactLen(len) => value.chars().count() == *len,
            Rule::Numeric => !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()),
            Rule::Email => EMAIL_RE.is_match(value),
            Rule::OneOf(allowed) => allowed.contains(&value),
        }
    }

    pub fn message(&self, field: &str) -> String {
        match self {
            Rule::Required => format!("{} is required", field),
            Rule::MinLen(min) => format!("{} must be at least {} characters", field, min),
            Rule::MaxLen(max) => format!("{} must be at most {} characters", field, max),
            Rule::ExactLen(len) => format!("{} must be exactly {} characters", field, len),
            Rule::Numeric => format!("{} must contain only numbers", field),
            Rule::Email => format!("{} must be a valid email address", field),
            Rule::OneOf(allowed) => format!("{} must be one of: {}", field, allowed.join(" ")),
        }
    }
}

/// The ordered rules that apply to one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: &'static [Rule],
}

impl FieldRules {
    /// First rule `value` fails, if any.
    pub fn first_failure(&self, value: &str) -> Option<&'static Rule> {
        self.rules.iter().find(|rule| !rule.check(value))
    }
}

/// Rules for the create-user payload, keyed by wire field name.
pub const CREATE_USER_RULES: &[FieldRules] = &[
    FieldRules {
        field: "aadhaar_application_id",
        rules: &[Rule::Required, Rule::ExactLen(14)],
    },
    FieldRules {
        field: "name",
        rules: &[Rule::Required, Rule::MinLen(2), Rule::MaxLen(100)],
    },
    FieldRules {
        field: "email",
        rules: &[Rule::Required, Rule::Email],
    },
    FieldRules {
        field: "phone",
        rules: &[Rule::Required, Rule::ExactLen(10), Rule::Numeric],
    },
    FieldRules {
        field: "address",
        rules: &[Rule::Required, Rule::MaxLen(500)],
    },
    FieldRules {
        field: "date_of_birth",
        rules: &[Rule::Required],
    },
    FieldRules {
        field: "gender",
        rules: &[Rule::Required, Rule::OneOf(&Gender::VALUES)],
    },
];
