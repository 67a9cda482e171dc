//! Tests for domain models.

use std::str::FromStr;

use crate::db::{Gender, UniqueField};

#[test]
fn gender_round_trips_through_strings() {
    for value in Gender::VALUES {
        let gender = Gender::from_str(value).expect("listed value should parse");
        assert_eq!(gender.to_string(), value);
    }
}

#[test]
fn gender_rejects_unknown_and_mixed_case_values() {
    assert!(Gender::from_str("unknown").is_err());
    assert!(Gender::from_str("Female").is_err());
    assert!(Gender::from_str("").is_err());
}

#[test]
fn gender_serializes_lowercase() {
    let json = serde_json::to_string(&Gender::Female).unwrap();
    assert_eq!(json, "\"female\"");
}

#[test]
fn unique_field_maps_to_column_names() {
    assert_eq!(UniqueField::Email.column(), "email");
    assert_eq!(UniqueField::ApplicationId.column(), "aadhaar_application_id");
}
