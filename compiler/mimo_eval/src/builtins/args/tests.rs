#![expect(clippy::unwrap_used, reason = "tests unwrap expected errors")]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

#[test]
fn relative_index_counts_negatives_from_end() {
    assert_eq!(relative_index(1.0, 5), 1);
    assert_eq!(relative_index(-1.0, 5), 4);
    assert_eq!(relative_index(-10.0, 5), 0);
    assert_eq!(relative_index(9.0, 5), 5);
    assert_eq!(relative_index(2.7, 5), 2);
    assert_eq!(relative_index(-1.5, 5), 4);
    assert_eq!(relative_index(f64::NAN, 5), 0);
    assert_eq!(relative_index(f64::NEG_INFINITY, 5), 0);
    assert_eq!(relative_index(f64::INFINITY, 5), 5);
}

#[test]
fn clamp_to_usize_floors_at_zero() {
    assert_eq!(clamp_to_usize(3.9), 3);
    assert_eq!(clamp_to_usize(-2.0), 0);
    assert_eq!(clamp_to_usize(f64::NAN), 0);
}

#[test]
fn optional_skips_null_and_missing() {
    let args = [Value::Number(1.0), Value::Null];
    assert!(optional(&args, 1).is_some());
    assert!(optional(&args, 2).is_none());
    assert!(optional(&args, 3).is_none());
}

#[test]
fn wrong_type_message_names_position() {
    let loc = Location::synthetic("t.mimo");
    let err = expect_number("abs", &Value::from("x"), 1, &loc).unwrap_err();
    assert_eq!(err.code, "TYPE001");
    assert_eq!(err.message, "abs() expects a number as argument 1. Got 'string'.");
    assert_eq!(err.suggestion.as_deref(), Some("Ensure argument 1 for 'abs' is a number."));
}

proptest! {
    #[test]
    fn relative_index_stays_in_bounds(index in -100.0f64..100.0, len in 0usize..50) {
        prop_assert!(relative_index(index, len) <= len);
    }
}
