use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use super::render;
use crate::test_support::{error, output};

#[test]
fn render_replaces_every_token() {
    let dt = NaiveDate::from_ymd_opt(2024, 3, 7)
        .and_then(|d| d.and_hms_opt(9, 5, 2))
        .map(|dt| render(&dt, "YYYY-MM-DD hh:mm:ss (YYYY)"));
    assert_eq!(dt.as_deref(), Some("2024-03-07 09:05:02 (2024)"));
}

#[test]
fn timestamps_round_trip_through_iso() {
    let out = output(
        "import \"datetime\" as dt\n\
         set t call dt.from_timestamp(1700000000123)\n\
         show call dt.get_timestamp(t)\n\
         show call dt.to_iso_string(t)\n\
         show t\n\
         show call type(t)",
    );
    assert_eq!(
        out,
        "1700000000123\n2023-11-14T22:13:20.123Z\ndatetime(2023-11-14T22:13:20.123Z)\ndatetime\n"
    );
}

#[test]
fn datetimes_compare_by_instant() {
    let out = output(
        "import \"datetime\" as dt\n\
         show = call dt.from_timestamp(0) (call dt.from_timestamp(0))",
    );
    assert_eq!(out, "true\n");
}

#[test]
fn now_is_a_datetime() {
    let out = output("import \"datetime\" as dt\nshow > call dt.get_timestamp(call dt.now()) 0");
    assert_eq!(out, "true\n");
}

#[test]
fn argument_errors() {
    let err = error("import \"datetime\" as dt\ncall dt.to_iso_string(5)");
    assert_eq!(err.code, "TYPE001");
    assert_eq!(
        err.message,
        "datetime.to_iso_string() expects a datetime object as its first argument."
    );
    let err = error("import \"datetime\" as dt\ncall dt.from_timestamp(\"x\")");
    assert_eq!(err.code, "TYPE001");
    let err = error("import \"datetime\" as dt\ncall dt.from_timestamp(* 1000000000 1000000000)");
    assert_eq!(err.code, "ARG001");
}
