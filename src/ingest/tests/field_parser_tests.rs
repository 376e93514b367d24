//! Tests for lenient field parsing

use super::super::field_parsers::{parse_float, parse_int};

#[test]
fn test_parse_float_values() {
    assert_eq!(parse_float("12.5"), 12.5);
    assert_eq!(parse_float(" -3.25 "), -3.25);
    assert_eq!(parse_float("7"), 7.0);
    assert_eq!(parse_float("+7"), 7.0);
    assert_eq!(parse_float("1e3"), 1000.0);
    assert_eq!(parse_float("2.5E-1"), 0.25);
    assert_eq!(parse_float(".5"), 0.5);
    assert_eq!(parse_float("5."), 5.0);
}

#[test]
fn test_parse_float_leading_number() {
    assert_eq!(parse_float("18.4km"), 18.4);
    assert_eq!(parse_float("12.5.3"), 12.5);
    assert_eq!(parse_float("3e"), 3.0);
    assert_eq!(parse_float("3e+"), 3.0);
    assert_eq!(parse_float("52.37\u{0}"), 52.37);
}

#[test]
fn test_parse_float_infinity() {
    assert_eq!(parse_float("Infinity"), f64::INFINITY);
    assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
    assert!(parse_float("inf").is_nan());
}

#[test]
fn test_parse_float_absent() {
    assert!(parse_float("").is_nan());
    assert!(parse_float("   ").is_nan());
    assert!(parse_float("abc").is_nan());
    assert!(parse_float("-").is_nan());
    assert!(parse_float(".").is_nan());
    assert!(parse_float("NaN").is_nan());
    assert!(parse_float("km18").is_nan());
}

#[test]
fn test_parse_int_values() {
    assert_eq!(parse_int("42"), Some(42));
    assert_eq!(parse_int(" -7 "), Some(-7));
    assert_eq!(parse_int("12.0"), Some(12));
    assert_eq!(parse_int("12.9"), Some(12));
    assert_eq!(parse_int("-3.9"), Some(-3));
    assert_eq!(parse_int("1e3"), Some(1));
    assert_eq!(parse_int("3rd"), Some(3));
}

#[test]
fn test_parse_int_absent() {
    assert_eq!(parse_int(""), None);
    assert_eq!(parse_int("x1"), None);
    assert_eq!(parse_int("-"), None);
    assert_eq!(parse_int(".5"), None);
    assert_eq!(parse_int("NaN"), None);
    assert_eq!(parse_int("inf"), None);
    assert_eq!(parse_int("99999999999999999999"), None);
}
