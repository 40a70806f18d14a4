//! Unit tests for value coercion.

use std::time::Duration;

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;

use super::{FieldValue, InvalidBool, parse_bool};

#[rstest]
#[case("1", true)]
#[case("t", true)]
#[case("T", true)]
#[case("TRUE", true)]
#[case("true", true)]
#[case("True", true)]
#[case("0", false)]
#[case("f", false)]
#[case("F", false)]
#[case("FALSE", false)]
#[case("false", false)]
#[case("False", false)]
fn accepts_boolean_spellings(#[case] raw: &str, #[case] expected: bool) {
    assert_eq!(parse_bool(raw), Ok(expected));
}

#[rstest]
#[case("yes")]
#[case("tRuE")]
#[case(" true")]
#[case("")]
fn rejects_other_boolean_spellings(#[case] raw: &str) {
    assert_eq!(parse_bool(raw), Err(InvalidBool(raw.to_owned())));
}

#[test]
fn integers_parse_base_ten() -> Result<()> {
    let mut value = 0_i64;
    value.assign("-42").map_err(|e| anyhow!(e))?;
    ensure!(value == -42, "unexpected value {value}");
    ensure!(value.target_type() == "int", "unexpected label");
    Ok(())
}

#[rstest]
#[case("12a")]
#[case("3.5")]
#[case("99999999999999999999")]
fn invalid_integers_leave_value_unchanged(#[case] raw: &str) {
    let mut value = 7_i64;
    assert!(value.assign(raw).is_err());
    assert_eq!(value, 7);
}

#[test]
fn unsigned_rejects_negative_numbers() {
    let mut value = 0_u16;
    assert!(value.assign("-1").is_err());
    assert_eq!(value.target_type(), "uint");
}

#[test]
fn floats_parse_decimal() -> Result<()> {
    let mut value = 0.0_f64;
    value.assign("2.5").map_err(|e| anyhow!(e))?;
    ensure!(value.to_bits() == 2.5_f64.to_bits(), "unexpected value {value}");
    Ok(())
}

#[rstest]
#[case("30s", Duration::from_secs(30))]
#[case("5m", Duration::from_secs(300))]
#[case("1h 30m", Duration::from_secs(5400))]
#[case("250ms", Duration::from_millis(250))]
fn durations_parse_compound_expressions(
    #[case] raw: &str,
    #[case] expected: Duration,
) -> Result<()> {
    let mut value = Duration::ZERO;
    value.assign(raw).map_err(|e| anyhow!(e))?;
    ensure!(value == expected, "got {value:?}");
    Ok(())
}

#[test]
fn duration_without_unit_fails() {
    let mut value = Duration::ZERO;
    assert!(value.assign("30").is_err());
}

#[test]
fn string_sequences_trim_each_element() -> Result<()> {
    let mut value: Vec<String> = Vec::new();
    value.assign("first, second ,third").map_err(|e| anyhow!(e))?;
    ensure!(value == ["first", "second", "third"], "got {value:?}");
    Ok(())
}

#[test]
fn string_sequences_keep_empty_elements() -> Result<()> {
    let mut value: Vec<String> = Vec::new();
    value.assign("a,,b").map_err(|e| anyhow!(e))?;
    ensure!(value == ["a", "", "b"], "got {value:?}");
    Ok(())
}

#[test]
fn integer_sequences_parse_in_order() -> Result<()> {
    let mut value: Vec<i32> = Vec::new();
    value.assign("1, 2, 3").map_err(|e| anyhow!(e))?;
    ensure!(value == [1, 2, 3], "got {value:?}");
    ensure!(value.target_type() == "[]int", "unexpected label");
    Ok(())
}

#[rstest]
#[case("1,,3")]
#[case("1, x, 3")]
fn bad_sequence_elements_abort_the_field(#[case] raw: &str) {
    let mut value: Vec<i64> = vec![9];
    assert!(value.assign(raw).is_err());
    assert_eq!(value, [9]);
}

#[test]
fn float_sequences_use_float_label() -> Result<()> {
    let mut value: Vec<f64> = Vec::new();
    value.assign("0.5, 1.25").map_err(|e| anyhow!(e))?;
    ensure!(value.len() == 2, "got {value:?}");
    ensure!(value.target_type() == "[]float", "unexpected label");
    Ok(())
}

#[rstest]
#[case(Box::new(String::new()) as Box<dyn FieldValue>, true)]
#[case(Box::new(String::from("x")) as Box<dyn FieldValue>, false)]
#[case(Box::new(0_u8) as Box<dyn FieldValue>, true)]
#[case(Box::new(-1_i32) as Box<dyn FieldValue>, false)]
#[case(Box::new(false) as Box<dyn FieldValue>, true)]
#[case(Box::new(true) as Box<dyn FieldValue>, false)]
#[case(Box::new(0.0_f64) as Box<dyn FieldValue>, true)]
#[case(Box::new(-0.0_f64) as Box<dyn FieldValue>, false)]
#[case(Box::new(Duration::ZERO) as Box<dyn FieldValue>, true)]
#[case(Box::new(Vec::<String>::new()) as Box<dyn FieldValue>, true)]
#[case(Box::new(vec![1_u32]) as Box<dyn FieldValue>, false)]
fn reports_zero_values(#[case] value: Box<dyn FieldValue>, #[case] expected: bool) {
    assert_eq!(value.is_zero(), expected);
}
