//! Unit tests for the population engine using hand-written descriptors.

use std::time::Duration;

use anyhow::{Result, ensure};
use rstest::rstest;
use serde::Deserialize;

use super::populate;
use crate::descriptor::{EnvConfig, FieldDescriptor, FieldKind, FieldTags};
use crate::{EnvConfigError, SourceMap};

#[derive(Debug, Default, PartialEq, Eq)]
struct Leaf {
    value: String,
}

impl EnvConfig for Leaf {
    fn fields() -> Vec<FieldDescriptor<Self>> {
        vec![FieldDescriptor::new(
            "value",
            FieldTags {
                key: Some("D"),
                ..FieldTags::default()
            },
            FieldKind::<Self>::Value(|leaf| &mut leaf.value),
        )]
    }
}

#[derive(Debug, Default)]
struct Middle {
    leaf: Leaf,
}

impl EnvConfig for Middle {
    fn fields() -> Vec<FieldDescriptor<Self>> {
        vec![FieldDescriptor::new(
            "leaf",
            FieldTags {
                prefix: Some("C_"),
                ..FieldTags::default()
            },
            FieldKind::<Self>::Nested(|middle| &mut middle.leaf),
        )]
    }
}

#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
struct Limits {
    max: u32,
}

#[derive(Debug, Default)]
struct Service {
    host: String,
    port: u16,
    debug: bool,
    timeout: Duration,
    tags: Vec<String>,
    middle: Middle,
    limits: Limits,
    retries: u8,
}

impl EnvConfig for Service {
    fn fields() -> Vec<FieldDescriptor<Self>> {
        vec![
            FieldDescriptor::new(
                "host",
                FieldTags {
                    key: Some("HOST"),
                    default: Some("localhost"),
                    ..FieldTags::default()
                },
                FieldKind::<Self>::Value(|s| &mut s.host),
            ),
            FieldDescriptor::new(
                "port",
                FieldTags {
                    key: Some("PORT"),
                    required: Some("true"),
                    ..FieldTags::default()
                },
                FieldKind::<Self>::Value(|s| &mut s.port),
            ),
            FieldDescriptor::new(
                "debug",
                FieldTags {
                    key: Some("DEBUG"),
                    ..FieldTags::default()
                },
                FieldKind::<Self>::Value(|s| &mut s.debug),
            ),
            FieldDescriptor::new(
                "timeout",
                FieldTags {
                    key: Some("TIMEOUT"),
                    default: Some("30s"),
                    ..FieldTags::default()
                },
                FieldKind::<Self>::Value(|s| &mut s.timeout),
            ),
            FieldDescriptor::new(
                "tags",
                FieldTags {
                    key: Some("TAGS"),
                    ..FieldTags::default()
                },
                FieldKind::<Self>::Value(|s| &mut s.tags),
            ),
            FieldDescriptor::new(
                "middle",
                FieldTags {
                    prefix: Some("B_"),
                    ..FieldTags::default()
                },
                FieldKind::<Self>::Nested(|s| &mut s.middle),
            ),
            FieldDescriptor::new(
                "limits",
                FieldTags {
                    json_key: Some("LIMITS"),
                    ..FieldTags::default()
                },
                FieldKind::<Self>::Json(|s| &mut s.limits),
            ),
            FieldDescriptor::new(
                "retries",
                FieldTags {
                    key: Some("RETRIES"),
                    ..FieldTags::default()
                },
                FieldKind::<Self>::Custom {
                    target: "retry count",
                    is_zero: |s| s.retries == 0,
                    decode: |s, raw| {
                        s.retries = raw.parse::<u8>()?;
                        Ok(())
                    },
                },
            ),
        ]
    }
}

fn mapping(entries: &[(&str, &str)]) -> SourceMap {
    entries.iter().copied().collect()
}

#[test]
fn fills_every_kind_of_field() -> Result<()> {
    let map = mapping(&[
        ("PORT", "8080"),
        ("DEBUG", "true"),
        ("TAGS", "a, b"),
        ("B_C_D", "deep"),
        ("LIMITS", r#"{"max": 5}"#),
        ("RETRIES", "3"),
    ]);
    let mut service = Service::default();
    populate(&mut service, &map, "")?;
    ensure!(service.host == "localhost", "default not applied");
    ensure!(service.port == 8080, "port not parsed");
    ensure!(service.debug, "debug not parsed");
    ensure!(service.timeout == Duration::from_secs(30), "timeout default not parsed");
    ensure!(service.tags == ["a", "b"], "tags not split");
    ensure!(service.middle.leaf.value == "deep", "nested value missing");
    ensure!(service.limits == Limits { max: 5 }, "json not decoded");
    ensure!(service.retries == 3, "custom decoder not applied");
    Ok(())
}

#[rstest]
#[case("", "B_C_D")]
#[case("A_", "A_B_C_D")]
fn nested_prefixes_compose(#[case] root: &str, #[case] key: &str) -> Result<()> {
    let port_key = format!("{root}PORT");
    let map = mapping(&[(port_key.as_str(), "1"), (key, "found")]);
    let mut service = Service::default();
    populate(&mut service, &map, root)?;
    ensure!(service.middle.leaf.value == "found", "lookup under {key} failed");
    Ok(())
}

#[test]
fn pre_set_values_are_kept() -> Result<()> {
    let map = mapping(&[
        ("HOST", "from-map"),
        ("PORT", "1"),
        ("LIMITS", r#"{"max": 1}"#),
        ("RETRIES", "1"),
    ]);
    let mut service = Service {
        host: "seeded".to_owned(),
        limits: Limits { max: 99 },
        retries: 9,
        ..Service::default()
    };
    populate(&mut service, &map, "")?;
    ensure!(service.host == "seeded", "pre-set value overwritten");
    ensure!(service.limits == Limits { max: 99 }, "pre-set JSON field overwritten");
    ensure!(service.retries == 9, "pre-set custom field overwritten");
    ensure!(service.port == 1, "unset field not filled");
    Ok(())
}

#[test]
fn custom_decoder_errors_are_conversion_errors() {
    let map = mapping(&[("PORT", "1"), ("RETRIES", "many")]);
    let mut service = Service::default();
    let err = populate(&mut service, &map, "").expect_err("invalid retry count");
    assert!(matches!(
        err,
        EnvConfigError::FieldConversion {
            field: "retries",
            target_type: "retry count",
            ..
        }
    ));
}

#[test]
fn missing_required_field_stops_after_earlier_fields() {
    let map = mapping(&[("DEBUG", "true")]);
    let mut service = Service::default();
    let err = populate(&mut service, &map, "").expect_err("port is required");
    match err {
        EnvConfigError::RequiredField { field, key } => {
            assert_eq!(field, "port");
            assert_eq!(key, "PORT");
        }
        other => panic!("expected required field error, got {other:?}"),
    }
    assert_eq!(service.host, "localhost");
    assert!(!service.debug, "fields after the failure must stay unset");
}

#[test]
fn empty_value_counts_as_missing() {
    let map = mapping(&[("PORT", "")]);
    let mut service = Service::default();
    let err = populate(&mut service, &map, "").expect_err("empty port is missing");
    assert!(matches!(err, EnvConfigError::RequiredField { .. }));
}

#[test]
fn conversion_errors_name_field_key_and_type() {
    let map = mapping(&[("PORT", "eighty")]);
    let mut service = Service::default();
    match populate(&mut service, &map, "") {
        Err(EnvConfigError::FieldConversion {
            field,
            key,
            target_type,
            ..
        }) => {
            assert_eq!(field, "port");
            assert_eq!(key, "PORT");
            assert_eq!(target_type, "uint");
        }
        other => panic!("expected conversion error, got {other:?}"),
    }
}

#[test]
fn values_are_interpolated_against_the_mapping() -> Result<()> {
    let map = mapping(&[("PORT", "1"), ("DNS", "example.com"), ("HOST", "api.${DNS}")]);
    let mut service = Service::default();
    populate(&mut service, &map, "")?;
    ensure!(service.host == "api.example.com", "got {}", service.host);
    Ok(())
}

#[test]
fn missing_placeholder_names_the_field_and_key() {
    let map = mapping(&[("APP_PORT", "1"), ("APP_HOST", "api.${DNS}")]);
    let mut service = Service::default();
    match populate(&mut service, &map, "APP_") {
        Err(EnvConfigError::FieldReplacement {
            field,
            key,
            variable,
        }) => {
            assert_eq!(field, "host");
            assert_eq!(key, "APP_HOST");
            assert_eq!(variable, "DNS");
        }
        other => panic!("expected replacement error, got {other:?}"),
    }
}

#[test]
fn invalid_json_is_reported() {
    let map = mapping(&[("PORT", "1"), ("LIMITS", "{not json")]);
    let mut service = Service::default();
    let err = populate(&mut service, &map, "").expect_err("invalid json must fail");
    assert!(matches!(err, EnvConfigError::JsonDecode { field: "limits", .. }));
}

#[derive(Debug, Default)]
struct Unprefixed {
    leaf: Leaf,
}

impl EnvConfig for Unprefixed {
    fn fields() -> Vec<FieldDescriptor<Self>> {
        vec![FieldDescriptor::new(
            "leaf",
            FieldTags::default(),
            FieldKind::<Self>::Nested(|u| &mut u.leaf),
        )]
    }
}

#[test]
fn nested_record_without_prefix_fails_structurally() {
    let mut record = Unprefixed::default();
    let err = populate(&mut record, &SourceMap::new(), "").expect_err("prefix is mandatory");
    assert!(matches!(err, EnvConfigError::PrefixOption { field: "leaf" }));
}

#[derive(Debug, Default)]
struct BadOption {
    name: String,
}

impl EnvConfig for BadOption {
    fn fields() -> Vec<FieldDescriptor<Self>> {
        vec![FieldDescriptor::new(
            "name",
            FieldTags {
                key: Some("NAME"),
                required: Some("maybe"),
                ..FieldTags::default()
            },
            FieldKind::<Self>::Value(|b| &mut b.name),
        )]
    }
}

#[test]
fn unparsable_required_option_is_reported() {
    let mut record = BadOption::default();
    let err = populate(&mut record, &SourceMap::new(), "").expect_err("bad option");
    assert!(matches!(
        err,
        EnvConfigError::InvalidOptionConversion {
            field: "name",
            option: "required",
            ..
        }
    ));
}

#[test]
fn unparsable_required_option_is_ignored_when_value_present() -> Result<()> {
    let mut record = BadOption::default();
    populate(&mut record, &mapping(&[("NAME", "x")]), "")?;
    ensure!(record.name == "x", "value not applied");
    Ok(())
}

#[derive(Debug, Default)]
struct Unsupported;

impl EnvConfig for Unsupported {
    fn fields() -> Vec<FieldDescriptor<Self>> {
        vec![FieldDescriptor::new(
            "channel",
            FieldTags {
                key: Some("CHANNEL"),
                ..FieldTags::default()
            },
            FieldKind::<Self>::Unsupported("std::sync::mpsc::Sender<u8>"),
        )]
    }
}

#[test]
fn unsupported_types_fail_even_without_data() {
    let err = populate(&mut Unsupported, &SourceMap::new(), "").expect_err("unsupported");
    assert!(matches!(
        err,
        EnvConfigError::UnsupportedFieldType {
            field: "channel",
            type_name: "std::sync::mpsc::Sender<u8>",
        }
    ));
}
