//! Tests for `#[env(...)]` parsing behaviour.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, parse_quote};

use super::{FieldPlan, parse_input};

fn plans(input: &DeriveInput) -> Result<Vec<FieldPlan>> {
    let parsed = parse_input(input).map_err(|err| anyhow!(err))?;
    Ok(parsed.fields.into_iter().map(|field| field.plan).collect())
}

fn single_plan(input: &DeriveInput) -> Result<FieldPlan> {
    plans(input)?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("missing field plan"))
}

#[test]
fn parses_keyed_field_options() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            #[env(key = "PORT", default = "8080", required = false)]
            port: u16,
        }
    };
    let FieldPlan::Keyed {
        key,
        default,
        required,
        with,
    } = single_plan(&input)?
    else {
        return Err(anyhow!("expected keyed plan"));
    };
    ensure!(key == "PORT", "unexpected key {key}");
    ensure!(default.as_deref() == Some("8080"), "unexpected default");
    ensure!(required.as_deref() == Some("false"), "unexpected required");
    ensure!(with.is_none(), "unexpected decoder");
    Ok(())
}

#[rstest]
#[case(parse_quote! { struct D { #[env(key, required)] listen_port: u16 } }, "LISTEN_PORT", "true")]
#[case(parse_quote! { struct D { #[env(key = "X", required = "maybe")] x: u16 } }, "X", "maybe")]
#[case(parse_quote! { struct D { #[env(key)] #[env(required = true)] apiKey: String } }, "API_KEY", "true")]
fn infers_keys_and_required_literals(
    #[case] input: DeriveInput,
    #[case] expected_key: &str,
    #[case] expected_required: &str,
) -> Result<()> {
    match single_plan(&input)? {
        FieldPlan::Keyed { key, required, .. } => {
            ensure!(key == expected_key, "unexpected key {key}");
            ensure!(
                required.as_deref() == Some(expected_required),
                "unexpected required {required:?}"
            );
            Ok(())
        }
        other => Err(anyhow!("expected keyed plan, got {other:?}")),
    }
}

#[test]
fn parses_nested_json_and_ignored_fields() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            #[env(prefix = "DB_")]
            database: Database,
            #[env(nested)]
            cache: Cache,
            #[env(json)]
            feature_flags: Flags,
            #[env(skip)]
            skipped: String,
            untouched: String,
        }
    };
    let all = plans(&input)?;
    let [database, cache, flags, skipped, untouched] = all.as_slice() else {
        return Err(anyhow!("expected five plans, got {}", all.len()));
    };
    ensure!(
        matches!(database, FieldPlan::Nested { prefix: Some(p) } if p == "DB_"),
        "unexpected database plan {database:?}"
    );
    ensure!(
        matches!(cache, FieldPlan::Nested { prefix: None }),
        "unexpected cache plan {cache:?}"
    );
    ensure!(
        matches!(flags, FieldPlan::Json { key } if key == "FEATURE_FLAGS"),
        "unexpected json plan {flags:?}"
    );
    ensure!(matches!(skipped, FieldPlan::Ignore), "skip not honoured");
    ensure!(matches!(untouched, FieldPlan::Ignore), "untagged field not ignored");
    Ok(())
}

#[test]
fn parses_crate_alias_and_decoder_paths() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[env(crate = "deps::envconfig")]
        struct Demo {
            #[env(key = "ADDR", with = "std::net::IpAddr::from_str")]
            addr: std::net::IpAddr,
            #[env(key = "MODE", with = parse_mode)]
            mode: Mode,
        }
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    let alias = parsed
        .struct_attrs
        .crate_path
        .as_ref()
        .ok_or_else(|| anyhow!("missing crate path"))?;
    ensure!(alias.segments.len() == 2, "unexpected alias");
    for field in &parsed.fields {
        ensure!(
            matches!(&field.plan, FieldPlan::Keyed { with: Some(_), .. }),
            "decoder missing for {}",
            field.ident
        );
    }
    Ok(())
}

#[rstest]
#[case::enum_input(parse_quote! { enum E { A } }, "can only be derived for structs")]
#[case::tuple_struct(parse_quote! { struct T(u8); }, "requires named fields")]
#[case::default_without_key(parse_quote! { struct D { #[env(default = "1")] x: u8 } }, "need a `key`")]
#[case::conflicting_kinds(parse_quote! { struct D { #[env(key = "A", prefix = "B_")] x: u8 } }, "choose only one")]
#[case::skip_with_key(parse_quote! { struct D { #[env(skip, key = "A")] x: u8 } }, "`skip` cannot be combined")]
#[case::unknown_option(parse_quote! { struct D { #[env(colour = "red")] x: u8 } }, "unknown env option `colour`")]
#[case::duplicate_key(parse_quote! { struct D { #[env(key = "A", key = "B")] x: u8 } }, "duplicate `key`")]
#[case::empty_attribute(parse_quote! { struct D { #[env()] x: u8 } }, "needs one of")]
#[case::non_string_default(parse_quote! { struct D { #[env(key = "A", default = 3)] x: u8 } }, "default must be a string")]
#[case::bad_required(parse_quote! { struct D { #[env(key = "A", required = 1)] x: u8 } }, "required must be a boolean or a string")]
#[case::unknown_struct_option(parse_quote! { #[env(prefix = "A_")] struct D { x: u8 } }, "expected `crate`")]
fn rejects_structural_misuse(#[case] input: DeriveInput, #[case] message: &str) -> Result<()> {
    let Err(err) = parse_input(&input) else {
        return Err(anyhow!("expected an error containing {message:?}"));
    };
    ensure!(
        err.to_string().contains(message),
        "error {err} does not mention {message:?}"
    );
    Ok(())
}
