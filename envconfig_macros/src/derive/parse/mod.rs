//! Parsing utilities for the `EnvConfig` derive macro.
//!
//! Attributes are read once into [`FieldAttrs`] and then resolved into a
//! [`FieldPlan`], which is what code generation consumes. Structural misuse
//! is reported here as a compile error spanning the offending field.

use heck::ToShoutySnakeCase;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Ident};

mod input;
mod literals;
#[cfg(test)]
mod tests;
mod type_utils;

pub(crate) use input::{ParsedField, ParsedInput, parse_input};
use literals::{lit_str, path_value, required_literal};
pub(crate) use type_utils::is_coercible;

const ATTRIBUTE: &str = "env";

/// Struct-level `#[env(...)]` options.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
}

/// A key written explicitly or derived from the field name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum KeyName {
    Explicit(String),
    Inferred,
}

impl KeyName {
    fn resolve(self, field: &Ident) -> String {
        match self {
            Self::Explicit(key) => key,
            Self::Inferred => field.to_string().to_shouty_snake_case(),
        }
    }
}

/// Raw field-level `#[env(...)]` options.
#[derive(Default, Clone, Debug)]
pub(crate) struct FieldAttrs {
    pub key: Option<KeyName>,
    pub default: Option<String>,
    pub required: Option<String>,
    pub prefix: Option<String>,
    pub nested: bool,
    pub json: Option<KeyName>,
    pub with: Option<syn::Path>,
    pub skip: bool,
}

/// How generated code should treat a field.
#[derive(Clone, Debug)]
pub(crate) enum FieldPlan {
    /// No descriptor is emitted.
    Ignore,
    /// Keyed field filled from a single value.
    Keyed {
        key: String,
        default: Option<String>,
        required: Option<String>,
        with: Option<syn::Path>,
    },
    /// Nested record; `None` is rejected at populate time.
    Nested { prefix: Option<String> },
    /// JSON document stored under `key`.
    Json { key: String },
}

/// Iterate all `#[env(...)]` attributes and apply a callback.
fn parse_env_attrs<F>(attrs: &[Attribute], mut f: F) -> syn::Result<bool>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    let mut seen = false;
    for attr in attrs.iter().filter(|a| a.path().is_ident(ATTRIBUTE)) {
        seen = true;
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(seen)
}

fn set_once<T>(slot: &mut Option<T>, value: T, meta: &ParseNestedMeta, name: &str) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate `{name}` option")));
    }
    *slot = Some(value);
    Ok(())
}

fn optional_key(meta: &ParseNestedMeta, name: &str) -> syn::Result<KeyName> {
    if meta.input.peek(syn::Token![=]) {
        Ok(KeyName::Explicit(lit_str(meta, name)?.value()))
    } else {
        Ok(KeyName::Inferred)
    }
}

/// Parses struct-level attributes.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_env_attrs(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let path = path_value(meta, "crate")?;
            return set_once(&mut out.crate_path, path, meta, "crate");
        }
        Err(meta.error("unknown struct-level env option; expected `crate`"))
    })?;
    Ok(out)
}

/// Parses field-level attributes; `None` when the field has no `#[env]`.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<Option<FieldAttrs>> {
    let mut out = FieldAttrs::default();
    let seen = parse_env_attrs(attrs, |meta| {
        let Some(ident) = meta.path.get_ident().map(ToString::to_string) else {
            return Err(meta.error("expected a single identifier"));
        };
        match ident.as_str() {
            "key" => {
                let key = optional_key(meta, "key")?;
                set_once(&mut out.key, key, meta, "key")
            }
            "default" => {
                let value = lit_str(meta, "default")?.value();
                set_once(&mut out.default, value, meta, "default")
            }
            "required" => {
                let value = required_literal(meta)?;
                set_once(&mut out.required, value, meta, "required")
            }
            "prefix" => {
                let value = lit_str(meta, "prefix")?.value();
                set_once(&mut out.prefix, value, meta, "prefix")
            }
            "json" => {
                let key = optional_key(meta, "json")?;
                set_once(&mut out.json, key, meta, "json")
            }
            "with" => {
                let path = path_value(meta, "with")?;
                set_once(&mut out.with, path, meta, "with")
            }
            "nested" => {
                out.nested = true;
                Ok(())
            }
            "skip" => {
                out.skip = true;
                Ok(())
            }
            other => Err(meta.error(format!(
                "unknown env option `{other}`; expected one of key, default, required, prefix, nested, json, with, skip"
            ))),
        }
    })?;
    Ok(seen.then_some(out))
}

impl FieldAttrs {
    /// Validates the combination of options and resolves inferred keys.
    pub(crate) fn into_plan(self, field: &Ident) -> syn::Result<FieldPlan> {
        let nested = self.nested || self.prefix.is_some();
        let kinds = [self.key.is_some(), nested, self.json.is_some()]
            .into_iter()
            .filter(|set| *set)
            .count();
        if self.skip {
            if kinds > 0 || self.default.is_some() || self.required.is_some() || self.with.is_some() {
                return Err(syn::Error::new_spanned(
                    field,
                    "`skip` cannot be combined with other env options",
                ));
            }
            return Ok(FieldPlan::Ignore);
        }
        if kinds > 1 {
            return Err(syn::Error::new_spanned(
                field,
                "choose only one of `key`, `prefix`/`nested` and `json`",
            ));
        }
        let has_value_options =
            self.default.is_some() || self.required.is_some() || self.with.is_some();
        if let Some(key) = self.key {
            return Ok(FieldPlan::Keyed {
                key: key.resolve(field),
                default: self.default,
                required: self.required,
                with: self.with,
            });
        }
        if has_value_options {
            return Err(syn::Error::new_spanned(
                field,
                "`default`, `required` and `with` need a `key`",
            ));
        }
        if nested {
            return Ok(FieldPlan::Nested {
                prefix: self.prefix,
            });
        }
        if let Some(json) = self.json {
            return Ok(FieldPlan::Json {
                key: json.resolve(field),
            });
        }
        Err(syn::Error::new_spanned(
            field,
            "env attribute needs one of `key`, `prefix`, `nested`, `json` or `skip`",
        ))
    }
}
