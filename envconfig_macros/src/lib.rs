//! Procedural macros for `envconfig`.
//!
//! `#[derive(EnvConfig)]` reads `#[env(...)]` field attributes and emits an
//! `EnvConfig::fields` implementation returning one descriptor per field.
//! Field types are classified here, at expansion time, so the population
//! engine never inspects types at runtime.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `envconfig::EnvConfig`.
///
/// Field attributes:
///
/// | Attribute | Effect |
/// |---|---|
/// | `key = "PORT"` or bare `key` | lookup key; bare `key` uses the field name in `SCREAMING_SNAKE_CASE` |
/// | `default = "8080"` | literal used when the key has no value |
/// | `required`, `required = true`, `required = "false"` | fail when the key has no value and no default |
/// | `prefix = "DB_"` | nested record; every key inside is prefixed |
/// | `nested` | nested record without a prefix, rejected when populated |
/// | `json = "LIMITS"` or bare `json` | decode a JSON document into the field |
/// | `with = path::to::parser` | decode with `fn(&str) -> Result<T, E>` |
/// | `skip` | ignore the field |
///
/// `json` and `with` fields must implement `Default` and `PartialEq`; a field
/// that differs from its default is left untouched, like every other field.
///
/// Fields without `#[env]` are ignored. The struct-level
/// `#[env(crate = "alias")]` attribute points generated code at a renamed
/// dependency.
#[proc_macro_derive(EnvConfig, attributes(env))]
pub fn derive_env_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
