//! Expansion entry point for `#[derive(EnvConfig)]`.

mod crate_path;
mod generate;
mod parse;

use proc_macro2::TokenStream;
use syn::DeriveInput;

/// Parses `input` and generates the `EnvConfig` implementation.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    let krate = crate_path::resolve(parsed.struct_attrs.crate_path.as_ref());
    Ok(generate::env_config_impl(input, &parsed, &krate))
}
