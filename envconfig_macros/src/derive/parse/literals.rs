//! Literal parsing helpers for `#[env(...)]` attributes.

use syn::meta::ParseNestedMeta;
use syn::{Lit, LitStr, Token};

/// Parses a string literal from `key = "..."`.
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    let literal = meta.value()?.parse::<Lit>()?;
    match literal {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(other.span(), format!("{key} must be a string"))),
    }
}

/// Parses a path written as `with = path::to::fn` or `with = "path::to::fn"`.
pub(crate) fn path_value(meta: &ParseNestedMeta, key: &str) -> syn::Result<syn::Path> {
    let stream = meta.value()?;
    if stream.peek(LitStr) {
        let lit: LitStr = stream.parse()?;
        return lit
            .parse::<syn::Path>()
            .map_err(|err| syn::Error::new(lit.span(), format!("{key} must name a path: {err}")));
    }
    stream.parse::<syn::Path>()
}

/// Parses the `required` option into the literal stored in the descriptor.
///
/// A bare `required` means `"true"`. Booleans are rendered as text; strings
/// are kept verbatim and interpreted when the record is populated.
pub(crate) fn required_literal(meta: &ParseNestedMeta) -> syn::Result<String> {
    if !meta.input.peek(Token![=]) {
        return Ok(String::from("true"));
    }
    match meta.value()?.parse::<Lit>()? {
        Lit::Bool(b) => Ok(b.value.to_string()),
        Lit::Str(s) => Ok(s.value()),
        other => Err(syn::Error::new(
            other.span(),
            "required must be a boolean or a string",
        )),
    }
}
