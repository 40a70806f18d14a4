//! Input parsing for the `EnvConfig` derive macro.
//!
//! The struct, its fields and every attribute are gathered in one pass so
//! expansion can fail fast with useful errors.

use syn::{Data, DeriveInput, Fields};

use super::{FieldPlan, StructAttrs, parse_field_attrs, parse_struct_attrs};

/// One named field and how it is filled.
pub(crate) struct ParsedField {
    pub ident: syn::Ident,
    pub ty: syn::Type,
    pub plan: FieldPlan,
}

/// Everything code generation needs from the input struct.
pub(crate) struct ParsedInput {
    pub struct_attrs: StructAttrs,
    pub fields: Vec<ParsedField>,
}

/// Gathers information from the user-provided struct.
///
/// Enums, unions and structs without named fields are rejected.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "EnvConfig requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "EnvConfig can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let plan = match parse_field_attrs(&field.attrs)? {
            Some(attrs) => attrs.into_plan(&ident)?,
            None => FieldPlan::Ignore,
        };
        fields.push(ParsedField {
            ident,
            ty: field.ty.clone(),
            plan,
        });
    }
    Ok(ParsedInput {
        struct_attrs,
        fields,
    })
}
