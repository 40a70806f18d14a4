//! Type introspection helpers.
//!
//! Classification is syntactic: only the final path segment is inspected, so
//! `u16`, `std::primitive::u16` and `core::time::Duration` are recognised but
//! type aliases are not.

use syn::{GenericArgument, PathArguments, PathSegment, Type};

/// Scalar types with a built-in coercion rule.
const SCALARS: &[&str] = &[
    "String", "bool", "f32", "f64", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16",
    "u32", "u64", "u128", "usize", "Duration",
];

/// Element types accepted inside `Vec<T>`.
const ELEMENTS: &[&str] = &[
    "String", "f32", "f64", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64",
    "u128", "usize",
];

fn last_segment(ty: &Type) -> Option<&PathSegment> {
    match ty {
        Type::Path(p) if p.qself.is_none() => p.path.segments.last(),
        Type::Group(g) => last_segment(&g.elem),
        Type::Paren(p) => last_segment(&p.elem),
        _ => None,
    }
}

fn is_bare(segment: &PathSegment, names: &[&str]) -> bool {
    segment.arguments.is_none() && names.iter().any(|name| segment.ident == name)
}

/// Extracts the element type `T` if `ty` is `Vec<T>`.
pub(crate) fn vec_inner(ty: &Type) -> Option<&Type> {
    let segment = last_segment(ty)?;
    if segment.ident != "Vec" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

/// Whether `ty` has a built-in coercion rule.
pub(crate) fn is_coercible(ty: &Type) -> bool {
    if let Some(inner) = vec_inner(ty) {
        return last_segment(inner).is_some_and(|segment| is_bare(segment, ELEMENTS));
    }
    last_segment(ty).is_some_and(|segment| is_bare(segment, SCALARS))
}
