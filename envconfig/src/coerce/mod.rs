//! Conversion of raw strings into typed field values.
//!
//! Every supported field type implements [`FieldValue`]. The derive macro
//! hands the population engine a `&mut dyn FieldValue` for each keyed field,
//! so the engine never inspects concrete types.
//!
//! | Rust type | Label | Rule |
//! |---|---|---|
//! | `String` | `string` | copied verbatim |
//! | `i8` to `i128`, `isize` | `int` | base-10 parse |
//! | `u8` to `u128`, `usize` | `uint` | base-10 parse |
//! | `bool` | `bool` | [`parse_bool`] |
//! | `f32`, `f64` | `float` | decimal parse |
//! | `Duration` | `duration` | `humantime` expression such as `30s` or `1h 5m` |
//! | `Vec<String>` | `[]string` | split on `,`, trim each element |
//! | `Vec<int>` / `Vec<uint>` / `Vec<float>` | `[]int` / `[]uint` / `[]float` | split, trim, parse each element |

mod scalar;
mod sequence;

use thiserror::Error;

use crate::BoxError;

/// A field the population engine can fill from a raw string.
pub trait FieldValue {
    /// Label naming the target type in conversion errors.
    fn target_type(&self) -> &'static str;

    /// Whether the field still holds its zero value.
    ///
    /// Fields that are not zero are left untouched by the engine.
    fn is_zero(&self) -> bool;

    /// Parses `raw` and stores the result in `self`.
    ///
    /// On failure `self` is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns the underlying parse error.
    fn assign(&mut self, raw: &str) -> Result<(), BoxError>;
}

/// A boolean literal that [`parse_bool`] does not accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid boolean literal {0:?}")]
pub struct InvalidBool(pub String);

/// Parses the boolean spellings `1 t T TRUE true True` and
/// `0 f F FALSE false False`.
///
/// # Errors
///
/// Returns [`InvalidBool`] for any other input.
///
/// # Examples
///
/// ```
/// use envconfig::coerce::parse_bool;
/// assert_eq!(parse_bool("T"), Ok(true));
/// assert_eq!(parse_bool("0"), Ok(false));
/// assert!(parse_bool("yes").is_err());
/// ```
pub fn parse_bool(raw: &str) -> Result<bool, InvalidBool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(InvalidBool(other.to_owned())),
    }
}

#[cfg(test)]
mod tests;
