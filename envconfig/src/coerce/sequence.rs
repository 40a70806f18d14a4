//! Comma-separated sequence `FieldValue` implementations.
//!
//! Elements are trimmed but never filtered: `"a,,b"` yields an empty string
//! element for `Vec<String>` and a parse failure for numeric element types.

use std::str::FromStr;

use super::FieldValue;
use crate::BoxError;

const SEPARATOR: char = ',';

fn split_elements<T>(raw: &str) -> Result<Vec<T>, BoxError>
where
    T: FromStr,
    T::Err: Into<BoxError>,
{
    raw.split(SEPARATOR)
        .map(|element| element.trim().parse::<T>().map_err(Into::into))
        .collect()
}

macro_rules! sequence_field {
    ($label:literal => $($ty:ty),+ $(,)?) => {
        $(
            impl FieldValue for Vec<$ty> {
                fn target_type(&self) -> &'static str {
                    $label
                }

                fn is_zero(&self) -> bool {
                    self.is_empty()
                }

                fn assign(&mut self, raw: &str) -> Result<(), BoxError> {
                    *self = split_elements::<$ty>(raw)?;
                    Ok(())
                }
            }
        )+
    };
}

sequence_field!("[]string" => String);
sequence_field!("[]int" => i8, i16, i32, i64, i128, isize);
sequence_field!("[]uint" => u8, u16, u32, u64, u128, usize);
sequence_field!("[]float" => f32, f64);
