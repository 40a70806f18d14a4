//! Scalar `FieldValue` implementations.

use std::time::Duration;

use super::{FieldValue, parse_bool};
use crate::BoxError;

impl FieldValue for String {
    fn target_type(&self) -> &'static str {
        "string"
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn assign(&mut self, raw: &str) -> Result<(), BoxError> {
        raw.clone_into(self);
        Ok(())
    }
}

macro_rules! integer_field {
    ($label:literal => $($ty:ty),+ $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn target_type(&self) -> &'static str {
                    $label
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }

                fn assign(&mut self, raw: &str) -> Result<(), BoxError> {
                    *self = raw.parse::<$ty>()?;
                    Ok(())
                }
            }
        )+
    };
}

integer_field!("int" => i8, i16, i32, i64, i128, isize);
integer_field!("uint" => u8, u16, u32, u64, u128, usize);

impl FieldValue for f64 {
    fn target_type(&self) -> &'static str {
        "float"
    }

    fn is_zero(&self) -> bool {
        self.to_bits() == 0
    }

    fn assign(&mut self, raw: &str) -> Result<(), BoxError> {
        *self = raw.parse::<Self>()?;
        Ok(())
    }
}

impl FieldValue for f32 {
    fn target_type(&self) -> &'static str {
        "float"
    }

    fn is_zero(&self) -> bool {
        self.to_bits() == 0
    }

    fn assign(&mut self, raw: &str) -> Result<(), BoxError> {
        *self = raw.parse::<Self>()?;
        Ok(())
    }
}

impl FieldValue for bool {
    fn target_type(&self) -> &'static str {
        "bool"
    }

    fn is_zero(&self) -> bool {
        !*self
    }

    fn assign(&mut self, raw: &str) -> Result<(), BoxError> {
        *self = parse_bool(raw)?;
        Ok(())
    }
}

impl FieldValue for Duration {
    fn target_type(&self) -> &'static str {
        "duration"
    }

    fn is_zero(&self) -> bool {
        self.as_nanos() == 0
    }

    fn assign(&mut self, raw: &str) -> Result<(), BoxError> {
        *self = humantime::parse_duration(raw)?;
        Ok(())
    }
}
