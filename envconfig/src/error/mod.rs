//! Error types produced while reading sources and populating records.

mod constructors;
mod conversions;
mod types;

pub use types::{BoxError, EnvConfigError, EnvConfigResult};
