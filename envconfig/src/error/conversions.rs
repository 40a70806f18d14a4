//! Trait-based conversions between external error types and `EnvConfigError`.

use figment::Error as FigmentError;

use super::EnvConfigError;

impl From<clap::Error> for EnvConfigError {
    fn from(e: clap::Error) -> Self {
        Self::CliParsing(e.into())
    }
}

impl From<EnvConfigError> for FigmentError {
    /// Allow using `?` inside `figment::Jail` closures.
    fn from(e: EnvConfigError) -> Self {
        Self::from(e.to_string())
    }
}
