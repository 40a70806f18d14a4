//! Primary error enum for loading and population flows.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Boxed error used for coercion and decoder failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias used throughout the crate.
pub type EnvConfigResult<T> = Result<T, EnvConfigError>;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EnvConfigError {
    /// The configuration file could not be opened.
    #[error("failed to open config file '{path}': {source}")]
    OpenFile {
        /// File that failed to open.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Reading from an opened configuration file failed.
    #[error("reading '{path}': {source}")]
    FileRead {
        /// File being read.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file does not carry the `.env` extension.
    #[error("file extension is not a valid environment file: '{path}'")]
    FileTypeValidation {
        /// Rejected path.
        path: Utf8PathBuf,
    },

    /// A non-comment line lacks the `=` separator.
    #[error("parse line {line_number} of '{path}': missing '=' separator in {line:?}")]
    Parse {
        /// File containing the line.
        path: Utf8PathBuf,
        /// One-based line number.
        line_number: usize,
        /// Offending line text.
        line: String,
    },

    /// Error parsing command-line arguments.
    #[error("Failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// A loader option was supplied without the option it depends on.
    #[error("option '{option}' requires '{requires}' to be set first")]
    IncompatibleOptions {
        /// Option that was rejected.
        option: &'static str,
        /// Option that must be configured beforehand.
        requires: &'static str,
    },

    /// A `${NAME}` placeholder referenced a missing or empty key.
    #[error("environment variable for replacement is not set: {variable}")]
    Replacement {
        /// Name inside the placeholder.
        variable: String,
    },

    /// A placeholder in a field's value referenced a missing or empty key.
    #[error("field {field} (key '{key}') references unset variable {variable}")]
    FieldReplacement {
        /// Field being populated.
        field: &'static str,
        /// Fully prefixed key whose value holds the placeholder.
        key: String,
        /// Name inside the placeholder.
        variable: String,
    },

    /// A nested record field has no prefix.
    #[error("prefix option is not set for nested struct field: {field}")]
    PrefixOption {
        /// Field declared as nested.
        field: &'static str,
    },

    /// A required field has no value in any source.
    #[error("required field {field} is not set (key '{key}')")]
    RequiredField {
        /// Field name.
        field: &'static str,
        /// Fully prefixed lookup key.
        key: String,
    },

    /// A field option literal could not be interpreted.
    #[error("invalid option {option} conversion for field {field}: {source}")]
    InvalidOptionConversion {
        /// Field carrying the option.
        field: &'static str,
        /// Option name, such as `required`.
        option: &'static str,
        /// Parse failure for the literal.
        #[source]
        source: BoxError,
    },

    /// A raw value could not be converted to the field's type.
    #[error("failed to convert field {field} (key '{key}') to {target_type}: {source}")]
    FieldConversion {
        /// Field name.
        field: &'static str,
        /// Fully prefixed lookup key.
        key: String,
        /// Label of the target type, for example `int` or `[]float`.
        target_type: &'static str,
        /// Underlying parse failure.
        #[source]
        source: BoxError,
    },

    /// The field's type has no coercion rule.
    #[error("unsupported field type for {field}: {type_name}")]
    UnsupportedFieldType {
        /// Field name.
        field: &'static str,
        /// Rust type name of the field.
        type_name: &'static str,
    },

    /// A JSON blob could not be decoded into its field.
    #[error("failed to decode JSON for field {field} (key '{key}'): {source}")]
    JsonDecode {
        /// Field name.
        field: &'static str,
        /// Fully prefixed lookup key.
        key: String,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
}
