//! Constructors and inspection helpers for `EnvConfigError`.

use camino::Utf8PathBuf;

use super::{BoxError, EnvConfigError};

impl EnvConfigError {
    /// Construct a conversion error for `field` looked up under `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use envconfig::EnvConfigError;
    /// let source = "abc".parse::<i64>().unwrap_err();
    /// let err = EnvConfigError::field_conversion("port", "APP_PORT", "int", source);
    /// assert!(err.to_string().contains("to int"));
    /// ```
    #[must_use]
    pub fn field_conversion(
        field: &'static str,
        key: impl Into<String>,
        target_type: &'static str,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::FieldConversion {
            field,
            key: key.into(),
            target_type,
            source: source.into(),
        }
    }

    /// Construct a replacement error for the placeholder `variable`.
    #[must_use]
    pub fn replacement(variable: impl Into<String>) -> Self {
        Self::Replacement {
            variable: variable.into(),
        }
    }

    /// Construct a replacement error raised while populating `field`.
    #[must_use]
    pub fn field_replacement(
        field: &'static str,
        key: impl Into<String>,
        variable: impl Into<String>,
    ) -> Self {
        Self::FieldReplacement {
            field,
            key: key.into(),
            variable: variable.into(),
        }
    }

    /// Construct a parse error for a malformed line.
    #[must_use]
    pub fn parse_line(path: Utf8PathBuf, line_number: usize, line: impl Into<String>) -> Self {
        Self::Parse {
            path,
            line_number,
            line: line.into(),
        }
    }

    /// Field name attached to a field-level error, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use envconfig::EnvConfigError;
    /// let err = EnvConfigError::PrefixOption { field: "database" };
    /// assert_eq!(err.field(), Some("database"));
    /// assert_eq!(EnvConfigError::replacement("HOST").field(), None);
    /// ```
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::PrefixOption { field }
            | Self::RequiredField { field, .. }
            | Self::InvalidOptionConversion { field, .. }
            | Self::FieldConversion { field, .. }
            | Self::FieldReplacement { field, .. }
            | Self::UnsupportedFieldType { field, .. }
            | Self::JsonDecode { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Placeholder name behind a replacement failure, with or without field
    /// context.
    ///
    /// # Examples
    ///
    /// ```
    /// use envconfig::EnvConfigError;
    /// let err = EnvConfigError::field_replacement("url", "APP_URL", "DNS");
    /// assert_eq!(err.missing_variable(), Some("DNS"));
    /// assert_eq!(EnvConfigError::replacement("DNS").missing_variable(), Some("DNS"));
    /// ```
    #[must_use]
    pub fn missing_variable(&self) -> Option<&str> {
        match self {
            Self::Replacement { variable } | Self::FieldReplacement { variable, .. } => {
                Some(variable)
            }
            _ => None,
        }
    }
}
