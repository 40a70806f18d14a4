//! Per-field descriptor tables produced by `#[derive(EnvConfig)]`.
//!
//! A record describes its fields once, as data. The population engine walks
//! that table instead of inspecting types at runtime.

use serde::de::DeserializeOwned;

use crate::coerce::FieldValue;
use crate::populate::Populator;
use crate::{BoxError, EnvConfigResult};

/// A configuration record that can be filled from a [`crate::SourceMap`].
///
/// Usually derived:
///
/// ```
/// use envconfig::EnvConfig;
///
/// #[derive(Debug, Default, EnvConfig)]
/// struct Server {
///     #[env(key = "HOST", default = "localhost")]
///     host: String,
///     #[env(key = "PORT", required)]
///     port: u16,
/// }
///
/// let names: Vec<_> = Server::fields().iter().map(|f| f.name).collect();
/// assert_eq!(names, ["host", "port"]);
/// ```
pub trait EnvConfig {
    /// Describes every field the engine should visit, in declaration order.
    fn fields() -> Vec<FieldDescriptor<Self>>
    where
        Self: Sized;
}

/// One entry of a record's descriptor table.
pub struct FieldDescriptor<T> {
    /// Field name as written in the record.
    pub name: &'static str,
    /// Metadata attached to the field.
    pub tags: FieldTags,
    /// How the field is filled.
    pub kind: FieldKind<T>,
}

impl<T> FieldDescriptor<T> {
    /// Creates a descriptor.
    #[must_use]
    pub const fn new(name: &'static str, tags: FieldTags, kind: FieldKind<T>) -> Self {
        Self { name, tags, kind }
    }
}

impl<T> std::fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field("kind", &self.kind.label())
            .finish()
    }
}

/// Field metadata, independent of attribute syntax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldTags {
    /// Lookup key before prefixing.
    pub key: Option<&'static str>,
    /// Literal used when the key has no value.
    pub default: Option<&'static str>,
    /// Raw `required` literal; parsed as a boolean when the key has no value.
    pub required: Option<&'static str>,
    /// Prefix prepended to every key inside a nested record.
    pub prefix: Option<&'static str>,
    /// Key holding a JSON document for the field.
    pub json_key: Option<&'static str>,
}

/// Accessor returning a coercible field.
pub type ValueAccessor<T> = fn(&mut T) -> &mut dyn FieldValue;
/// Decoder for fields using `#[env(with = ...)]`.
pub type CustomDecoder<T> = fn(&mut T, &str) -> Result<(), BoxError>;
/// Reports whether a custom field still holds its default value.
pub type ZeroCheck<T> = fn(&T) -> bool;
/// Accessor returning a nested record.
pub type RecordAccessor<T> = fn(&mut T) -> &mut dyn Record;
/// Accessor returning a JSON-decodable field.
pub type JsonAccessor<T> = fn(&mut T) -> &mut dyn JsonTarget;

/// How a field receives its value.
pub enum FieldKind<T> {
    /// Scalar, duration or sequence field with a built-in coercion rule.
    Value(ValueAccessor<T>),
    /// Field decoded by a user-supplied function.
    Custom {
        /// Label naming the target type in conversion errors.
        target: &'static str,
        /// True while the field holds its default; other values are kept.
        is_zero: ZeroCheck<T>,
        /// Parses the raw string and stores it in the record.
        decode: CustomDecoder<T>,
    },
    /// Nested record whose keys are prefixed.
    Nested(RecordAccessor<T>),
    /// Field deserialised from a JSON document.
    Json(JsonAccessor<T>),
    /// Keyed field whose type has no coercion rule.
    Unsupported(&'static str),
}

impl<T> FieldKind<T> {
    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::Custom { .. } => "custom",
            Self::Nested(_) => "nested",
            Self::Json(_) => "json",
            Self::Unsupported(_) => "unsupported",
        }
    }
}

/// Object-safe view of an [`EnvConfig`] record, used for nested descent.
pub trait Record {
    /// Fills `self` using `populator`, with `prefix` prepended to every key.
    ///
    /// # Errors
    ///
    /// Propagates the first field-level error.
    fn populate_with(&mut self, populator: &Populator<'_>, prefix: &str) -> EnvConfigResult<()>;
}

impl<T: EnvConfig> Record for T {
    fn populate_with(&mut self, populator: &Populator<'_>, prefix: &str) -> EnvConfigResult<()> {
        populator.populate(self, prefix)
    }
}

/// A field that can be replaced by a decoded JSON document.
pub trait JsonTarget {
    /// Whether the field still equals its `Default` value.
    fn is_zero(&self) -> bool;

    /// Replaces `self` with the value decoded from `raw`.
    ///
    /// # Errors
    ///
    /// Returns the decoder error; `self` is unchanged on failure.
    fn decode_json(&mut self, raw: &str) -> Result<(), serde_json::Error>;
}

impl<T: DeserializeOwned + Default + PartialEq> JsonTarget for T {
    fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    fn decode_json(&mut self, raw: &str) -> Result<(), serde_json::Error> {
        *self = serde_json::from_str(raw)?;
        Ok(())
    }
}
