//! Depth-first population of records from a merged mapping.
//!
//! For each descriptor the engine:
//!
//! 1. decodes JSON fields from `prefix + json_key` unless they already hold
//!    a non-default value;
//! 2. descends into nested records with `prefix + field prefix`, failing when
//!    the field declares no prefix;
//! 3. skips value and custom fields that already hold a non-zero value;
//! 4. looks up `prefix + key`, falling back to the `default` literal and then
//!    to the `required` check;
//! 5. resolves `${NAME}` placeholders and coerces the result.
//!
//! The first error aborts the walk. Fields visited before the failure keep
//! their new values.

use std::borrow::Cow;

use tracing::trace;

use crate::coerce::parse_bool;
use crate::descriptor::{EnvConfig, FieldDescriptor, FieldKind, JsonTarget};
use crate::{EnvConfigError, EnvConfigResult, SourceMap, interpolate};

const REQUIRED_OPTION: &str = "required";

/// Fills records from a borrowed [`SourceMap`].
#[derive(Debug, Clone, Copy)]
pub struct Populator<'m> {
    mapping: &'m SourceMap,
}

/// Raw value chosen for a keyed field.
struct Resolved<'a> {
    key: String,
    raw: Cow<'a, str>,
}

impl<'m> Populator<'m> {
    /// Creates a populator reading from `mapping`.
    #[must_use]
    pub const fn new(mapping: &'m SourceMap) -> Self {
        Self { mapping }
    }

    /// Mapping consulted by this populator.
    #[must_use]
    pub const fn mapping(&self) -> &'m SourceMap {
        self.mapping
    }

    /// Fills `record`, prepending `prefix` to every key.
    ///
    /// # Errors
    ///
    /// Returns the first field-level error, for example
    /// [`EnvConfigError::RequiredField`] or [`EnvConfigError::FieldConversion`].
    pub fn populate<T: EnvConfig>(&self, record: &mut T, prefix: &str) -> EnvConfigResult<()> {
        for descriptor in T::fields() {
            self.apply(record, &descriptor, prefix)?;
        }
        Ok(())
    }

    fn apply<T>(
        &self,
        record: &mut T,
        descriptor: &FieldDescriptor<T>,
        prefix: &str,
    ) -> EnvConfigResult<()> {
        match descriptor.kind {
            FieldKind::Json(access) => {
                let target = access(record);
                if !target.is_zero() {
                    trace!(field = descriptor.name, "keeping pre-set value");
                    return Ok(());
                }
                self.apply_json(target, descriptor, prefix)
            }
            FieldKind::Nested(access) => {
                let nested = descriptor.tags.prefix.ok_or(EnvConfigError::PrefixOption {
                    field: descriptor.name,
                })?;
                let nested_prefix = format!("{prefix}{nested}");
                trace!(field = descriptor.name, prefix = %nested_prefix, "descending");
                access(record).populate_with(self, &nested_prefix)
            }
            FieldKind::Value(access) => {
                let value = access(record);
                if !value.is_zero() {
                    trace!(field = descriptor.name, "keeping pre-set value");
                    return Ok(());
                }
                let Some(resolved) = self.resolve(descriptor, prefix)? else {
                    return Ok(());
                };
                let target_type = value.target_type();
                value.assign(&resolved.raw).map_err(|source| {
                    EnvConfigError::field_conversion(descriptor.name, resolved.key, target_type, source)
                })
            }
            FieldKind::Custom {
                target,
                is_zero,
                decode,
            } => {
                if !is_zero(record) {
                    trace!(field = descriptor.name, "keeping pre-set value");
                    return Ok(());
                }
                let Some(resolved) = self.resolve(descriptor, prefix)? else {
                    return Ok(());
                };
                decode(record, &resolved.raw).map_err(|source| {
                    EnvConfigError::field_conversion(descriptor.name, resolved.key, target, source)
                })
            }
            FieldKind::Unsupported(type_name) => Err(EnvConfigError::UnsupportedFieldType {
                field: descriptor.name,
                type_name,
            }),
        }
    }

    fn apply_json<T>(
        &self,
        target: &mut dyn JsonTarget,
        descriptor: &FieldDescriptor<T>,
        prefix: &str,
    ) -> EnvConfigResult<()> {
        let Some(json_key) = descriptor.tags.json_key else {
            return Ok(());
        };
        let key = format!("{prefix}{json_key}");
        let Some(raw) = self.mapping.lookup(&key) else {
            trace!(field = descriptor.name, key = %key, "no JSON document");
            return Ok(());
        };
        target
            .decode_json(raw)
            .map_err(|source| EnvConfigError::JsonDecode {
                field: descriptor.name,
                key,
                source,
            })
    }

    /// Picks the raw value for a keyed field, or `None` when it stays unset.
    fn resolve<T>(
        &self,
        descriptor: &FieldDescriptor<T>,
        prefix: &str,
    ) -> EnvConfigResult<Option<Resolved<'m>>> {
        let Some(field_key) = descriptor.tags.key else {
            return Ok(None);
        };
        let key = format!("{prefix}{field_key}");
        let raw: &'m str = match self.mapping.lookup(&key) {
            Some(found) => found,
            None => {
                let required = Self::is_required(descriptor)?;
                match descriptor.tags.default {
                    Some(default) => {
                        trace!(field = descriptor.name, key = %key, "using default");
                        default
                    }
                    None if required => {
                        return Err(EnvConfigError::RequiredField {
                            field: descriptor.name,
                            key,
                        });
                    }
                    None => {
                        trace!(field = descriptor.name, key = %key, "no value; leaving unset");
                        return Ok(None);
                    }
                }
            }
        };
        let resolved = interpolate::resolve(raw, self.mapping).map_err(|err| match err {
            EnvConfigError::Replacement { variable } => {
                EnvConfigError::field_replacement(descriptor.name, key.clone(), variable)
            }
            other => other,
        })?;
        Ok(Some(Resolved { key, raw: resolved }))
    }

    fn is_required<T>(descriptor: &FieldDescriptor<T>) -> EnvConfigResult<bool> {
        descriptor.tags.required.map_or(Ok(false), |literal| {
            parse_bool(literal).map_err(|source| EnvConfigError::InvalidOptionConversion {
                field: descriptor.name,
                option: REQUIRED_OPTION,
                source: source.into(),
            })
        })
    }
}

/// Fills `record` from `mapping`, prepending `prefix` to every key.
///
/// Fields that already hold a non-zero value are left untouched, so calling
/// this repeatedly is idempotent.
///
/// # Errors
///
/// Returns the first field-level error; earlier fields stay populated.
///
/// # Examples
///
/// ```
/// use envconfig::{EnvConfig, SourceMap, populate};
///
/// #[derive(Debug, Default, EnvConfig)]
/// struct Database {
///     #[env(key = "HOST")]
///     host: String,
/// }
///
/// #[derive(Debug, Default, EnvConfig)]
/// struct App {
///     #[env(prefix = "DB_")]
///     database: Database,
/// }
///
/// let map: SourceMap = [("APP_DB_HOST", "db.internal")].into_iter().collect();
/// let mut app = App::default();
/// populate(&mut app, &map, "APP_")?;
/// assert_eq!(app.database.host, "db.internal");
/// # Ok::<(), envconfig::EnvConfigError>(())
/// ```
pub fn populate<T: EnvConfig>(record: &mut T, mapping: &SourceMap, prefix: &str) -> EnvConfigResult<()> {
    Populator::new(mapping).populate(record, prefix)
}

#[cfg(test)]
mod tests;
