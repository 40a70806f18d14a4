//! `${NAME}` placeholder resolution against the merged mapping.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{EnvConfigError, EnvConfigResult, SourceMap};

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

/// Replaces every `${NAME}` in `value` with the value of `NAME` in `mapping`.
///
/// Resolution is a single pass: substituted text is not scanned again. A
/// reference to a key that is missing or empty fails with
/// [`EnvConfigError::Replacement`] naming the first such key.
///
/// # Errors
///
/// Returns [`EnvConfigError::Replacement`] when a referenced key has no value.
///
/// # Examples
///
/// ```
/// use envconfig::{SourceMap, interpolate};
/// let map: SourceMap = [("DNS", "example.com")].into_iter().collect();
/// let url = interpolate::resolve("https://${DNS}/v1", &map)?;
/// assert_eq!(url, "https://example.com/v1");
/// # Ok::<(), envconfig::EnvConfigError>(())
/// ```
pub fn resolve<'a>(value: &'a str, mapping: &SourceMap) -> EnvConfigResult<Cow<'a, str>> {
    if let Some(missing) = PLACEHOLDER
        .captures_iter(value)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str())
        .find(|name| mapping.lookup(name).is_none())
    {
        return Err(EnvConfigError::replacement(missing));
    }
    Ok(PLACEHOLDER.replace_all(value, |caps: &Captures<'_>| {
        caps.get(1)
            .and_then(|name| mapping.lookup(name.as_str()))
            .unwrap_or_default()
            .to_owned()
    }))
}
