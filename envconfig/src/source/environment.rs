//! Process environment reader.

use figment::providers::Env;
use tracing::debug;

use super::{Source, SourceMap};
use crate::EnvConfigResult;

/// Snapshot of the process environment, with key case preserved.
///
/// Variables are enumerated through figment's [`Env`] provider, which trims
/// surrounding whitespace from names and drops names containing empty
/// `.`-separated segments (`A..B`, `.X`). Such names can never match a field
/// key. Names and values that are not valid UTF-8 are converted lossily.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    prefix: Option<String>,
}

impl Environment {
    /// Reads every variable.
    #[must_use]
    pub const fn new() -> Self {
        Self { prefix: None }
    }

    /// Reads only variables whose name starts with `prefix`.
    ///
    /// Matching keys keep their full name, prefix included, so they line up
    /// with the prefixed lookups performed during population.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn provider(&self) -> Env {
        let env = match self.prefix.clone() {
            Some(prefix) => Env::raw().filter(move |key| key.as_str().starts_with(prefix.as_str())),
            None => Env::raw(),
        };
        // `filter` resets key lowercasing, so this must come last.
        env.lowercase(false)
    }
}

impl Source for Environment {
    fn describe(&self) -> String {
        self.prefix.as_deref().map_or_else(
            || "process environment".to_owned(),
            |prefix| format!("process environment (prefix '{prefix}')"),
        )
    }

    fn load(&self) -> EnvConfigResult<SourceMap> {
        let map: SourceMap = self
            .provider()
            .iter()
            .map(|(key, value)| (key.as_str().to_owned(), value))
            .collect();
        debug!(entries = map.len(), "read process environment");
        Ok(map)
    }
}
