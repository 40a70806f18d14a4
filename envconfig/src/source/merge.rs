//! Union-with-overwrite across sources.

use tracing::debug;

use super::{Source, SourceMap};
use crate::EnvConfigResult;

/// Loads every source in order and merges the results.
///
/// Later sources win on overlapping keys, so passing `[file, environment,
/// flags]` yields flags > environment > file precedence. The first failing
/// source aborts the merge.
///
/// # Errors
///
/// Propagates the first error returned by [`Source::load`].
///
/// # Examples
///
/// ```
/// use envconfig::{Source, SourceMap, merge_sources};
/// let file: SourceMap = [("PORT", "80"), ("HOST", "a")].into_iter().collect();
/// let env: SourceMap = [("PORT", "8080")].into_iter().collect();
/// let sources: [&dyn Source; 2] = [&file, &env];
/// let merged = merge_sources(sources)?;
/// assert_eq!(merged.get("PORT"), Some("8080"));
/// assert_eq!(merged.get("HOST"), Some("a"));
/// # Ok::<(), envconfig::EnvConfigError>(())
/// ```
pub fn merge_sources<'a, I>(sources: I) -> EnvConfigResult<SourceMap>
where
    I: IntoIterator<Item = &'a dyn Source>,
{
    let mut merged = SourceMap::new();
    for source in sources {
        let entries = source.load()?;
        debug!(source = %source.describe(), entries = entries.len(), "merging source");
        merged.merge(entries);
    }
    Ok(merged)
}
