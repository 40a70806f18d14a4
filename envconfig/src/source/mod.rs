//! Readers that turn external resources into flat string mappings.
//!
//! Each reader implements [`Source`]. The loader combines them with
//! [`merge_sources`] so that later sources overwrite earlier ones.

mod environment;
mod file;
mod flags;
mod map;
mod merge;

pub use environment::Environment;
pub use file::{ENV_EXTENSION, EnvFile};
pub use flags::FlagSource;
pub use map::SourceMap;
pub use merge::merge_sources;

use crate::EnvConfigResult;

/// A producer of key/value pairs.
pub trait Source {
    /// Short human-readable description used in diagnostics.
    fn describe(&self) -> String;

    /// Reads the source into a fresh mapping.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::EnvConfigError`] when the underlying resource cannot
    /// be read or parsed.
    fn load(&self) -> EnvConfigResult<SourceMap>;
}

impl Source for SourceMap {
    fn describe(&self) -> String {
        format!("in-memory map ({} entries)", self.len())
    }

    fn load(&self) -> EnvConfigResult<SourceMap> {
        Ok(self.clone())
    }
}
