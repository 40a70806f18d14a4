//! Line-oriented `.env` file reader.
//!
//! Format:
//!
//! - blank lines and lines starting with `#` are ignored;
//! - every other line is `KEY=VALUE`, split on the first `=`;
//! - the key is trimmed;
//! - the value is trimmed and an inline comment introduced by ` #` is removed.
//!
//! Placeholders such as `${HOST}` are kept verbatim here and resolved later
//! against the merged mapping.

use std::fs::File;
use std::io::{BufRead, BufReader};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use super::{Source, SourceMap};
use crate::{EnvConfigError, EnvConfigResult};

/// Extension accepted for configuration files, without the leading dot.
pub const ENV_EXTENSION: &str = "env";

const INLINE_COMMENT: &str = " #";

/// A `.env` file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFile {
    path: Utf8PathBuf,
}

impl EnvFile {
    /// Creates a reader for `path`. Nothing is read until [`Source::load`].
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this reader was created with.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Parses in-memory `contents` as if they had been read from this file.
    ///
    /// # Errors
    ///
    /// Returns [`EnvConfigError::Parse`] for the first line lacking `=`.
    ///
    /// # Examples
    ///
    /// ```
    /// use envconfig::EnvFile;
    /// let file = EnvFile::new("app.env");
    /// let map = file.parse_str("# comment\nHOST = example.com # inline\n\nPORT=80\n")?;
    /// assert_eq!(map.get("HOST"), Some("example.com"));
    /// assert_eq!(map.get("PORT"), Some("80"));
    /// # Ok::<(), envconfig::EnvConfigError>(())
    /// ```
    pub fn parse_str(&self, contents: &str) -> EnvConfigResult<SourceMap> {
        let mut map = SourceMap::new();
        for (index, line) in contents.lines().enumerate() {
            self.apply_line(&mut map, index + 1, line)?;
        }
        Ok(map)
    }

    fn validate_extension(&self) -> EnvConfigResult<()> {
        let is_env = self.path.extension() == Some(ENV_EXTENSION)
            || self.path.file_name() == Some(".env");
        if is_env {
            Ok(())
        } else {
            Err(EnvConfigError::FileTypeValidation {
                path: self.path.clone(),
            })
        }
    }

    fn read(&self) -> EnvConfigResult<SourceMap> {
        let file = File::open(&self.path).map_err(|source| EnvConfigError::OpenFile {
            path: self.path.clone(),
            source,
        })?;
        let mut map = SourceMap::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let text = line.map_err(|source| EnvConfigError::FileRead {
                path: self.path.clone(),
                source,
            })?;
            self.apply_line(&mut map, index + 1, &text)?;
        }
        Ok(map)
    }

    fn apply_line(&self, map: &mut SourceMap, line_number: usize, line: &str) -> EnvConfigResult<()> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(());
        }
        let (key, value) = parse_line(line)
            .ok_or_else(|| EnvConfigError::parse_line(self.path.clone(), line_number, line))?;
        map.insert(key, value);
        Ok(())
    }
}

/// Splits a line into key and cleaned value; `None` when `=` is missing.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (raw_key, raw_value) = line.split_once('=')?;
    let value = raw_value.trim();
    let without_comment = value
        .split_once(INLINE_COMMENT)
        .map_or(value, |(kept, _)| kept.trim_end());
    Some((raw_key.trim(), without_comment))
}

impl Source for EnvFile {
    fn describe(&self) -> String {
        format!("env file '{}'", self.path)
    }

    fn load(&self) -> EnvConfigResult<SourceMap> {
        self.validate_extension()?;
        let map = self.read()?;
        debug!(path = %self.path, entries = map.len(), "read env file");
        Ok(map)
    }
}
