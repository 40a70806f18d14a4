//! Temporary `.env` files for loader tests.
//!
//! The returned [`EnvFileFixture`] owns its [`tempfile::TempDir`], so the file
//! disappears when the fixture is dropped.

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// A directory holding one or more generated env files.
#[derive(Debug)]
pub struct EnvFileFixture {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl EnvFileFixture {
    /// Creates an empty fixture directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the temporary directory cannot be created or its
    /// path is not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temporary directory")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("temporary directory is not UTF-8: {}", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Writes `lines` joined by newlines to `name` and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write<I, S>(&self, name: &str, lines: I) -> Result<Utf8PathBuf>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let path = self.root.join(name);
        let mut contents = String::new();
        for line in lines {
            contents.push_str(line.as_ref());
            contents.push('\n');
        }
        fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Directory containing the generated files.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

/// Writes a single env file named `name` and returns the fixture with its path.
///
/// # Errors
///
/// Propagates failures from [`EnvFileFixture::new`] and
/// [`EnvFileFixture::write`].
///
/// # Examples
/// ```
/// let (_fixture, path) = envconfig_test_helpers::env_file::write_env_file("app.env", ["PORT=8080"])?;
/// assert!(path.as_str().ends_with("app.env"));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn write_env_file<I, S>(name: &str, lines: I) -> Result<(EnvFileFixture, Utf8PathBuf)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let fixture = EnvFileFixture::new()?;
    let path = fixture.write(name, lines)?;
    Ok((fixture, path))
}
