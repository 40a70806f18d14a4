//! Entry point that reads every configured source and fills a record.
//!
//! Sources are merged in the order file, environment, flags, so flags win
//! over environment variables and environment variables win over the file.
//! The process environment is only read, never written.

mod options;

pub use options::{LoadOption, set, with_active_profile, with_filepath, with_flags, with_prefix};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::source::{ENV_EXTENSION, EnvFile, Environment, FlagSource, Source, merge_sources};
use crate::{EnvConfig, EnvConfigError, EnvConfigResult, SourceMap, populate};

/// Profile selected by an empty active-profile name.
pub const DEFAULT_PROFILE: &str = "default";

/// Builder describing where configuration comes from.
///
/// # Examples
///
/// ```no_run
/// use envconfig::{EnvConfig, Loader};
///
/// #[derive(Debug, Default, EnvConfig)]
/// struct Settings {
///     #[env(key = "PORT", default = "8080")]
///     port: u16,
/// }
///
/// let settings: Settings = Loader::new()
///     .with_filepath("config/app.env")
///     .with_active_profile("production")
///     .with_prefix("APP_")
///     .load()?;
/// # Ok::<(), envconfig::EnvConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Loader {
    filepath: Option<Utf8PathBuf>,
    active_profile: Option<String>,
    prefix: String,
    flags: Option<FlagSource>,
}

impl Loader {
    /// Creates a loader that reads only the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `.env` file as the lowest-precedence source.
    #[must_use]
    pub fn with_filepath(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.filepath = Some(path.into());
        self
    }

    /// Reads `<dir>/<profile>.env` instead of the configured file, where
    /// `<dir>` is the directory of the path given to
    /// [`Loader::with_filepath`]. An empty name selects `default`.
    ///
    /// Loading fails with [`EnvConfigError::IncompatibleOptions`] when no
    /// filepath is configured.
    #[must_use]
    pub fn with_active_profile(mut self, profile: impl Into<String>) -> Self {
        let name = profile.into();
        self.active_profile = Some(if name.is_empty() {
            DEFAULT_PROFILE.to_owned()
        } else {
            name
        });
        self
    }

    /// Prepends `prefix` to every top-level key lookup, nested keys included.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Adds command-line flags as the highest-precedence source.
    #[must_use]
    pub fn with_flags(mut self, flags: FlagSource) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Applies a single [`LoadOption`].
    #[must_use]
    pub fn with_option(self, option: LoadOption) -> Self {
        match option {
            LoadOption::Filepath(path) => self.with_filepath(path),
            LoadOption::ActiveProfile(profile) => self.with_active_profile(profile),
            LoadOption::Prefix(prefix) => self.with_prefix(prefix),
            LoadOption::Flags(flags) => self.with_flags(flags),
        }
    }

    /// Global key prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Path of the file that will be read, after applying the active profile.
    ///
    /// # Errors
    ///
    /// Returns [`EnvConfigError::IncompatibleOptions`] when a profile is set
    /// without a filepath.
    ///
    /// # Examples
    ///
    /// ```
    /// use envconfig::Loader;
    /// let loader = Loader::new().with_filepath("config/app.env").with_active_profile("");
    /// assert_eq!(
    ///     loader.resolved_filepath()?.as_deref().map(|p| p.as_str()),
    ///     Some("config/default.env"),
    /// );
    /// # Ok::<(), envconfig::EnvConfigError>(())
    /// ```
    pub fn resolved_filepath(&self) -> EnvConfigResult<Option<Utf8PathBuf>> {
        match (&self.filepath, &self.active_profile) {
            (None, Some(_)) => Err(EnvConfigError::IncompatibleOptions {
                option: "active profile",
                requires: "filepath",
            }),
            (None, None) => Ok(None),
            (Some(path), None) => Ok(Some(path.clone())),
            (Some(path), Some(profile)) => {
                Ok(Some(profile_directory(path).join(format!("{profile}.{ENV_EXTENSION}"))))
            }
        }
    }

    /// Reads every configured source and merges them.
    ///
    /// # Errors
    ///
    /// Propagates option validation errors and the first source failure.
    pub fn merged_sources(&self) -> EnvConfigResult<SourceMap> {
        let file = self.resolved_filepath()?.map(EnvFile::new);
        let environment = Environment::new();
        if let Some(env_file) = &file {
            debug!(path = %env_file.path(), "using env file");
        }
        let sources = file
            .as_ref()
            .map(|f| f as &dyn Source)
            .into_iter()
            .chain(std::iter::once(&environment as &dyn Source))
            .chain(self.flags.as_ref().map(|f| f as &dyn Source));
        let merged = merge_sources(sources)?;
        debug!(entries = merged.len(), prefix = %self.prefix, "merged sources");
        Ok(merged)
    }

    /// Fills `config` in place. Fields already holding non-zero values are
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns the first source, option or field error. Fields processed
    /// before a field error keep their new values.
    pub fn set<T: EnvConfig>(&self, config: &mut T) -> EnvConfigResult<()> {
        let merged = self.merged_sources()?;
        populate(config, &merged, &self.prefix)
    }

    /// Builds `T::default()` and fills it.
    ///
    /// # Errors
    ///
    /// See [`Loader::set`].
    pub fn load<T: EnvConfig + Default>(&self) -> EnvConfigResult<T> {
        let mut config = T::default();
        self.set(&mut config)?;
        Ok(config)
    }
}

/// Directory part of `path`; a path ending in a separator is a directory.
fn profile_directory(path: &Utf8Path) -> &Utf8Path {
    if path.as_str().ends_with(['/', std::path::MAIN_SEPARATOR]) {
        path
    } else {
        path.parent().unwrap_or_else(|| Utf8Path::new(""))
    }
}
