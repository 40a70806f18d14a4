//! Functional options mirroring the builder methods.

use camino::Utf8PathBuf;

use super::Loader;
use crate::source::FlagSource;
use crate::{EnvConfig, EnvConfigResult};

/// One loader setting, for callers that assemble options dynamically.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum LoadOption {
    /// See [`Loader::with_filepath`].
    Filepath(Utf8PathBuf),
    /// See [`Loader::with_active_profile`].
    ActiveProfile(String),
    /// See [`Loader::with_prefix`].
    Prefix(String),
    /// See [`Loader::with_flags`].
    Flags(FlagSource),
}

/// Option adding a `.env` file source.
#[must_use]
pub fn with_filepath(path: impl Into<Utf8PathBuf>) -> LoadOption {
    LoadOption::Filepath(path.into())
}

/// Option selecting `<dir>/<profile>.env`.
#[must_use]
pub fn with_active_profile(profile: impl Into<String>) -> LoadOption {
    LoadOption::ActiveProfile(profile.into())
}

/// Option setting the global key prefix.
#[must_use]
pub fn with_prefix(prefix: impl Into<String>) -> LoadOption {
    LoadOption::Prefix(prefix.into())
}

/// Option adding command-line flags.
#[must_use]
pub const fn with_flags(flags: FlagSource) -> LoadOption {
    LoadOption::Flags(flags)
}

/// Reads every source described by `options` and fills `config`.
///
/// Options may appear in any order; later options of the same kind replace
/// earlier ones.
///
/// # Errors
///
/// See [`Loader::set`].
///
/// # Examples
///
/// ```
/// use envconfig::{EnvConfig, set, with_prefix};
///
/// #[derive(Debug, Default, EnvConfig)]
/// struct Settings {
///     #[env(key = "ENVCONFIG_DOC_UNSET_NAME", default = "demo")]
///     name: String,
/// }
///
/// let mut settings = Settings::default();
/// set(&mut settings, [with_prefix("")])?;
/// assert_eq!(settings.name, "demo");
/// # Ok::<(), envconfig::EnvConfigError>(())
/// ```
pub fn set<T, I>(config: &mut T, options: I) -> EnvConfigResult<()>
where
    T: EnvConfig,
    I: IntoIterator<Item = LoadOption>,
{
    options
        .into_iter()
        .fold(Loader::new(), Loader::with_option)
        .set(config)
}
