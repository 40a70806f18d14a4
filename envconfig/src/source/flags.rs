//! Command-line flag reader built on `clap`.

use std::ffi::OsString;

use clap::parser::ValueSource;
use clap::{ArgMatches, Command};
use tracing::{debug, trace};

use super::{Source, SourceMap};
use crate::{EnvConfigError, EnvConfigResult};

const VALUE_SEPARATOR: &str = ",";

/// Flags explicitly supplied on the command line.
///
/// Arguments that only hold a default (or were filled from an environment
/// variable by `clap`) are excluded, so they never override lower-precedence
/// sources. The key of each entry is the argument id. Repeated values are
/// joined with `,` so they can feed sequence fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSource {
    entries: SourceMap,
}

impl FlagSource {
    /// Collects explicitly supplied values from parsed `matches`.
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::{Arg, Command};
    /// use envconfig::FlagSource;
    ///
    /// let command = Command::new("demo")
    ///     .arg(Arg::new("PORT").long("port"))
    ///     .arg(Arg::new("HOST").long("host").default_value("localhost"));
    /// let matches = command.get_matches_from(["demo", "--port", "9000"]);
    /// let flags = FlagSource::from_matches(&matches);
    /// assert_eq!(flags.entries().get("PORT"), Some("9000"));
    /// assert_eq!(flags.entries().get("HOST"), None);
    /// ```
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let mut entries = SourceMap::new();
        for id in matches.ids() {
            let name = id.as_str();
            if matches.value_source(name) != Some(ValueSource::CommandLine) {
                trace!(flag = name, "skipping flag not set on the command line");
                continue;
            }
            let Ok(Some(raw)) = matches.try_get_raw(name) else {
                continue;
            };
            let joined = raw
                .map(|value| value.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(VALUE_SEPARATOR);
            entries.insert(name, joined);
        }
        Self { entries }
    }

    /// Parses `args` against `command` and collects the supplied flags.
    ///
    /// The first item of `args` is the binary name, as with
    /// [`Command::try_get_matches_from`].
    ///
    /// # Errors
    ///
    /// Returns [`EnvConfigError::CliParsing`] when `clap` rejects the
    /// arguments, including help and version requests.
    pub fn parse_from<I, T>(command: Command, args: I) -> EnvConfigResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command
            .try_get_matches_from(args)
            .map_err(EnvConfigError::from)?;
        Ok(Self::from_matches(&matches))
    }

    /// Collected entries.
    #[must_use]
    pub const fn entries(&self) -> &SourceMap {
        &self.entries
    }
}

impl Source for FlagSource {
    fn describe(&self) -> String {
        format!("command-line flags ({} set)", self.entries.len())
    }

    fn load(&self) -> EnvConfigResult<SourceMap> {
        debug!(entries = self.entries.len(), "using command-line flags");
        Ok(self.entries.clone())
    }
}
