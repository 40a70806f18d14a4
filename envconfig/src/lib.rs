//! Populate typed configuration records from `.env` files, the process
//! environment and command-line flags.
//!
//! Records derive [`EnvConfig`] and describe each field with `#[env(...)]`:
//!
//! ```
//! use std::time::Duration;
//! use envconfig::{EnvConfig, SourceMap, populate};
//!
//! #[derive(Debug, Default, EnvConfig)]
//! struct Database {
//!     #[env(key = "URL", required)]
//!     url: String,
//! }
//!
//! #[derive(Debug, Default, EnvConfig)]
//! struct Settings {
//!     #[env(key = "PORT", default = "8080")]
//!     port: u16,
//!     #[env(key = "TIMEOUT", default = "30s")]
//!     timeout: Duration,
//!     #[env(key = "HOSTS")]
//!     hosts: Vec<String>,
//!     #[env(prefix = "DB_")]
//!     database: Database,
//! }
//!
//! let map: SourceMap = [
//!     ("HOSTS", "a.example, b.example"),
//!     ("DNS", "db.example"),
//!     ("DB_URL", "postgres://${DNS}/app"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let mut settings = Settings::default();
//! populate(&mut settings, &map, "")?;
//! assert_eq!(settings.port, 8080);
//! assert_eq!(settings.timeout, Duration::from_secs(30));
//! assert_eq!(settings.hosts, ["a.example", "b.example"]);
//! assert_eq!(settings.database.url, "postgres://db.example/app");
//! # Ok::<(), envconfig::EnvConfigError>(())
//! ```
//!
//! [`Loader`] and [`set`] read the real sources: an optional `.env` file,
//! then the process environment, then explicitly supplied flags, with later
//! sources taking precedence.

pub use envconfig_macros::EnvConfig;

pub mod coerce;
mod descriptor;
mod error;
pub mod interpolate;
mod loader;
mod populate;
mod source;

pub use descriptor::{
    CustomDecoder, EnvConfig, FieldDescriptor, FieldKind, FieldTags, JsonAccessor, JsonTarget,
    Record, RecordAccessor, ValueAccessor, ZeroCheck,
};
pub use error::{BoxError, EnvConfigError, EnvConfigResult};
pub use loader::{
    DEFAULT_PROFILE, LoadOption, Loader, set, with_active_profile, with_filepath, with_flags,
    with_prefix,
};
pub use populate::{Populator, populate};
pub use source::{
    ENV_EXTENSION, EnvFile, Environment, FlagSource, Source, SourceMap, merge_sources,
};
