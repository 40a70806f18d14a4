//! Example service loading its settings from an env file, the process
//! environment and command-line flags.
//!
//! ```text
//! SERVER_PORT=9000 cargo run --example server -- --config server.env --log-level debug
//! ```

use std::io::{self, Write};
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::{Arg, ArgAction, Command};
use envconfig::{EnvConfig, FlagSource, Loader};
use serde::Deserialize;

/// Request limits, supplied as a JSON document in `SERVER_LIMITS`.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
struct Limits {
    max_body_bytes: u64,
    max_connections: u32,
}

#[derive(Debug, Default, EnvConfig)]
struct Database {
    #[env(key = "URL", default = "postgres://localhost/app")]
    url: String,
    #[env(key = "POOL_SIZE", default = "8")]
    pool_size: u32,
}

#[derive(Debug, Default, EnvConfig)]
struct ServerSettings {
    #[env(key = "HOST", default = "0.0.0.0")]
    host: String,
    #[env(key = "PORT", default = "8080")]
    port: u16,
    #[env(key = "LOG_LEVEL", default = "info")]
    log_level: String,
    #[env(key = "READ_TIMEOUT", default = "30s")]
    read_timeout: Duration,
    #[env(key = "ALLOWED_ORIGINS")]
    allowed_origins: Vec<String>,
    #[env(json = "LIMITS")]
    limits: Limits,
    #[env(prefix = "DB_")]
    database: Database,
}

const PREFIX: &str = "SERVER_";

fn command() -> Command {
    Command::new("server")
        .about("Prints the settings a server would start with")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Env file to read"),
        )
        .arg(
            Arg::new("profile")
                .long("profile")
                .requires("config")
                .help("Read <dir of --config>/<profile>.env instead"),
        )
        .arg(Arg::new("SERVER_PORT").long("port").help("Listening port"))
        .arg(Arg::new("SERVER_LOG_LEVEL").long("log-level").help("Log level"))
        .arg(
            Arg::new("SERVER_ALLOWED_ORIGINS")
                .long("origin")
                .action(ArgAction::Append)
                .help("Allowed CORS origin; repeatable"),
        )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = command().try_get_matches()?;
    let mut loader = Loader::new()
        .with_prefix(PREFIX)
        .with_flags(FlagSource::from_matches(&matches));
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_filepath(Utf8PathBuf::from(path));
    }
    if let Some(profile) = matches.get_one::<String>("profile") {
        loader = loader.with_active_profile(profile.as_str());
    }

    let settings: ServerSettings = loader.load()?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "listening on {}:{}", settings.host, settings.port)?;
    writeln!(stdout, "log level: {}", settings.log_level)?;
    writeln!(stdout, "read timeout: {}", humantime::format_duration(settings.read_timeout))?;
    writeln!(stdout, "allowed origins: {:?}", settings.allowed_origins)?;
    writeln!(
        stdout,
        "limits: {} bytes, {} connections",
        settings.limits.max_body_bytes, settings.limits.max_connections
    )?;
    writeln!(
        stdout,
        "database: {} (pool {})",
        settings.database.url, settings.database.pool_size
    )?;
    Ok(())
}
