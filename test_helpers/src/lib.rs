//! Test helpers shared across crates in the envconfig workspace.
//!
//! - [`env`] serialises mutations of the process environment and restores
//!   prior values through RAII guards.
//! - [`env_file`] writes throwaway `.env` files into temporary directories.

pub mod env;
pub mod env_file;
