//! Application glue module
//!
//! Command line arguments and the resolved run configuration.

mod config;

pub use config::{CliArgs, Config};
