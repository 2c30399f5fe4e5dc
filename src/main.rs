//! vargs
//!
//! Sends each item read from stdin to the terminal as an OSC 51 message.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vargs::message::OscSink;
use vargs::{CliArgs, Config};

fn main() -> ExitCode {
    // Initialize logging; stdout carries only messages
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = match Config::from_args(CliArgs::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(warning) = config.missing_marker_warning() {
        eprintln!("{}", warning);
    }

    tracing::debug!("Separators: {:?}", config.separators().chars());
    tracing::debug!("Template: {:?}", config.template().args());

    let stdin = io::stdin();
    let report = vargs::run(&config, stdin.lock(), OscSink::new(io::stdout()));

    for e in report.errors() {
        eprintln!("{}", e);
    }

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
