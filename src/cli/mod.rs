//! Command-line surface
//!
//! Zero required arguments; the only flags are logging controls.

use clap::{Arg, ArgMatches, Command};

use crate::core::config::{LogFormat, ProbeConfig};

pub fn build_cli() -> Command {
    Command::new("winspect")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Locate a window by title and log diagnostics for every top-level window")
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Minimum level to log (RUST_LOG overrides)")
                .value_parser(["trace", "debug", "info", "warn", "error"])
                .default_value("info"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .help("Log line rendering")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
}

/// Assemble the runtime configuration from parsed flags.
///
/// The version string comes from the caller so the binary binds it
/// once at process entry.
pub fn config_from_matches(version: &'static str, matches: &ArgMatches) -> ProbeConfig {
    let mut config = ProbeConfig::new(version);

    if let Some(level) = matches.get_one::<String>("log-level") {
        config.log_level = level.clone();
    }
    if let Some(format) = matches.get_one::<String>("log-format") {
        config.log_format = match format.as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };
    }

    config
}
