//! Runtime configuration, resolved once at process entry

/// Title the probe looks for when none is configured otherwise.
pub const DEFAULT_TARGET_TITLE: &str = "World of Warcraft";

/// Rendering of the log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Everything the probe needs to know about its environment.
///
/// The version string is a build-time constant bound by the caller
/// (`env!("CARGO_PKG_VERSION")` in the binary) rather than read from any
/// global, so library users and tests can inject their own.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub version: &'static str,
    pub target_title: String,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl ProbeConfig {
    pub fn new(version: &'static str) -> Self {
        Self {
            version,
            target_title: DEFAULT_TARGET_TITLE.to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ProbeConfig::new("0.1.0");
        assert_eq!(config.version, "0.1.0");
        assert_eq!(config.target_title, DEFAULT_TARGET_TITLE);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
    }
}
