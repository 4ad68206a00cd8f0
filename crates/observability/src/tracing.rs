//! Tracing/logging initialization.
//!
//! Configured from the environment:
//!
//! - `RUST_LOG`: filter directives (default `info`)
//! - `ROLEPROXY_LOG_FORMAT`: `json` (default) or `pretty`

use core::str::FromStr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const LOG_FORMAT_ENV: &str = "ROLEPROXY_LOG_FORMAT";
const DEFAULT_FILTER: &str = "info";

/// Output format of the fmt subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown log format {0:?} (expected \"json\" or \"pretty\")")]
pub struct ParseLogFormatError(pub String);

impl FromStr for LogFormat {
    type Err = ParseLogFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(ParseLogFormatError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// `EnvFilter` directives, e.g. `info,roleproxy_adapter=debug`.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
        }
    }
}

impl TracingConfig {
    /// Read `RUST_LOG` and `ROLEPROXY_LOG_FORMAT`, falling back to defaults.
    ///
    /// Also returns the format rejection, if any, so it can be logged once a
    /// subscriber exists.
    fn from_env_checked() -> (Self, Option<ParseLogFormatError>) {
        Self::from_vars(
            std::env::var("RUST_LOG").ok(),
            std::env::var(LOG_FORMAT_ENV).ok(),
        )
    }

    pub fn from_env() -> Self {
        Self::from_env_checked().0
    }

    fn from_vars(filter: Option<String>, format: Option<String>) -> (Self, Option<ParseLogFormatError>) {
        let filter = filter
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());

        let (format, rejected) = match format.as_deref().map(str::parse::<LogFormat>) {
            None => (LogFormat::default(), None),
            Some(Ok(format)) => (format, None),
            Some(Err(err)) => (LogFormat::default(), Some(err)),
        };

        (Self { filter, format }, rejected)
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize tracing from the environment.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let (config, rejected) = TracingConfig::from_env_checked();
    init_with(&config);
    if let Some(err) = rejected {
        ::tracing::warn!(error = %err, "falling back to json logs");
    }
}

/// Initialize tracing with an explicit configuration.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_with(config: &TracingConfig) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let (config, rejected) = TracingConfig::from_vars(None, None);

        assert_eq!(config, TracingConfig::default());
        assert_eq!(config.filter, "info");
        assert!(rejected.is_none());
    }

    #[test]
    fn format_is_case_insensitive() {
        let (config, _) = TracingConfig::from_vars(
            Some("roleproxy_adapter=debug".into()),
            Some("Pretty".into()),
        );

        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.filter, "roleproxy_adapter=debug");
    }

    #[test]
    fn unknown_format_falls_back_to_json() {
        let (config, rejected) = TracingConfig::from_vars(None, Some("xml".into()));

        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(rejected, Some(ParseLogFormatError("xml".into())));
    }

    #[test]
    fn blank_filter_uses_default() {
        let (config, _) = TracingConfig::from_vars(Some("  ".into()), None);
        assert_eq!(config.filter, "info");
    }

    #[test]
    fn second_init_is_a_no_op() {
        let config = TracingConfig {
            filter: "off".into(),
            format: LogFormat::Pretty,
        };
        init_with(&config);
        assert!(!init_with(&config));
    }
}
