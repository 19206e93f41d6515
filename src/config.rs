use std::str::FromStr;

use log::LevelFilter;

use crate::cli::Args;

/// Label a container must carry, set to `"true"`, to be watched.
pub const WATCH_LABEL: &str = "knom.dockWatch.watchHealth";

/// Number of log lines attached to each notification.
pub const LOG_TAIL_LINES: usize = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("WEBHOOK_URL environment variable is not set")]
    MissingWebhookUrl,
    #[error("Invalid WEBHOOK_URL {0:?}: must start with http or https")]
    InvalidWebhookUrl(String),
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

/// Accepted values of `LOGLEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" => Ok(LogLevel::Critical),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warning => LevelFilter::Warn,
            // `log` has nothing above error
            LogLevel::Error | LogLevel::Critical => LevelFilter::Error,
        }
    }
}

/// Process-wide settings, validated once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    pub webhook_url: String,
    pub log_level: LogLevel,
    pub watch_label: String,
    pub log_tail: usize,
}

impl NotifierConfig {
    pub fn try_from_args(args: &Args) -> Result<Self, ConfigError> {
        let log_level = args.log_level.parse()?;

        let webhook_url = args
            .webhook_url
            .clone()
            .ok_or(ConfigError::MissingWebhookUrl)?;
        if !webhook_url.starts_with("http") {
            return Err(ConfigError::InvalidWebhookUrl(webhook_url));
        }

        Ok(Self {
            webhook_url,
            log_level,
            watch_label: WATCH_LABEL.to_string(),
            log_tail: LOG_TAIL_LINES,
        })
    }

    /// Install the global logger. `RUST_LOG` may refine per-module filters
    /// on top of the configured level.
    pub fn init_logger(&self) {
        env_logger::Builder::new()
            .filter_level(self.log_level.into())
            .parse_default_env()
            .target(env_logger::Target::Stdout)
            .init();
    }
}
