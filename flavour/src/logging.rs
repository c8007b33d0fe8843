use std::{fmt, str::FromStr};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown log level '{0}', use a name like DEBUG, INFO or WARNING or an integer")]
pub struct LogLevelError(String);

/// Verbosity given on the command line with `--log`.
///
/// Accepts a mnemonic (case insensitive) or an integer threshold where lower
/// means more verbose. Records at or above the threshold are shown, with
/// DEBUG = 10, INFO = 20, WARNING = 30 and ERROR = 40: 0 is TRACE, 1 to 10
/// DEBUG, 11 to 20 INFO, 21 to 30 WARN and everything above ERROR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(pub LevelFilter);

impl Default for LogLevel {
    fn default() -> Self {
        Self(LevelFilter::WARN)
    }
}

impl FromStr for LogLevel {
    type Err = LogLevelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();

        if let Ok(number) = trimmed.parse::<u32>() {
            let filter = match number {
                0 => LevelFilter::TRACE,
                1..=10 => LevelFilter::DEBUG,
                11..=20 => LevelFilter::INFO,
                21..=30 => LevelFilter::WARN,
                _ => LevelFilter::ERROR,
            };
            return Ok(Self(filter));
        }

        let filter = match trimmed.to_uppercase().as_str() {
            "TRACE" | "NOTSET" => LevelFilter::TRACE,
            "DEBUG" => LevelFilter::DEBUG,
            "INFO" => LevelFilter::INFO,
            "WARN" | "WARNING" => LevelFilter::WARN,
            "ERROR" | "CRITICAL" | "FATAL" => LevelFilter::ERROR,
            "OFF" => LevelFilter::OFF,
            _ => return Err(LogLevelError(value.to_string())),
        };

        Ok(Self(filter))
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Install the global subscriber. Reports go to stdout, so logs are written to stderr.
/// `RUST_LOG` directives take precedence over `level`.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.0.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
