//! Structured logging configuration.

use std::path::PathBuf;
use std::str::FromStr;

/// Filter used when neither `--verbose` nor `RUST_LOG` is given.
pub const DEFAULT_FILTER: &str = "fieldstore=info";

/// Filter used with `--verbose`.
pub const VERBOSE_FILTER: &str = "fieldstore=debug";

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, multi-line.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(crate::Error::InvalidInput(format!(
                "unknown log format '{other}' (expected pretty or json)"
            ))),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Line format.
    pub format: LogFormat,
    /// `EnvFilter` directive string.
    pub filter: String,
    /// Append to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: DEFAULT_FILTER.to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Builds logging configuration from the process environment.
    ///
    /// | Variable | Effect |
    /// |----------|--------|
    /// | `RUST_LOG` | Filter directive (ignored with `--verbose`) |
    /// | `FIELDSTORE_LOG_FORMAT` | `pretty` or `json` |
    /// | `FIELDSTORE_LOG_FILE` | Append logs to this file |
    #[must_use]
    pub fn from_env(verbose: bool) -> Self {
        Self::from_lookup(verbose, |key| std::env::var(key).ok())
    }

    /// Builds logging configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(verbose: bool, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let filter = if verbose {
            VERBOSE_FILTER.to_string()
        } else {
            lookup("RUST_LOG")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FILTER.to_string())
        };
        let format = lookup("FIELDSTORE_LOG_FORMAT")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let file = lookup("FIELDSTORE_LOG_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Self {
            format,
            filter,
            file,
        }
    }
}
