//! Runtime environment, storage backend, and log format selectors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment the service runs in.
///
/// Each environment can carry its own `.env.<environment>` and
/// `config/<environment>.toml` overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Local development.
    #[default]
    Development,
    /// Release candidate builds.
    Release,
    /// Production deployment.
    Production,
}

impl RuntimeEnvironment {
    /// Returns the lowercase name used in file names and variables.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Release => "release",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for RuntimeEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuntimeEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "release" => Ok(Self::Release),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "unknown environment '{other}' (expected development, release, or production)"
            )),
        }
    }
}

/// Storage backend selected by the database URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    /// MySQL through an SQLx pool (`mysql://`).
    MySql,
    /// Process-local storage (`memory://`).
    Memory,
}

impl DatabaseBackend {
    /// URL schemes accepted for `database.url`.
    pub const SUPPORTED_SCHEMES: &'static [&'static str] = &["mysql", "memory"];

    /// Maps a URL scheme to a backend.
    #[must_use]
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "mysql" => Some(Self::MySql),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

impl fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MySql => write!(f, "mysql"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}
