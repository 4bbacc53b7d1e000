//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator, RuntimeEnvironment};
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use roster_core::{RosterError, RosterResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Variable selecting the runtime environment.
pub const ENVIRONMENT_VAR: &str = "ROSTER_ENVIRONMENT";

/// Legacy variable holding the database URL.
pub const LEGACY_DB_URI_VAR: &str = "DB_URI";

/// Legacy variable holding the listen port.
pub const LEGACY_PORT_VAR: &str = "PORT";

/// Configuration loader with layered sources.
///
/// Configuration is loaded from multiple sources, later ones winning:
/// 1. `config/default.toml` - Default values
/// 2. `config/{environment}.toml` - Environment-specific overrides
/// 3. `config/local.toml` - Local overrides, not committed
/// 4. Environment variables with `ROSTER_` prefix (`ROSTER_DATABASE__URL`)
/// 5. Legacy `DB_URI` and `PORT` variables
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    environment: RuntimeEnvironment,
    /// Explicit variables; `None` reads the process environment.
    vars: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    /// Creates a loader reading the process environment.
    ///
    /// `.env.<environment>` and then `.env` are loaded from the working
    /// directory when present. Neither overrides a variable that is
    /// already set, so the environment-specific file wins over `.env`.
    /// Fails if `ROSTER_ENVIRONMENT` names an unknown environment.
    pub fn new(config_dir: impl Into<PathBuf>) -> RosterResult<Self> {
        let dotenv_dir = Path::new(".");
        let environment = resolve_environment(dotenv_dir)?;
        load_dotenv_files(dotenv_dir, environment);

        Ok(Self {
            config_dir: config_dir.into(),
            environment,
            vars: None,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> RosterResult<Self> {
        Self::new("./config")
    }

    /// Creates a loader that reads variables from `vars` instead of the
    /// process environment. No `.env` files are loaded.
    pub fn with_vars(config_dir: impl Into<PathBuf>, vars: HashMap<String, String>) -> RosterResult<Self> {
        let environment = parse_environment(vars.get(ENVIRONMENT_VAR).cloned())?;
        Ok(Self {
            config_dir: config_dir.into(),
            environment,
            vars: Some(vars),
        })
    }

    /// Returns the selected runtime environment.
    #[must_use]
    pub const fn environment(&self) -> RuntimeEnvironment {
        self.environment
    }

    /// Builds, deserializes, and validates the configuration.
    pub fn load(&self) -> RosterResult<AppConfig> {
        info!("Loading configuration for environment: {}", self.environment);

        let builder = self
            .builder()
            .map_err(config_error_to_roster_error)?;

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_roster_error)?;

        ConfigValidator::validate(&app_config)
            .map_err(|errors| RosterError::Configuration(format_validation_errors(&errors)))?;

        debug!(
            "Configuration loaded: server={}, backend={:?}",
            app_config.server.addr(),
            app_config.database.backend()
        );

        Ok(app_config)
    }

    fn builder(&self) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let mut builder = Config::builder();

        for name in ["default", self.environment.as_str(), "local"] {
            let path = self.config_dir.join(format!("{name}.toml"));
            builder = add_file_if_present(builder, &path);
        }

        builder = builder.add_source(
            Environment::with_prefix("ROSTER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.cors_origins")
                .source(self.vars.clone()),
        );

        let port = self
            .var(LEGACY_PORT_VAR)
            .map(|value| {
                value.trim().parse::<u16>().map_err(|_| {
                    ConfigError::Message(format!("{LEGACY_PORT_VAR} must be a port number, got '{value}'"))
                })
            })
            .transpose()?;

        builder
            .set_override("app.environment", self.environment.as_str())?
            .set_override_option("database.url", self.var(LEGACY_DB_URI_VAR))?
            .set_override_option("server.port", port.map(i64::from))
    }

    fn var(&self, key: &str) -> Option<String> {
        let value = match &self.vars {
            Some(vars) => vars.get(key).cloned(),
            None => std::env::var(key).ok(),
        };
        value.filter(|value| !value.is_empty())
    }
}

fn add_file_if_present(builder: ConfigBuilder<DefaultState>, path: &Path) -> ConfigBuilder<DefaultState> {
    if path.exists() {
        debug!("Loading config from: {}", path.display());
        builder.add_source(File::from(path).required(false))
    } else {
        builder
    }
}

/// Reads `ROSTER_ENVIRONMENT` from the process, falling back to the value
/// in `<dir>/.env` without loading that file.
fn resolve_environment(dir: &Path) -> RosterResult<RuntimeEnvironment> {
    let value = std::env::var(ENVIRONMENT_VAR)
        .ok()
        .or_else(|| dotenv_value(&dir.join(".env"), ENVIRONMENT_VAR));
    parse_environment(value)
}

fn dotenv_value(path: &Path, key: &str) -> Option<String> {
    dotenvy::from_path_iter(path)
        .ok()?
        .filter_map(Result::ok)
        .find_map(|(k, v)| (k == key).then_some(v))
}

/// Loads `<dir>/.env.<environment>` before `<dir>/.env`.
fn load_dotenv_files(dir: &Path, environment: RuntimeEnvironment) {
    for path in [dir.join(format!(".env.{environment}")), dir.join(".env")] {
        if let Err(e) = dotenvy::from_path(&path) {
            debug!("Skipping {}: {}", path.display(), e);
        }
    }
}

fn parse_environment(value: Option<String>) -> RosterResult<RuntimeEnvironment> {
    match value {
        Some(value) if !value.trim().is_empty() => value
            .parse()
            .map_err(|e: String| RosterError::Configuration(format!("{ENVIRONMENT_VAR}: {e}"))),
        _ => Ok(RuntimeEnvironment::default()),
    }
}

fn config_error_to_roster_error(err: ConfigError) -> RosterError {
    RosterError::Configuration(err.to_string())
}
