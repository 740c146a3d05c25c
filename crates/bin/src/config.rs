//! Application configuration.
//!
//! Sources, lowest precedence first: built-in defaults, the user config file
//! (`<config dir>/rankboard/config.toml`), `./rankboard.toml`, a file passed
//! with `--config`, and `RANKBOARD_*` environment variables. Nested keys use a
//! double underscore, e.g. `RANKBOARD_ENGINE__DEGENERATE_POLICY=reject`.

use std::path::{Path, PathBuf};

use rankboard::factors::EngineConfig;
use rankboard::output::DashboardConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// File looked up in the working directory.
pub(crate) const LOCAL_FILE: &str = "rankboard.toml";

/// Prefix of configuration environment variables.
pub(crate) const ENV_PREFIX: &str = "RANKBOARD";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// An explicitly requested file does not exist.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    /// A source could not be read or deserialized.
    #[error("invalid configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Documentation page settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct DocumentationSettings {
    /// Note on where the dataset comes from
    pub(crate) data_note: Option<String>,
}

/// Settings for one run of the CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    /// Log filter used when `RUST_LOG` is unset, e.g. `info`
    pub(crate) log_level: Option<String>,
    pub(crate) engine: EngineConfig,
    pub(crate) dashboard: DashboardConfig,
    pub(crate) documentation: DocumentationSettings,
}

impl AppConfig {
    /// Optional files read on every run, lowest precedence first.
    pub(crate) fn default_locations() -> Vec<PathBuf> {
        let mut locations = Vec::new();
        if let Some(dir) = dirs::config_dir() {
            locations.push(dir.join("rankboard").join("config.toml"));
        }
        locations.push(PathBuf::from(LOCAL_FILE));
        locations
    }

    /// Load from the default locations plus an optional explicit file.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_locations(), explicit)
    }

    /// Load from the given optional files, then `explicit`, then the environment.
    pub(crate) fn load_from(
        optional: &[PathBuf],
        explicit: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        for path in optional {
            builder = builder.add_source(config::File::from(path.as_path()).required(false));
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }
}
