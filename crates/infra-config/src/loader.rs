// Configuration loading via the `config` crate

use std::path::{Path, PathBuf};

use batchjob_core::error::{AppError, Result};
use batchjob_core::ServicesConfig;
use config::{Config, Environment, File};
use tracing::{debug, info};

/// Environment variable prefix, e.g. `BATCHJOB_CONDOR__LOG_PATH`
pub const ENV_PREFIX: &str = "BATCHJOB";

const DEFAULT_FILE_NAME: &str = "config.yaml";

/// `<user config dir>/batchjob/config.yaml`, if a config dir exists
pub fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("batchjob").join(DEFAULT_FILE_NAME))
}

/// Load configuration from `path` (or the default location) plus environment.
///
/// An explicit `path` must exist. The default location is optional.
/// Environment variables override file values.
pub fn load_config(path: Option<&Path>) -> Result<ServicesConfig> {
    let env = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__");
    load_with_env(path, env)
}

fn load_with_env(path: Option<&Path>, env: Environment) -> Result<ServicesConfig> {
    let mut builder = Config::builder();

    match path {
        Some(p) => {
            let expanded = PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).into_owned());
            info!(path = %expanded.display(), "Loading configuration file");
            builder = builder.add_source(File::from(expanded).required(true));
        }
        None => {
            if let Some(default) = default_config_path().filter(|p| p.exists()) {
                info!(path = %default.display(), "Loading default configuration file");
                builder = builder.add_source(File::from(default).required(false));
            } else {
                debug!("No configuration file, using defaults and environment");
            }
        }
    }

    builder
        .add_source(env)
        .build()
        .and_then(|cfg| cfg.try_deserialize::<ServicesConfig>())
        .map_err(|e| AppError::Config(e.to_string()))
}
