// Batchjob Infrastructure - Configuration Adapter
// Resolves ServicesConfig from a config file plus environment overrides

mod loader;

pub use loader::{default_config_path, load_config, ENV_PREFIX};
