// Batchjob Core - Job model, derivations & ports
// NO infrastructure dependencies

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

pub use config::ServicesConfig;
pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
