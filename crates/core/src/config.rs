// Service configuration consumed by job assembly
//
// Loading (files, environment) lives in batchjob-infra-config; the core only
// sees the resolved values.

use serde::{Deserialize, Serialize};

/// All configuration values the core reads
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub condor: CondorConfig,
    pub irods: IrodsConfig,
}

/// Scheduler-side settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CondorConfig {
    /// Base directory for per-job scheduler logs
    pub log_path: String,
    /// Comma-separated names always excluded from the output upload
    pub filter_files: String,
    /// Jobs run on a shared filesystem
    pub run_on_nfs: bool,
    pub nfs_base: String,
    /// Image tag of the data transfer tool
    pub porklock_tag: String,
}

impl CondorConfig {
    /// `filter_files` split on commas, trimmed, empty entries dropped
    pub fn filter_file_list(&self) -> Vec<String> {
        self.filter_files
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Remote data store settings
#[derive(Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IrodsConfig {
    /// Base collection for default output directories
    pub base: String,
    pub host: String,
    pub port: String,
    pub user: String,
    pub pass: String,
    pub zone: String,
    pub resc: String,
}

impl std::fmt::Debug for IrodsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IrodsConfig")
            .field("base", &self.base)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .field("zone", &self.zone)
            .field("resc", &self.resc)
            .finish()
    }
}
