// Step Domain Model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::container::Container;
use super::metadata::{FileMetadata, MetadataArgs};
use super::quote::quote;

/// Multiplicity value marking a directory input or output
pub const COLLECTION: &str = "collection";

/// The runnable unit of a step
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Component {
    /// Category tag, e.g. "executable"
    #[serde(rename = "type")]
    pub component_type: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
}

impl Component {
    /// Full path of the executable (`location/name`)
    pub fn executable(&self) -> String {
        if self.location.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.location.trim_end_matches('/'), self.name)
        }
    }
}

/// File staged into the working directory before a step runs
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepInput {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub multiplicity: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub property: String,
    /// false: excluded from the final output transfer
    #[serde(default)]
    pub retain: bool,
    #[serde(default, rename = "type")]
    pub input_type: String,
    /// Remote path of the file or collection
    pub value: String,
}

impl StepInput {
    fn is_collection(&self) -> bool {
        self.multiplicity == COLLECTION
    }

    /// Remote path to download, with a trailing `/` for collections
    pub fn irods_path(&self) -> String {
        if self.is_collection() && !self.value.ends_with('/') {
            format!("{}/", self.value)
        } else {
            self.value.clone()
        }
    }

    /// Local name of the downloaded file: the base name of `value`
    pub fn source(&self) -> String {
        let base = self
            .value
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        if self.is_collection() {
            format!("{}/", base)
        } else {
            base.to_string()
        }
    }

    /// Download ("get") arguments for the transfer tool
    pub fn arguments(&self, user: &str, config: &str, metadata: &[FileMetadata]) -> Vec<String> {
        let mut args = vec![
            "get".to_string(),
            "--user".to_string(),
            user.to_string(),
            "--source".to_string(),
            self.irods_path(),
            "--config".to_string(),
            config.to_string(),
        ];
        args.extend(metadata.file_metadata_arguments());
        args
    }
}

/// File a step produces in the working directory
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepOutput {
    #[serde(default)]
    pub multiplicity: String,
    /// Path relative to the working directory
    pub name: String,
    #[serde(default)]
    pub property: String,
    #[serde(default, rename = "qual-id")]
    pub qual_id: String,
    /// false: excluded from the final output transfer
    #[serde(default)]
    pub retain: bool,
    #[serde(default, rename = "type")]
    pub output_type: String,
}

impl StepOutput {
    pub fn source(&self) -> &str {
        &self.name
    }
}

/// Command-line parameter of a step
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepParam {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub order: i32,
}

/// Inputs, outputs and parameters of a step
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepConfig {
    #[serde(default, rename = "input")]
    pub inputs: Vec<StepInput>,
    #[serde(default, rename = "output")]
    pub outputs: Vec<StepOutput>,
    #[serde(default)]
    pub params: Vec<StepParam>,
}

/// Resource hints for the scheduler. Absent values count as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StepResources {
    pub cpu_cores: Option<f32>,
    pub memory_mb: Option<i64>,
    pub disk_mb: Option<i64>,
}

/// One ordered unit of work within a job
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Step {
    pub component: Component,
    #[serde(default)]
    pub config: StepConfig,
    #[serde(default)]
    pub container: Option<Container>,
    #[serde(default)]
    pub resources: Option<StepResources>,
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
    #[serde(default, rename = "stdin")]
    pub stdin_path: Option<String>,
    #[serde(default, rename = "stdout")]
    pub stdout_path: Option<String>,
    #[serde(default, rename = "stderr")]
    pub stderr_path: Option<String>,
    #[serde(default, rename = "log-file")]
    pub log_file: Option<String>,
}

impl Step {
    pub fn cpu_cores(&self) -> f32 {
        self.resources.and_then(|r| r.cpu_cores).unwrap_or(0.0)
    }

    pub fn memory_mb(&self) -> i64 {
        self.resources.and_then(|r| r.memory_mb).unwrap_or(0)
    }

    pub fn disk_mb(&self) -> i64 {
        self.resources.and_then(|r| r.disk_mb).unwrap_or(0)
    }

    /// Parameters ordered by `order` (declaration order for ties), names
    /// before values, empty strings skipped
    pub fn arguments(&self) -> Vec<String> {
        let mut params: Vec<&StepParam> = self.config.params.iter().collect();
        params.sort_by_key(|p| p.order);

        params
            .into_iter()
            .flat_map(|p| [p.name.as_str(), p.value.as_str()])
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Executable followed by its quoted arguments
    pub fn command_line(&self) -> String {
        std::iter::once(self.component.executable())
            .chain(self.arguments().iter().map(|a| quote(a)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `KEY='VALUE'` pairs in key order
    pub fn environment_string(&self) -> String {
        self.environment
            .iter()
            .map(|(k, v)| format!("{}={}", k, quote(v)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
