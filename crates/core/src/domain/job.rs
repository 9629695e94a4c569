// Job Domain Model

use std::collections::HashSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::container::{ContainerImage, VolumesFrom};
use super::error::DomainError;
use super::interapps::InteractiveApps;
use super::metadata::{FileMetadata, MetadataArgs};
use super::quote::double_quote;
use super::step::{Step, StepInput, StepOutput};

/// Config file for the transfer tool, relative to the job working directory
pub const IRODS_CONFIG_PATH: &str = "logs/irods-config";

/// Exclude token for the job log directory
pub const LOGS_DIR: &str = "logs";

/// Namespace prefix for user group entries
pub const GROUPS_PREFIX: &str = "groups:";

/// Metadata attribute carrying the app id
pub const ANALYSIS_ID_ATTR: &str = "ipc-analysis-id";

/// Metadata attribute carrying the invocation id
pub const EXECUTION_ID_ATTR: &str = "ipc-execution-id";

/// Where the job runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionTarget {
    #[default]
    Condor,
    /// Alternate grid: container images carry an extra image path
    Osg,
    Interapps,
}

impl std::fmt::Display for ExecutionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionTarget::Condor => write!(f, "condor"),
            ExecutionTarget::Osg => write!(f, "osg"),
            ExecutionTarget::Interapps => write!(f, "interapps"),
        }
    }
}

impl FromStr for ExecutionTarget {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "condor" => Ok(ExecutionTarget::Condor),
            "osg" => Ok(ExecutionTarget::Osg),
            "interapps" => Ok(ExecutionTarget::Interapps),
            other => Err(DomainError::UnknownExecutionTarget(other.to_string())),
        }
    }
}

/// Job aggregate: a multi-step submission plus the configuration values it
/// was assembled with.
///
/// `app_id`, `invocation_id` and the construction timestamp are fixed at
/// construction. Step order is execution order and is the iteration order
/// of every aggregation below.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    app_id: String,
    invocation_id: String,
    now_date: String,

    pub name: String,
    pub submitter: String,
    pub email: String,
    pub user_id: Option<String>,
    pub description: String,
    pub app_description: String,
    pub app_name: String,
    pub wiki_url: String,
    pub request_type: String,
    pub app_type: String,
    pub execution_target: ExecutionTarget,
    pub output_dir: String,
    pub create_output_subdir: bool,
    pub archive_logs: bool,
    pub skip_parent_metadata: bool,
    pub notify: bool,
    pub user_groups: Vec<String>,
    pub file_metadata: Vec<FileMetadata>,
    pub steps: Vec<Step>,
    pub interactive_apps: Option<InteractiveApps>,

    // Copied from configuration at construction
    pub irods_base: String,
    pub log_path: String,
    pub filter_files: Vec<String>,
    pub run_on_nfs: bool,
}

impl Job {
    /// Create a job with no steps and default flags
    ///
    /// # Arguments
    ///
    /// * `app_id` - App identifier (immutable)
    /// * `invocation_id` - Invocation identifier (immutable)
    /// * `name` - Analysis name, first half of the directory name
    /// * `submitter` - Submitting user
    /// * `now_millis` - Construction time in epoch ms (injected, not system time)
    pub fn new(
        app_id: impl Into<String>,
        invocation_id: impl Into<String>,
        name: impl Into<String>,
        submitter: impl Into<String>,
        now_millis: i64,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            invocation_id: invocation_id.into(),
            now_date: format_now_date(now_millis),
            name: name.into(),
            submitter: submitter.into(),
            email: String::new(),
            user_id: None,
            description: String::new(),
            app_description: String::new(),
            app_name: String::new(),
            wiki_url: String::new(),
            request_type: String::new(),
            app_type: String::new(),
            execution_target: ExecutionTarget::Condor,
            output_dir: String::new(),
            create_output_subdir: false,
            archive_logs: true,
            skip_parent_metadata: false,
            notify: false,
            user_groups: Vec::new(),
            file_metadata: Vec::new(),
            steps: Vec::new(),
            interactive_apps: None,
            irods_base: String::new(),
            log_path: String::new(),
            filter_files: Vec::new(),
            run_on_nfs: false,
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn invocation_id(&self) -> &str {
        &self.invocation_id
    }

    /// Timestamp captured at construction
    pub fn now_date(&self) -> &str {
        &self.now_date
    }

    /// `<name>-<now_date>`, stable for the lifetime of the job
    pub fn directory_name(&self) -> String {
        format!("{}-{}", self.name, self.now_date)
    }

    /// Per-job scheduler log directory, with a trailing separator
    pub fn condor_log_directory(&self) -> String {
        let dir = join_path(&[&self.log_path, &self.submitter, &self.directory_name()]);
        format!("{}/", dir)
    }

    pub fn irods_config(&self) -> &'static str {
        IRODS_CONFIG_PATH
    }

    /// Destination collection for the final upload
    pub fn output_directory(&self) -> String {
        if self.output_dir.is_empty() {
            join_path(&[
                &self.irods_base,
                &self.submitter,
                "analyses",
                &self.directory_name(),
            ])
        } else if self.create_output_subdir {
            join_path(&[&self.output_dir, &self.directory_name()])
        } else {
            self.output_dir
                .strip_suffix('/')
                .unwrap_or(&self.output_dir)
                .to_string()
        }
    }

    /// `{"groups:a","groups:b"}`, or `{}` when there are no groups
    pub fn format_user_groups(&self) -> String {
        let groups: Vec<String> = self
            .user_groups
            .iter()
            .map(|g| double_quote(&format!("{}{}", GROUPS_PREFIX, g)))
            .collect();
        format!("{{{}}}", groups.join(","))
    }

    pub fn file_metadata_arguments(&self) -> Vec<String> {
        self.file_metadata.file_metadata_arguments()
    }

    /// Append the analysis and execution id entries.
    ///
    /// Append-only: calling this twice adds the entries twice.
    pub fn add_required_metadata(&mut self) {
        self.file_metadata.push(FileMetadata::new(
            ANALYSIS_ID_ATTR,
            self.app_id.clone(),
            "UUID",
        ));
        self.file_metadata.push(FileMetadata::new(
            EXECUTION_ID_ATTR,
            self.invocation_id.clone(),
            "UUID",
        ));
    }

    /// Sum of declared CPU cores across steps
    pub fn cpu_request(&self) -> f32 {
        self.steps.iter().map(Step::cpu_cores).sum()
    }

    /// Sum of declared memory (MB) across steps
    pub fn memory_request(&self) -> i64 {
        self.steps.iter().map(Step::memory_mb).sum()
    }

    /// Sum of declared disk (MB) across steps
    pub fn disk_request(&self) -> i64 {
        self.steps.iter().map(Step::disk_mb).sum()
    }

    /// Every step's inputs, in step order
    pub fn inputs(&self) -> impl Iterator<Item = &StepInput> {
        self.steps.iter().flat_map(|s| s.config.inputs.iter())
    }

    /// Every step's outputs, in step order
    pub fn outputs(&self) -> impl Iterator<Item = &StepOutput> {
        self.steps.iter().flat_map(|s| s.config.outputs.iter())
    }

    /// Paths the final upload must skip.
    ///
    /// Order: non-retained inputs, non-retained outputs, `logs` when logs
    /// are not archived, then the configured filter files.
    pub fn exclude_arguments(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .inputs()
            .filter(|i| !i.retain)
            .map(StepInput::source)
            .collect();

        paths.extend(
            self.outputs()
                .filter(|o| !o.retain)
                .map(|o| o.source().to_string()),
        );

        if !self.archive_logs {
            paths.push(LOGS_DIR.to_string());
        }

        paths.extend(self.filter_files.iter().cloned());
        paths
    }

    /// Distinct container images in first-seen step order
    pub fn container_images(&self) -> Vec<ContainerImage> {
        let mut seen = HashSet::new();
        let mut images = Vec::new();

        for container in self.steps.iter().filter_map(|s| s.container.as_ref()) {
            if !seen.insert(container.image.id.as_str()) {
                continue;
            }
            let mut image = container.image.clone();
            if self.execution_target != ExecutionTarget::Osg {
                image.osg_image_path.clear();
            }
            images.push(image);
        }

        images
    }

    /// Every step's data containers concatenated in step order
    pub fn data_containers(&self) -> Vec<&VolumesFrom> {
        self.steps
            .iter()
            .filter_map(|s| s.container.as_ref())
            .flat_map(|c| c.volumes_from.iter())
            .collect()
    }

    /// One download argument vector per job input
    pub fn input_arguments(&self) -> Vec<Vec<String>> {
        self.inputs()
            .map(|i| i.arguments(&self.submitter, self.irods_config(), &self.file_metadata))
            .collect()
    }

    /// Arguments for the final "put" of the job outputs
    pub fn final_output_arguments(&self, exclude_file_path: &str) -> Vec<String> {
        let mut args = vec![
            "put".to_string(),
            "--user".to_string(),
            self.submitter.clone(),
            "--destination".to_string(),
            self.output_directory(),
            "--config".to_string(),
            self.irods_config().to_string(),
        ];
        args.extend(self.file_metadata_arguments());
        args.push("--exclude".to_string());
        args.push(exclude_file_path.to_string());

        if self.skip_parent_metadata {
            args.push("--skip-parent-meta".to_string());
        }

        debug!(
            invocation_id = %self.invocation_id,
            arg_count = args.len(),
            "Built final output arguments"
        );
        args
    }
}

/// `YYYY-MM-DD-HH-MM-SS.d` in UTC (tenths of a second)
pub fn format_now_date(now_millis: i64) -> String {
    let now: DateTime<Utc> = DateTime::from_timestamp_millis(now_millis).unwrap_or_default();
    format!(
        "{}.{}",
        now.format("%Y-%m-%d-%H-%M-%S"),
        now.timestamp_subsec_millis() / 100
    )
}

/// Slash-join segments and clean the result: empty and `.` segments are
/// dropped, `..` removes the previous segment, and no trailing separator is
/// kept. `..` above the root of an absolute path is discarded.
fn join_path(parts: &[&str]) -> String {
    let absolute = parts
        .iter()
        .find(|p| !p.is_empty())
        .is_some_and(|p| p.starts_with('/'));

    let mut segments: Vec<&str> = Vec::new();
    for seg in parts.iter().flat_map(|p| p.split('/')) {
        match seg {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(seg),
            },
            _ => segments.push(seg),
        }
    }

    let body = segments.join("/");
    if absolute {
        format!("/{}", body)
    } else if body.is_empty() {
        ".".to_string()
    } else {
        body
    }
}
