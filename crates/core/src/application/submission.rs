// Submission Use Case: serialized job description -> Job

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ServicesConfig;
use crate::domain::error::{DomainError, Result as DomainResult};
use crate::domain::{ExecutionTarget, FileMetadata, InteractiveApps, Job, Step};
use crate::error::Result;
use crate::port::TimeProvider;

/// Job description as submitted by the apps service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobDescription {
    // Required identifiers (checked in `validate`)
    pub app_id: Option<String>,
    #[serde(rename = "uuid")]
    pub invocation_id: Option<String>,
    #[serde(rename = "username")]
    pub submitter: Option<String>,

    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub app_description: String,
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub wiki_url: String,
    #[serde(default)]
    pub request_type: String,
    #[serde(default, rename = "type")]
    pub app_type: String,
    #[serde(default)]
    pub execution_target: String,
    #[serde(default)]
    pub output_dir: String,
    #[serde(default)]
    pub create_output_subdir: bool,
    #[serde(default = "default_archive_logs")]
    pub archive_logs: bool,
    #[serde(default, rename = "skip-parent-meta")]
    pub skip_parent_metadata: bool,
    #[serde(default)]
    pub notify: bool,
    /// Absent and `null` both mean no groups
    #[serde(default)]
    pub user_groups: Option<Vec<String>>,
    #[serde(default, rename = "file-metadata")]
    pub file_metadata: Vec<FileMetadata>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub interactive_apps: Option<InteractiveApps>,
}

fn default_archive_logs() -> bool {
    true
}

/// Present and not blank. The value is returned exactly as supplied.
fn required(value: &Option<String>, field: &'static str) -> DomainResult<String> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(DomainError::MissingField(field)),
    }
}

/// Check required identifiers and step shape before anything is assembled
pub fn validate(desc: &JobDescription) -> DomainResult<()> {
    required(&desc.app_id, "app_id")?;
    required(&desc.invocation_id, "uuid")?;
    required(&desc.submitter, "username")?;
    desc.execution_target.parse::<ExecutionTarget>()?;

    for (idx, step) in desc.steps.iter().enumerate() {
        if step.component.name.trim().is_empty() {
            return Err(DomainError::ValidationError(format!(
                "step {} has no component name",
                idx
            )));
        }
    }

    Ok(())
}

/// Assemble a Job from a parsed description plus configuration
///
/// # Arguments
///
/// * `desc` - Parsed job description
/// * `config` - Service configuration (log path, filter files, data store base)
/// * `time_provider` - Clock read once for the job's directory timestamp
pub fn assemble(
    desc: JobDescription,
    config: &ServicesConfig,
    time_provider: &dyn TimeProvider,
) -> DomainResult<Job> {
    validate(&desc)?;

    let mut job = Job::new(
        required(&desc.app_id, "app_id")?,
        required(&desc.invocation_id, "uuid")?,
        desc.name,
        required(&desc.submitter, "username")?,
        time_provider.now_millis(),
    );

    job.email = desc.email;
    job.user_id = desc.user_id;
    job.description = desc.description;
    job.app_description = desc.app_description;
    job.app_name = desc.app_name;
    job.wiki_url = desc.wiki_url;
    job.request_type = desc.request_type;
    job.app_type = desc.app_type;
    job.execution_target = desc.execution_target.parse()?;
    job.output_dir = desc.output_dir;
    job.create_output_subdir = desc.create_output_subdir;
    job.archive_logs = desc.archive_logs;
    job.skip_parent_metadata = desc.skip_parent_metadata;
    job.notify = desc.notify;
    job.user_groups = desc.user_groups.unwrap_or_default();
    job.file_metadata = desc.file_metadata;
    job.steps = desc.steps;
    job.interactive_apps = desc.interactive_apps;

    job.irods_base = config.irods.base.clone();
    job.log_path = config.condor.log_path.clone();
    job.filter_files = config.condor.filter_file_list();
    job.run_on_nfs = config.condor.run_on_nfs;

    Ok(job)
}

/// Parse a JSON job description and assemble the Job.
///
/// Fails without producing a Job on malformed input or a missing identifier.
pub fn load_job(
    data: &[u8],
    config: &ServicesConfig,
    time_provider: &dyn TimeProvider,
) -> Result<Job> {
    let desc: JobDescription = serde_json::from_slice(data)?;
    debug!(steps = desc.steps.len(), "Parsed job description");

    let job = assemble(desc, config, time_provider)?;

    info!(
        invocation_id = %job.invocation_id(),
        app_id = %job.app_id(),
        submitter = %job.submitter,
        execution_target = %job.execution_target,
        steps = job.steps.len(),
        "Job loaded"
    );

    Ok(job)
}
