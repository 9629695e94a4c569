//! Scheduler request - values a scheduler submission template is rendered from
//!
//! - resource requests summed across steps
//! - per-job log directory
//! - user groups for accounting
//! - container images and data containers to pull before the job starts

use serde::Serialize;
use tracing::info;

use crate::domain::{ContainerImage, ExecutionTarget, Job, VolumesFrom};

/// Everything the submit template needs from a Job
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchedulerRequest {
    pub invocation_id: String,
    pub submitter: String,
    pub execution_target: ExecutionTarget,
    pub condor_log_directory: String,
    pub user_groups: String,
    pub request_cpus: f32,
    pub request_memory_mb: i64,
    pub request_disk_mb: i64,
    pub container_images: Vec<ContainerImage>,
    pub data_containers: Vec<VolumesFrom>,
    pub run_on_nfs: bool,
    pub notify: bool,
}

impl SchedulerRequest {
    pub fn from_job(job: &Job) -> Self {
        let request = Self {
            invocation_id: job.invocation_id().to_string(),
            submitter: job.submitter.clone(),
            execution_target: job.execution_target,
            condor_log_directory: job.condor_log_directory(),
            user_groups: job.format_user_groups(),
            request_cpus: job.cpu_request(),
            request_memory_mb: job.memory_request(),
            request_disk_mb: job.disk_request(),
            container_images: job.container_images(),
            data_containers: job.data_containers().into_iter().cloned().collect(),
            run_on_nfs: job.run_on_nfs,
            notify: job.notify,
        };

        info!(
            invocation_id = %request.invocation_id,
            cpus = request.request_cpus,
            memory_mb = request.request_memory_mb,
            disk_mb = request.request_disk_mb,
            images = request.container_images.len(),
            "Scheduler request prepared"
        );
        request
    }
}
