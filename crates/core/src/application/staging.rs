// Data staging: transfer-tool invocations around a job run

use serde::Serialize;
use tracing::debug;

use crate::domain::Job;

/// Exclude file contents: one token per line, trailing newline when non-empty
pub fn exclude_file_contents(job: &Job) -> String {
    let mut contents = job.exclude_arguments().join("\n");
    if !contents.is_empty() {
        contents.push('\n');
    }
    contents
}

/// Every transfer a job needs, ready to hand to the transfer tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferPlan {
    /// One "get" per input, in step order
    pub downloads: Vec<Vec<String>>,
    /// The final "put" of the outputs
    pub upload: Vec<String>,
    /// Contents to write to the exclude file referenced by `upload`
    pub exclude_file: String,
}

impl TransferPlan {
    pub fn for_job(job: &Job, exclude_file_path: &str) -> Self {
        let plan = Self {
            downloads: job.input_arguments(),
            upload: job.final_output_arguments(exclude_file_path),
            exclude_file: exclude_file_contents(job),
        };

        debug!(
            invocation_id = %job.invocation_id(),
            downloads = plan.downloads.len(),
            "Built transfer plan"
        );
        plan
    }
}
