// Application Layer - Use cases over the job model

pub mod scheduler;
pub mod staging;
pub mod submission;

// Re-exports
pub use scheduler::SchedulerRequest;
pub use staging::{exclude_file_contents, TransferPlan};
pub use submission::{load_job, JobDescription};
