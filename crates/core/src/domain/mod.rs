// Domain Layer - Job model and pure derivations

pub mod container;
pub mod error;
pub mod interapps;
pub mod job;
pub mod job_id;
pub mod metadata;
pub mod quote;
pub mod step;

// Re-exports
pub use container::{Container, ContainerImage, Device, Ports, Volume, VolumesFrom};
pub use error::DomainError;
pub use interapps::InteractiveApps;
pub use job::{format_now_date, ExecutionTarget, Job};
pub use job_id::extract_job_id;
pub use metadata::{FileMetadata, MetadataArgs};
pub use quote::{double_quote, naively_quote, quote};
pub use step::{Component, Step, StepConfig, StepInput, StepOutput, StepParam, StepResources};
