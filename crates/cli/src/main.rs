//! Batchjob CLI - Inspect what a job submission derives to
//!
//! Loads a JSON job description plus service configuration and prints the
//! transfer arguments, exclude list, scheduler request or resource totals.

mod logging;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing::info;

use batchjob_core::application::{load_job, SchedulerRequest, TransferPlan};
use batchjob_core::domain::{extract_job_id, Job};
use batchjob_core::port::SystemTimeProvider;
use batchjob_core::ServicesConfig;
use batchjob_infra_config::load_config;

const DEFAULT_EXCLUDE_FILE: &str = "logs/exclude.txt";

#[derive(Parser)]
#[command(name = "batchjob")]
#[command(about = "Batch job submission inspector", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (YAML, TOML or JSON)
    #[arg(long, global = true, env = "BATCHJOB_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every derived value of a submission as JSON
    Render {
        /// Job description (JSON)
        submission: PathBuf,

        /// Exclude file path passed to the final upload
        #[arg(long, default_value = DEFAULT_EXCLUDE_FILE)]
        exclude_file: String,

        /// Append the analysis/execution id metadata before rendering
        #[arg(long)]
        add_required_metadata: bool,
    },

    /// Print the exclude file contents
    Exclude {
        /// Job description (JSON)
        submission: PathBuf,
    },

    /// Show per-step and total resource requests
    Resources {
        /// Job description (JSON)
        submission: PathBuf,
    },

    /// Extract the cluster id from scheduler submit output
    JobId {
        /// File with the scheduler output (stdin when omitted)
        input: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct RenderOutput {
    directory_name: String,
    output_directory: String,
    condor_log_directory: String,
    user_groups: String,
    exclude: Vec<String>,
    transfers: TransferPlan,
    scheduler: SchedulerRequest,
}

#[derive(Tabled)]
struct ResourceRow {
    step: String,
    component: String,
    cpu_cores: f32,
    memory_mb: i64,
    disk_mb: i64,
}

fn read_job(path: &Path, config: &ServicesConfig) -> Result<Job> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read submission {}", path.display()))?;
    let job = load_job(&data, config, &SystemTimeProvider)
        .with_context(|| format!("Invalid submission {}", path.display()))?;
    Ok(job)
}

fn resource_rows(job: &Job) -> Vec<ResourceRow> {
    let mut rows: Vec<ResourceRow> = job
        .steps
        .iter()
        .enumerate()
        .map(|(idx, step)| ResourceRow {
            step: idx.to_string(),
            component: step.component.name.clone(),
            cpu_cores: step.cpu_cores(),
            memory_mb: step.memory_mb(),
            disk_mb: step.disk_mb(),
        })
        .collect();

    rows.push(ResourceRow {
        step: "total".to_string(),
        component: String::new(),
        cpu_cores: job.cpu_request(),
        memory_mb: job.memory_request(),
        disk_mb: job.disk_request(),
    });
    rows
}

fn read_input(input: Option<&Path>) -> Result<String> {
    let mut buf = Vec::new();
    match input {
        Some(path) => {
            buf = std::fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
        }
        None => {
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
        }
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn main() -> Result<()> {
    logging::init_logging()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            submission,
            exclude_file,
            add_required_metadata,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let mut job = read_job(&submission, &config)?;
            if add_required_metadata {
                job.add_required_metadata();
            }

            let output = RenderOutput {
                directory_name: job.directory_name(),
                output_directory: job.output_directory(),
                condor_log_directory: job.condor_log_directory(),
                user_groups: job.format_user_groups(),
                exclude: job.exclude_arguments(),
                transfers: TransferPlan::for_job(&job, &exclude_file),
                scheduler: SchedulerRequest::from_job(&job),
            };

            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Exclude { submission } => {
            let config = load_config(cli.config.as_deref())?;
            let job = read_job(&submission, &config)?;

            for token in job.exclude_arguments() {
                println!("{}", token);
            }
        }

        Commands::Resources { submission } => {
            let config = load_config(cli.config.as_deref())?;
            let job = read_job(&submission, &config)?;

            println!(
                "{}",
                format!("Resources for {}", job.invocation_id()).cyan().bold()
            );
            println!();
            println!("{}", Table::new(resource_rows(&job)));
        }

        Commands::JobId { input } => {
            let output = read_input(input.as_deref())?;

            match extract_job_id(&output) {
                Some(id) => {
                    info!(job_id = %id, "Extracted cluster id");
                    println!("{}", id);
                }
                None => {
                    eprintln!(
                        "{} {}",
                        "✗".red(),
                        "No cluster id found in scheduler output".red().bold()
                    );
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
